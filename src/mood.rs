//! Productivity-reactive mood engine.
//!
//! Observes a read-only task snapshot once per tick and derives a mood,
//! an animation frame, a celebration message, and a session streak. It
//! never mutates tasks and is independent of the UI mode; the UI just
//! renders whatever the accessors return.

use std::time::{Duration, Instant};

use chrono::{Local, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::task::{Priority, Task};

/// Minimum interval between accepted updates
const UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Accepted ticks a celebration lasts before demoting to Focused
const CELEBRATION_TICKS: u32 = 8;

/// Accepted ticks a celebration message is retained
const CELEBRATION_MESSAGE_TICKS: u32 = 15;

/// Inferred productivity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Sleeping,
    Working,
    Focused,
    Celebrating,
    Stressed,
}

impl Mood {
    /// Sprite set cycled through while this mood is active
    pub fn sprites(self) -> &'static [&'static str] {
        match self {
            Mood::Sleeping => &["😴", "💤"],
            Mood::Working => &["🦕", "🦖"],
            Mood::Focused => &["🎯", "🦕"],
            Mood::Celebrating => &["🎉", "🦕", "✨", "🎊"],
            Mood::Stressed => &["😰", "🦕"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mood::Sleeping => "No tasks yet",
            Mood::Working => "Getting things done",
            Mood::Focused => "In the zone",
            Mood::Celebrating => "All done!",
            Mood::Stressed => "Many high priority tasks",
        }
    }
}

/// Derive the mood from a task snapshot; first match wins
fn derive_mood(tasks: &[Task]) -> Mood {
    if tasks.is_empty() {
        return Mood::Sleeping;
    }
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let high_pending = tasks
        .iter()
        .filter(|t| t.priority == Priority::High && !t.completed)
        .count();

    if completed == total {
        Mood::Celebrating
    } else if high_pending >= 3 {
        Mood::Stressed
    } else if completed as f64 / total as f64 >= 0.7 {
        Mood::Focused
    } else if completed > 0 {
        Mood::Working
    } else {
        Mood::Sleeping
    }
}

/// Rate-limited animation/status engine driven by the task snapshot
pub struct MoodEngine {
    enabled: bool,
    mood: Mood,
    frame: usize,
    last_update: Option<Instant>,
    celebration_timer: u32,
    celebration_message: Option<String>,
    celebration_message_timer: u32,
    productivity_streak: u32,
    last_completed_count: usize,
    last_all_completed: bool,
    last_task_total: usize,
    rng: StdRng,
}

impl MoodEngine {
    pub fn new(enabled: bool) -> Self {
        Self::with_rng(enabled, StdRng::from_entropy())
    }

    /// Seeded constructor so message selection is deterministic under test
    pub fn with_seed(enabled: bool, seed: u64) -> Self {
        Self::with_rng(enabled, StdRng::seed_from_u64(seed))
    }

    fn with_rng(enabled: bool, rng: StdRng) -> Self {
        MoodEngine {
            enabled,
            mood: Mood::Sleeping,
            frame: 0,
            last_update: None,
            celebration_timer: 0,
            celebration_message: None,
            celebration_message_timer: 0,
            productivity_streak: 0,
            last_completed_count: 0,
            last_all_completed: false,
            last_task_total: 0,
            rng,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.frame = 0;
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn streak(&self) -> u32 {
        self.productivity_streak
    }

    /// Tick the engine against the current task snapshot
    pub fn update(&mut self, tasks: &[Task]) {
        self.update_at(Instant::now(), tasks);
    }

    /// Clock-explicit variant of `update`. Calls within the minimum
    /// interval of the previous accepted update are ignored entirely.
    pub fn update_at(&mut self, now: Instant, tasks: &[Task]) {
        if !self.enabled {
            return;
        }
        if let Some(last) = self.last_update {
            if now.duration_since(last) < UPDATE_INTERVAL {
                return;
            }
        }
        self.last_update = Some(now);

        let new_mood = derive_mood(tasks);

        // Celebration message: fires when the collection just became fully
        // completed, or the total changed while it stayed fully completed
        // (add-then-recomplete without an intervening empty state).
        let all_completed = !tasks.is_empty() && tasks.iter().all(|t| t.completed);
        let total_changed = tasks.len() != self.last_task_total;
        let mut message_generated = false;
        if all_completed && (!self.last_all_completed || total_changed) {
            self.celebration_message = Some(self.pick_celebration_message(tasks.len()));
            self.celebration_message_timer = CELEBRATION_MESSAGE_TICKS;
            message_generated = true;
        } else if !all_completed {
            self.celebration_message = None;
            self.celebration_message_timer = 0;
        }
        self.last_all_completed = all_completed;
        self.last_task_total = tasks.len();

        let mut celebration_started = false;
        if new_mood != self.mood {
            if new_mood == Mood::Celebrating {
                self.celebration_timer = CELEBRATION_TICKS;
                celebration_started = true;
            }
            self.mood = new_mood;
        }

        // Streak only ever grows, by the completed-count increase
        if !tasks.is_empty() {
            let completed = tasks.iter().filter(|t| t.completed).count();
            if completed > self.last_completed_count {
                self.productivity_streak += (completed - self.last_completed_count) as u32;
            }
            self.last_completed_count = completed;
        }

        // Countdowns start ticking on the update after they are set
        if !celebration_started && self.celebration_timer > 0 {
            self.celebration_timer -= 1;
            if self.celebration_timer == 0 && self.mood == Mood::Celebrating {
                // Celebration over: settle into focused, not re-derived
                self.mood = Mood::Focused;
            }
        }

        if !message_generated && self.celebration_message_timer > 0 {
            self.celebration_message_timer -= 1;
            if self.celebration_message_timer == 0 {
                self.celebration_message = None;
            }
        }

        self.frame = (self.frame + 1) % self.mood.sprites().len();
    }

    fn pick_celebration_message(&mut self, count: usize) -> String {
        let messages = [
            format!("🎉 All {} tasks completed! Amazing work!", count),
            format!("✨ Perfect! You finished all {} tasks!", count),
            format!("🎊 Task master! {}/{} done!", count, count),
            "🏆 Incredible! All tasks complete!".to_string(),
        ];
        let idx = self.rng.gen_range(0..messages.len());
        messages[idx].clone()
    }

    // -----------------------------------------------------------------
    // Read-only accessors (pure functions of snapshot + engine state)

    /// Current sprite glyph, empty when disabled
    pub fn current_sprite(&self) -> &'static str {
        if !self.enabled {
            return "";
        }
        let sprites = self.mood.sprites();
        sprites[self.frame % sprites.len()]
    }

    pub fn mood_description(&self) -> &'static str {
        if !self.enabled {
            return "Animation disabled";
        }
        self.mood.description()
    }

    /// Fixed-width progress bar: filled = floor(completed/total × length)
    pub fn progress_bar(&self, tasks: &[Task], length: usize) -> String {
        let total = tasks.len();
        if total == 0 {
            return "▱".repeat(length);
        }
        let completed = tasks.iter().filter(|t| t.completed).count();
        let filled = completed * length / total;
        format!("{}{}", "▰".repeat(filled), "▱".repeat(length - filled))
    }

    /// Alert for pending high-priority tasks: 🚨 at ≥3, 🔥 at ≥1
    pub fn priority_indicator(&self, tasks: &[Task]) -> &'static str {
        let high_pending = tasks
            .iter()
            .filter(|t| t.priority == Priority::High && !t.completed)
            .count();
        if high_pending >= 3 {
            "🚨"
        } else if high_pending >= 1 {
            "🔥"
        } else {
            ""
        }
    }

    /// Tiered streak indicator
    pub fn streak_indicator(&self) -> &'static str {
        match self.productivity_streak {
            n if n >= 10 => "🏆",
            n if n >= 5 => "🔥",
            n if n >= 3 => "⭐",
            n if n >= 1 => "✓",
            _ => "",
        }
    }

    pub fn time_of_day_indicator(&self) -> &'static str {
        time_of_day_for(Local::now().hour())
    }

    /// Compact status line for the status row
    pub fn compact_status(&self, tasks: &[Task], max_width: usize) -> String {
        if tasks.is_empty() {
            if self.enabled {
                return format!("No tasks {}", self.current_sprite());
            }
            return "No tasks".to_string();
        }

        let completed = tasks.iter().filter(|t| t.completed).count();
        let mut parts = vec![
            format!("{}/{}", completed, tasks.len()),
            self.progress_bar(tasks, 6),
        ];
        if self.enabled {
            let sprite = self.current_sprite();
            if !sprite.is_empty() {
                parts.push(sprite.to_string());
            }
        }
        let base = parts.join(" ");

        let mut indicators: Vec<&str> = Vec::new();
        let prio = self.priority_indicator(tasks);
        if !prio.is_empty() {
            indicators.push(prio);
        }
        let streak = self.streak_indicator();
        if !streak.is_empty() {
            indicators.push(streak);
        }
        indicators.push(self.time_of_day_indicator());

        let full = format!("{} {}", base, indicators.join(" "));
        if full.chars().count() <= max_width {
            full
        } else {
            base
        }
    }

    /// The retained celebration message, only while the collection is
    /// currently fully completed
    pub fn celebration_message(&self, tasks: &[Task]) -> Option<&str> {
        if !self.enabled || tasks.is_empty() {
            return None;
        }
        if tasks.iter().all(|t| t.completed) {
            self.celebration_message.as_deref()
        } else {
            None
        }
    }

    /// Threshold-based motivation message
    pub fn motivation_message(&self, tasks: &[Task]) -> Option<String> {
        if !self.enabled || tasks.is_empty() {
            return None;
        }
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        if completed == 0 {
            Some("🦕 Ready to tackle some tasks?".to_string())
        } else if completed == total - 1 {
            Some("🎯 One more task to go! You've got this!".to_string())
        } else if completed * 2 >= total {
            Some(format!("⭐ Great progress! {}/{} done!", completed, total))
        } else {
            None
        }
    }
}

/// Time-of-day glyph for an hour of the local clock
fn time_of_day_for(hour: u32) -> &'static str {
    match hour {
        5..=11 => "🌅",
        12..=16 => "☀️",
        17..=20 => "🌆",
        _ => "🌙",
    }
}
