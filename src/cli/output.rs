//! Plain-text formatting for the non-interactive commands. Pure
//! functions so the exact output is testable without touching stdout.

use crate::model::task::{Priority, Task};
use crate::util::time::humanize_time_delta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Pending,
    Completed,
}

impl ListFilter {
    pub fn parse(s: &str) -> Option<ListFilter> {
        match s {
            "all" => Some(ListFilter::All),
            "pending" => Some(ListFilter::Pending),
            "completed" => Some(ListFilter::Completed),
            _ => None,
        }
    }

    fn keeps(self, task: &Task) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Pending => !task.completed,
            ListFilter::Completed => task.completed,
        }
    }
}

pub fn format_list(tasks: &[Task], filter: ListFilter) -> String {
    let selected: Vec<&Task> = tasks.iter().filter(|t| filter.keeps(t)).collect();
    if selected.is_empty() {
        return "No tasks.\n".to_string();
    }

    let mut out = String::new();
    let mut separator_done = false;
    for task in &selected {
        // blank line between the pending and completed blocks
        if filter == ListFilter::All && task.completed && !separator_done {
            if !out.is_empty() {
                out.push('\n');
            }
            separator_done = true;
        }
        out.push_str(&format_task_line(task));
        out.push('\n');
    }

    let pending = tasks.iter().filter(|t| !t.completed).count();
    let completed = tasks.len() - pending;
    out.push('\n');
    out.push_str(&format_counts(pending, completed));
    out.push('\n');
    out
}

pub fn format_task_line(task: &Task) -> String {
    let status = if task.completed { "✓" } else { "○" };
    format!(
        "{:>4} {} {} {} ({})",
        task.id,
        status,
        priority_tag(task.priority),
        task.text,
        humanize_time_delta(&task.created_at)
    )
}

pub fn format_counts(pending: usize, completed: usize) -> String {
    format!(
        "{} pending, {} completed ({} total)",
        pending,
        completed,
        pending + completed
    )
}

fn priority_tag(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "▲",
        Priority::Normal => "•",
        Priority::Low => "▽",
    }
}
