use chrono::{DateTime, Local};

/// Humanize an RFC 3339 creation timestamp relative to now: "3d", "2h",
/// "15m", or "now". Future timestamps read "future"; anything unparseable
/// falls back to "?".
pub fn humanize_time_delta(created_at: &str) -> String {
    humanize_at(created_at, Local::now())
}

fn humanize_at(created_at: &str, now: DateTime<Local>) -> String {
    let created = match DateTime::parse_from_rfc3339(created_at) {
        Ok(dt) => dt.with_timezone(&Local),
        Err(_) => return "?".to_string(),
    };
    let delta = now.signed_duration_since(created);
    if delta.num_seconds() < 0 {
        return "future".to_string();
    }
    let days = delta.num_days();
    let hours = delta.num_hours();
    let minutes = delta.num_minutes();
    if days > 0 {
        format!("{}d", days)
    } else if hours > 0 {
        format!("{}h", hours)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        "now".to_string()
    }
}
