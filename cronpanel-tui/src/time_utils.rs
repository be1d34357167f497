use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

pub fn to_local_time(dt: OffsetDateTime) -> OffsetDateTime {
    if let Ok(local_offset) = UtcOffset::current_local_offset() {
        dt.to_offset(local_offset)
    } else {
        dt
    }
}

/// `2024-05-01 22:00:00`, in local time when the offset is known.
pub fn format_timestamp(dt: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    to_local_time(dt)
        .format(&format)
        .unwrap_or_else(|_| dt.to_string())
}
