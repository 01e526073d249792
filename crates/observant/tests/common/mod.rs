use chrono::{DateTime, TimeZone, Utc};
use observant_core::{Message, Role};

pub fn ts(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
}

pub fn user(content: &str, day: u32, hour: u32, minute: u32) -> Message {
    Message::new(Role::User, content, ts(day, hour, minute))
}

pub fn assistant(content: &str, day: u32, hour: u32, minute: u32) -> Message {
    Message::new(Role::Assistant, content, ts(day, hour, minute))
}
