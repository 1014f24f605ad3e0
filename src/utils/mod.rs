pub mod ip;
pub mod time;
pub mod validators;

pub use time::format_duration_human;
