pub mod date;
pub mod last_updated;
pub mod lesson;
pub mod money;
pub mod person;
pub mod time_range;
