pub mod calendar;
pub mod snapshot;
pub mod worklog;
