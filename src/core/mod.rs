pub mod derive;
pub mod format;
pub mod recalibrate;
pub mod sync;
pub mod timer;
