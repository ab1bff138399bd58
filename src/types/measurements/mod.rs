pub mod daily;
pub mod hourly;
