pub mod indicator;
pub mod measurements;
pub mod pagination;
pub mod provisional;
pub mod station;
