pub mod daily_client;
pub mod hourly_client;
pub mod station_client;
pub mod temperature_client;
