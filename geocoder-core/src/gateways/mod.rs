pub mod fetch;
pub mod geocode;
