pub mod geocoder_ca;
pub mod http;
pub mod xml;
