pub mod gateways;
pub mod util;

pub mod entities {
    pub use geocoder_entities::{address::*, geocode::*};
}

pub use self::gateways::geocode::GeocodeError;
