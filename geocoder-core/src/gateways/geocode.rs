use geocoder_entities::{address::Address, geocode::GeocodeResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The provider cannot handle this kind of input.
    #[error("The {provider} provider does not support IP addresses")]
    UnsupportedInput { provider: &'static str },
    /// The request succeeded but the service returned nothing usable.
    #[error("{0}")]
    NoResult(String),
    /// The transport failed.
    #[error(transparent)]
    Fetch(#[from] anyhow::Error),
}

/// A geocoding service that resolves addresses and coordinates.
pub trait GeocodingProvider {
    /// Static identifier of the provider.
    fn name(&self) -> &'static str;
    fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;
    fn reverse_geocode(&self, latitude: &str, longitude: &str)
        -> Result<GeocodeResult, GeocodeError>;
}

pub trait GeoCodingGateway {
    fn resolve_address_lat_lng(&self, addr: &Address) -> Option<(f64, f64)>;
}
