//! Adapter for the [geocoder.ca](http://geocoder.ca) XML API.

use geocoder_core::{
    entities::{Address, GeocodeResult},
    gateways::{
        fetch::ContentFetcher,
        geocode::{GeoCodingGateway, GeocodingProvider},
    },
    util::validate::is_ip_address,
    GeocodeError,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::xml::Document;

pub const NAME: &str = "geocoder_ca";

pub const DEFAULT_BASE_URL: &str = "http://geocoder.ca/";

/// Characters kept as they are in a query value (besides alphanumerics).
/// Spaces are turned into `+` afterwards.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b' ');

fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE)
        .to_string()
        .replace(' ', "+")
}

#[derive(Debug, Clone)]
pub struct GeocoderCa<F> {
    fetcher: F,
    base_url: String,
}

impl<F> GeocoderCa<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Send requests to another host, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn geocode_url(&self, address: &str) -> String {
        format!(
            "{}?geoit=xml&locate={}",
            self.base_url,
            encode_query_value(address)
        )
    }

    // The coordinates are inserted as they are.
    fn reverse_url(&self, latitude: &str, longitude: &str) -> String {
        format!(
            "{}?geoit=xml&reverse=1&latt={latitude}&longt={longitude}",
            self.base_url
        )
    }
}

impl<F> GeocoderCa<F>
where
    F: ContentFetcher,
{
    /// Fetches and parses a response.
    ///
    /// Returns `None` if the response is not a valid document
    /// or if the service reported an error.
    fn query(&self, url: &str) -> Result<Option<Document>, GeocodeError> {
        log::debug!("Query {url}");
        let content = self.fetcher.get_content(url)?;
        match Document::parse(&content) {
            Ok(doc) if doc.contains("error") => {
                log::debug!(
                    "{url} reported an error: {}",
                    doc.first_text("error").unwrap_or_default()
                );
                Ok(None)
            }
            Ok(doc) => Ok(Some(doc)),
            Err(err) => {
                log::debug!("Invalid response from {url}: {err}");
                Ok(None)
            }
        }
    }
}

impl<F> GeocodingProvider for GeocoderCa<F>
where
    F: ContentFetcher,
{
    fn name(&self) -> &'static str {
        NAME
    }

    fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        if is_ip_address(address) {
            return Err(GeocodeError::UnsupportedInput { provider: NAME });
        }
        let url = self.geocode_url(address);
        let doc = self
            .query(&url)?
            .ok_or_else(|| GeocodeError::NoResult(format!("Could not execute query {url}")))?;
        Ok(GeocodeResult {
            latitude: doc.first_text("latt"),
            longitude: doc.first_text("longt"),
            ..Default::default()
        })
    }

    fn reverse_geocode(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<GeocodeResult, GeocodeError> {
        let url = self.reverse_url(latitude, longitude);
        let doc = self.query(&url)?.ok_or_else(|| {
            GeocodeError::NoResult(format!(
                "Could not resolve coordinates {latitude}, {longitude}"
            ))
        })?;
        Ok(GeocodeResult {
            latitude: doc.first_text("latt"),
            longitude: doc.first_text("longt"),
            street_number: doc.first_text("stnumber"),
            street_name: doc.first_text("staddress"),
            city: doc.first_text("city"),
            zipcode: doc.first_text("postal"),
            city_district: doc.first_text("prov"),
            ..Default::default()
        })
    }
}

impl<F> GeoCodingGateway for GeocoderCa<F>
where
    F: ContentFetcher,
{
    fn resolve_address_lat_lng(&self, addr: &Address) -> Option<(f64, f64)> {
        let query = addr.to_forward_query();
        if query.is_empty() {
            return None;
        }
        match self.geocode(&query) {
            Ok(res) => {
                let lat_lng = res.lat_lng();
                if let Some(lat_lng) = lat_lng {
                    log::debug!("Resolved address location '{query}': {lat_lng:?}");
                } else {
                    log::warn!("No coordinates found for address '{query}'");
                }
                lat_lng
            }
            Err(err) => {
                log::warn!("Failed to resolve address location '{query}': {err}");
                None
            }
        }
    }
}
