/// A bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// The normalized outcome of a single forward or reverse lookup.
///
/// All values are kept exactly as the upstream service returned them.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeocodeResult {
    pub latitude      : Option<String>,
    pub longitude     : Option<String>,
    pub bounds        : Option<Bounds>,
    pub street_number : Option<String>,
    pub street_name   : Option<String>,
    pub city          : Option<String>,
    pub zipcode       : Option<String>,
    pub city_district : Option<String>,
    pub region        : Option<String>,
    pub region_code   : Option<String>,
    pub country       : Option<String>,
    pub country_code  : Option<String>,
    pub timezone      : Option<String>,
}

/// Attribute keys in the order they are reported by [`GeocodeResult::attributes`].
pub const ATTRIBUTE_KEYS: [&str; 13] = [
    "latitude",
    "longitude",
    "bounds",
    "streetNumber",
    "streetName",
    "city",
    "zipcode",
    "cityDistrict",
    "region",
    "regionCode",
    "country",
    "countryCode",
    "timezone",
];

impl GeocodeResult {
    /// The result as a fixed attribute map.
    ///
    /// Every key of [`ATTRIBUTE_KEYS`] is present exactly once.
    /// `bounds` has no textual form and is always reported as absent.
    pub fn attributes(&self) -> [(&'static str, Option<&str>); 13] {
        let Self {
            latitude,
            longitude,
            bounds: _,
            street_number,
            street_name,
            city,
            zipcode,
            city_district,
            region,
            region_code,
            country,
            country_code,
            timezone,
        } = self;
        let values = [
            latitude.as_deref(),
            longitude.as_deref(),
            None,
            street_number.as_deref(),
            street_name.as_deref(),
            city.as_deref(),
            zipcode.as_deref(),
            city_district.as_deref(),
            region.as_deref(),
            region_code.as_deref(),
            country.as_deref(),
            country_code.as_deref(),
            timezone.as_deref(),
        ];
        let mut attributes = [("", None); 13];
        for (attr, (key, value)) in attributes
            .iter_mut()
            .zip(ATTRIBUTE_KEYS.into_iter().zip(values))
        {
            *attr = (key, value);
        }
        attributes
    }

    /// Latitude and longitude as numbers, if both are present and numeric.
    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.as_deref()?.trim().parse().ok()?;
        let lng = self.longitude.as_deref()?.trim().parse().ok()?;
        Some((lat, lng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_result_has_no_attribute_values() {
        let res = GeocodeResult::default();
        assert!(res.attributes().iter().all(|(_, v)| v.is_none()));
        assert_eq!(res.lat_lng(), None);
    }

    #[test]
    fn attributes_follow_the_fixed_key_order() {
        let res = GeocodeResult {
            latitude: Some("45.4".into()),
            longitude: Some("-75.7".into()),
            city_district: Some("ON".into()),
            ..Default::default()
        };
        let attributes = res.attributes();
        let keys: Vec<_> = attributes.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ATTRIBUTE_KEYS);
        assert_eq!(attributes[0], ("latitude", Some("45.4")));
        assert_eq!(attributes[1], ("longitude", Some("-75.7")));
        assert_eq!(attributes[7], ("cityDistrict", Some("ON")));
        assert_eq!(attributes[12], ("timezone", None));
    }

    #[test]
    fn bounds_are_never_reported_as_text() {
        let res = GeocodeResult {
            bounds: Some(Bounds {
                south: 1.0,
                west: 2.0,
                north: 3.0,
                east: 4.0,
            }),
            ..Default::default()
        };
        assert_eq!(res.attributes()[2], ("bounds", None));
    }

    #[test]
    fn parse_lat_lng() {
        let mut res = GeocodeResult {
            latitude: Some("45.4".into()),
            longitude: Some(" -75.7 ".into()),
            ..Default::default()
        };
        assert_eq!(res.lat_lng(), Some((45.4, -75.7)));
        res.longitude = Some("west".into());
        assert_eq!(res.lat_lng(), None);
        res.longitude = None;
        assert_eq!(res.lat_lng(), None);
    }
}
