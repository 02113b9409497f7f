use anyhow::Result;
use clap::{Parser, Subcommand};
use geocoder_core::{entities::GeocodeResult, gateways::geocode::GeocodingProvider, GeocodeError};
use geocoder_gateways::{
    geocoder_ca::GeocoderCa,
    http::{HttpSettings, ReqwestFetcher},
};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(version, about = "Geocode addresses and coordinates with geocoder.ca")]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve an address to coordinates
    Geocode {
        #[arg(value_name = "ADDRESS")]
        address: String,
    },
    /// Resolve coordinates to an address
    Reverse {
        #[arg(value_name = "LATITUDE", allow_negative_numbers = true)]
        latitude: String,
        #[arg(value_name = "LONGITUDE", allow_negative_numbers = true)]
        longitude: String,
    },
    /// Print the provider name
    Name,
}

pub fn run(args: Args) -> Result<()> {
    let Args { config, command } = args;
    let cfg = Config::try_load_from_file_or_default(config)?;
    let fetcher = ReqwestFetcher::try_new(&HttpSettings::from(cfg.http))?;
    let provider = GeocoderCa::new(fetcher).with_base_url(cfg.geocoder_ca.base_url);
    match command {
        Command::Geocode { address } => {
            log::debug!("Geocode '{address}'");
            let res = provider.geocode(&address)?;
            print!("{}", format_result(&res));
        }
        Command::Reverse {
            latitude,
            longitude,
        } => {
            log::debug!("Reverse geocode {latitude}, {longitude}");
            let res = provider.reverse_geocode(&latitude, &longitude)?;
            print!("{}", format_result(&res));
        }
        Command::Name => {
            println!("{}", provider.name());
        }
    }
    Ok(())
}

/// One `key: value` line per attribute, `-` marks missing values.
fn format_result(res: &GeocodeResult) -> String {
    res.attributes()
        .iter()
        .map(|(key, value)| format!("{key}: {}\n", value.unwrap_or("-")))
        .collect()
}

pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GeocodeError>() {
        Some(GeocodeError::UnsupportedInput { .. }) => 2,
        Some(GeocodeError::NoResult(_)) => 3,
        Some(GeocodeError::Fetch(_)) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_reverse_with_negative_coordinates() {
        let args = Args::try_parse_from(["geocoder-ca", "reverse", "45.4", "-75.7"]).unwrap();
        assert!(args.config.is_none());
        match args.command {
            Command::Reverse {
                latitude,
                longitude,
            } => {
                assert_eq!(latitude, "45.4");
                assert_eq!(longitude, "-75.7");
            }
            _ => panic!("Unexpected command"),
        }
    }

    #[test]
    fn parse_geocode_with_config() {
        let args = Args::try_parse_from([
            "geocoder-ca",
            "--config",
            "my.toml",
            "geocode",
            "10 Downing St, London",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        assert!(
            matches!(args.command, Command::Geocode { ref address } if address == "10 Downing St, London")
        );
    }

    #[test]
    fn missing_subcommand() {
        assert!(Args::try_parse_from(["geocoder-ca"]).is_err());
    }

    #[test]
    fn format_forward_result() {
        let res = GeocodeResult {
            latitude: Some("45.4".into()),
            longitude: Some("-75.7".into()),
            ..Default::default()
        };
        let out = format_result(&res);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "latitude: 45.4");
        assert_eq!(lines[1], "longitude: -75.7");
        assert_eq!(lines[2], "bounds: -");
        assert_eq!(lines[12], "timezone: -");
    }

    #[test]
    fn exit_codes() {
        let unsupported = anyhow::Error::from(GeocodeError::UnsupportedInput {
            provider: "geocoder_ca",
        });
        assert_eq!(exit_code(&unsupported), 2);
        let no_result = anyhow::Error::from(GeocodeError::NoResult("nothing".into()));
        assert_eq!(exit_code(&no_result), 3);
        let fetch = anyhow::Error::from(GeocodeError::Fetch(anyhow::anyhow!("timeout")));
        assert_eq!(exit_code(&fetch), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("config")), 1);
    }
}
