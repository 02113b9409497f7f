use anyhow::{anyhow, Context as _, Result};
use geocoder_gateways::http::HttpSettings;
use std::{
    env, fs,
    io::ErrorKind,
    path::Path,
    time::Duration,
};
use url::Url;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "geocoder-ca.toml";

const ENV_NAME_BASE_URL: &str = "GEOCODER_CA_BASE_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub geocoder_ca: GeocoderCa,
    pub http: Http,
}

impl Config {
    /// Loads the given file, or `geocoder-ca.toml` from the
    /// working directory if present, or the defaults.
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let raw_config = match file_path {
            Some(file_path) => {
                let file_path = file_path.as_ref();
                let cfg_string = fs::read_to_string(file_path).with_context(|| {
                    format!("Unable to read configuration {}", file_path.display())
                })?;
                toml::from_str(&cfg_string)?
            }
            None => match fs::read_to_string(DEFAULT_CONFIG_FILE_NAME) {
                Ok(cfg_string) => {
                    log::info!("Load configuration from {DEFAULT_CONFIG_FILE_NAME}");
                    toml::from_str(&cfg_string)?
                }
                Err(err) => match err.kind() {
                    ErrorKind::NotFound => {
                        log::info!(
                            "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                        );
                        raw::Config::default()
                    }
                    _ => return Err(err.into()),
                },
            },
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(base_url) = env::var(ENV_NAME_BASE_URL) {
            cfg.geocoder_ca.base_url = parse_base_url(&base_url)?;
        }
        Ok(cfg)
    }
}

#[derive(Debug, Clone)]
pub struct GeocoderCa {
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct Http {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl From<Http> for HttpSettings {
    fn from(from: Http) -> Self {
        let Http {
            timeout,
            user_agent,
        } = from;
        Self {
            timeout,
            user_agent,
        }
    }
}

fn default_user_agent() -> String {
    format!("geocoder-ca/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_base_url(s: &str) -> Result<Url> {
    let url = Url::parse(s).with_context(|| format!("Invalid base URL '{s}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!("Unsupported base URL scheme '{}'", url.scheme()));
    }
    if url.query().is_some() {
        return Err(anyhow!("The base URL '{s}' must not contain a query"));
    }
    Ok(url)
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { geocoder_ca, http } = from;

        let raw::GeocoderCa { base_url } = geocoder_ca.unwrap_or_default();
        let base_url = base_url
            .or_else(|| raw::GeocoderCa::default().base_url)
            .ok_or_else(|| anyhow!("Missing base URL"))?;
        let base_url = parse_base_url(&base_url)?;
        let geocoder_ca = GeocoderCa { base_url };

        let raw::Http {
            timeout,
            user_agent,
        } = http.unwrap_or_default();
        let http = Http {
            timeout,
            user_agent: user_agent.unwrap_or_else(default_user_agent),
        };

        Ok(Self { geocoder_ca, http })
    }
}
