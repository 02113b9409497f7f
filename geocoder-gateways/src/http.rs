use anyhow::Result;
use geocoder_core::gateways::fetch::ContentFetcher;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "geocoder-ca";

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Blocking HTTP fetcher based on `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
}

impl ReqwestFetcher {
    pub fn try_new(settings: &HttpSettings) -> Result<Self> {
        let HttpSettings {
            timeout,
            user_agent,
        } = settings;
        let client = reqwest::blocking::Client::builder()
            .timeout(*timeout)
            .user_agent(user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl ContentFetcher for ReqwestFetcher {
    fn get_content(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;
        // The body is returned for every status:
        // errors are reported inside the document.
        log::debug!("GET {url}: {}", response.status());
        Ok(response.text()?)
    }
}
