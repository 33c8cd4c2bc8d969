use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::{AppError, LookupError};
use crate::weather::{WeatherQuery, WeatherResult};

pub const DEFAULT_BASE_URL: &str = "https://weather-backend-ugpk.onrender.com";

const WEATHER_PATH: &str = "/weatherapi/weather/";

const USER_AGENT: &str = concat!("wxcity/", env!("CARGO_PKG_VERSION"));

/// Anything that can turn a city into a weather payload.
pub trait WeatherSource: Send + Sync + 'static {
    fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResult, LookupError>;
}

#[derive(Debug, Clone)]
pub struct WeatherApi {
    base_url: String,
    client: Client,
}

impl WeatherApi {
    /// `timeout` of `None` waits as long as the server takes.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        // the blocking client defaults to 30s, so the absence of a timeout is set explicitly
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{WEATHER_PATH}", self.base_url)
    }
}

impl WeatherSource for WeatherApi {
    fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResult, LookupError> {
        let url = self.endpoint();
        debug!(url = %url, city = query.city(), "requesting weather");

        // the city goes through the query encoder, never straight into the URL
        let response = self
            .client
            .get(&url)
            .query(&[("city", query.city())])
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "weather payload could not be decoded");
            LookupError::Other(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let api = WeatherApi::new("http://localhost:8000/", None).unwrap();
        assert_eq!(api.endpoint(), "http://localhost:8000/weatherapi/weather/");

        let api = WeatherApi::new(DEFAULT_BASE_URL, Some(Duration::from_secs(5))).unwrap();
        assert_eq!(
            api.endpoint(),
            "https://weather-backend-ugpk.onrender.com/weatherapi/weather/"
        );
    }
}
