use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::FetchError,
    model::{Coordinates, WeatherSnapshot},
};

use super::WeatherProvider;

const KEY_HEADER: &str = "x-rapidapi-key";
const HOST_HEADER: &str = "x-rapidapi-host";

/// Client for the RapidAPI "open-weather13" endpoints.
#[derive(Debug, Clone)]
pub struct RapidApiProvider {
    api: ApiConfig,
    http: Client,
}

impl RapidApiProvider {
    pub fn new(api: ApiConfig) -> Self {
        Self { api, http: Client::new() }
    }

    pub fn city_url(&self) -> String {
        format!("{}/city", self.api.base_url.trim_end_matches('/'))
    }

    pub fn coords_url(&self) -> String {
        format!("{}/latlon", self.api.base_url.trim_end_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(KEY_HEADER, self.api.key.as_str())
            .header(HOST_HEADER, self.api.host.as_str())
    }

    async fn execute(&self, request: RequestBuilder) -> Result<WeatherSnapshot, FetchError> {
        let res = self.authorized(request).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: Value = serde_json::from_str(&body)?;
        Ok(WeatherSnapshot::new(parsed))
    }
}

#[async_trait]
impl WeatherProvider for RapidApiProvider {
    async fn fetch_by_city(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let url = self.city_url();
        tracing::debug!(%url, city, "requesting weather by city");

        let request = self
            .http
            .get(url)
            .query(&[("city", city), ("lang", self.api.lang.as_str())]);

        self.execute(request).await
    }

    async fn fetch_by_coords(&self, coords: Coordinates) -> Result<WeatherSnapshot, FetchError> {
        let url = self.coords_url();
        tracing::debug!(%url, %coords, "requesting weather by coordinates");

        let request = self.http.get(url).query(&[
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("lang", self.api.lang.clone()),
        ]);

        self.execute(request).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "é".repeat(300);
        assert!(truncate_body(&body).starts_with('é'));
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let provider = RapidApiProvider::new(ApiConfig {
            base_url: "https://example.test/".into(),
            ..ApiConfig::default()
        });
        assert_eq!(provider.city_url(), "https://example.test/city");
    }
}
