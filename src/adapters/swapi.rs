use crate::core::context::Context;
use crate::domain::ports::AppearanceCounter;
use crate::utils::error::{Result, StarsError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<PlanetResult>,
}

#[derive(Debug, Deserialize)]
struct PlanetResult {
    name: String,
    #[serde(default)]
    films: Vec<String>,
}

/// 透過 SWAPI `planets/?search=` 查詢行星出現在幾部電影中
#[derive(Debug, Clone)]
pub struct SwapiCounter {
    api_url: String,
    client: Client,
}

impl SwapiCounter {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            client: Client::new(),
        }
    }

    pub fn with_timeout(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_url: api_url.into(),
            client,
        })
    }

    fn search_endpoint(&self) -> String {
        format!("{}/planets/", self.api_url.trim_end_matches('/'))
    }

    async fn search(&self, name: &str) -> Result<SearchResponse> {
        let endpoint = self.search_endpoint();
        tracing::debug!("Making SWAPI request to: {} (search={})", endpoint, name);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("search", name)])
            .send()
            .await?;

        tracing::debug!("SWAPI response status: {}", response.status());

        if !response.status().is_success() {
            return Err(StarsError::CounterError {
                message: format!("{} returned status {}", endpoint, response.status()),
            });
        }

        Ok(response.json::<SearchResponse>().await?)
    }
}

/// 在搜尋結果中找出名稱完全相符 (不分大小寫) 的行星並回傳電影數
fn count_films(results: &[PlanetResult], name: &str) -> u32 {
    let wanted = name.to_lowercase();
    results
        .iter()
        .find(|p| p.name.to_lowercase() == wanted)
        .map(|p| u32::try_from(p.films.len()).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

#[async_trait]
impl AppearanceCounter for SwapiCounter {
    async fn count_appearances(&self, ctx: &Context, name: &str) -> Result<u32> {
        let body = ctx.run(self.search(name)).await?;
        Ok(count_films(&body.results, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn result(name: &str, films: usize) -> PlanetResult {
        PlanetResult {
            name: name.to_string(),
            films: (0..films)
                .map(|i| format!("https://swapi.dev/api/films/{}/", i + 1))
                .collect(),
        }
    }

    #[test]
    fn test_count_films_exact_match_only() {
        let results = vec![result("Yavin IV", 2), result("Yavin", 1)];
        assert_eq!(count_films(&results, "Yavin"), 1);
        assert_eq!(count_films(&results, "yavin iv"), 2);
        assert_eq!(count_films(&results, "Yav"), 0);
        assert_eq!(count_films(&[], "Pluto"), 0);
    }

    #[test]
    fn test_search_endpoint_trims_trailing_slash() {
        let counter = SwapiCounter::new("https://swapi.dev/api/");
        assert_eq!(counter.search_endpoint(), "https://swapi.dev/api/planets/");
    }

    #[tokio::test]
    async fn test_count_appearances_from_api() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/planets/")
                .query_param("search", "Tatooine");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "count": 1,
                    "next": null,
                    "results": [{
                        "name": "Tatooine",
                        "climate": "arid",
                        "films": [
                            "https://swapi.dev/api/films/1/",
                            "https://swapi.dev/api/films/3/",
                            "https://swapi.dev/api/films/4/",
                            "https://swapi.dev/api/films/5/",
                            "https://swapi.dev/api/films/6/"
                        ]
                    }]
                }));
        });

        let counter = SwapiCounter::new(server.base_url());
        let count = counter
            .count_appearances(&Context::background(), "Tatooine")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn test_server_error_is_counter_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/planets/");
            then.status(503);
        });

        let counter = SwapiCounter::new(server.base_url());
        let result = counter
            .count_appearances(&Context::background(), "Hoth")
            .await;

        api_mock.assert();
        assert!(matches!(result, Err(StarsError::CounterError { .. })));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/planets/");
            then.status(200).body("<html>oops</html>");
        });

        let counter = SwapiCounter::new(server.base_url());
        let result = counter
            .count_appearances(&Context::background(), "Hoth")
            .await;

        assert!(matches!(result, Err(StarsError::ApiError(_))));
    }
}
