use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ToolError;

pub const DEFAULT_CHUCK_API_BASE_URL: &str = "https://api.chucknorris.io";
pub const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait JokeProvider: Send + Sync {
    async fn random_joke(&self, category: Option<&str>) -> Result<String, ToolError>;
    async fn categories(&self) -> Result<Vec<String>, ToolError>;
}

#[derive(Debug, Deserialize)]
struct RandomJoke {
    value: String,
}

/// Client for the public Chuck Norris joke API.
#[derive(Debug, Clone)]
pub struct ChuckNorrisClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ChuckNorrisClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(OUTBOUND_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl JokeProvider for ChuckNorrisClient {
    async fn random_joke(&self, category: Option<&str>) -> Result<String, ToolError> {
        let mut request = self
            .http_client
            .get(format!("{}/jokes/random", self.base_url));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }

        let joke = request
            .send()
            .await?
            .error_for_status()?
            .json::<RandomJoke>()
            .await?;
        Ok(joke.value)
    }

    async fn categories(&self) -> Result<Vec<String>, ToolError> {
        let categories = self
            .http_client
            .get(format!("{}/jokes/categories", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<String>>()
            .await?;
        Ok(categories)
    }
}
