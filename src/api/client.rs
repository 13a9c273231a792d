use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{poster_url, CatalogApi};
use crate::config::Config;
use crate::models::{ApiStatus, Category, RefreshStatus, Title, TitlePage};

#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &Config) -> Result<Self> {
        let user_agent = format!("watchify/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .context("Failed to build catalog HTTP client")?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn poster_loads(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(res) => res.status().is_success(),
            Err(e) => {
                debug!(url = %url, "Poster request failed: {}", e);
                false
            }
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str, failure: &str) -> Result<T> {
        debug!(url = %url, "GET");
        let res = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("{failure}: request failed"))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .with_context(|| format!("{failure}: reading body failed"))?;
        if !status.is_success() {
            return Err(anyhow!("{} (status {}): {}", failure, status, text));
        }
        let parsed: T = serde_json::from_str(&text)
            .with_context(|| format!("{failure}: JSON parse failed"))?;
        Ok(parsed)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_titles(
        &self,
        category: Option<&Category>,
        page: u32,
        limit: u32,
    ) -> Result<TitlePage> {
        let mut url = format!("{}/titles?page={page}&limit={limit}", self.base_url);
        if let Some(category) = category {
            url.push_str("&category=");
            url.push_str(&urlencoding::encode(category.as_api()));
        }
        self.get_json(&url, "Failed to fetch titles").await
    }

    async fn fetch_trending(&self, count: usize) -> Result<Vec<Title>> {
        let url = format!("{}/trending?count={count}", self.base_url);
        self.get_json(&url, "Failed to fetch trending").await
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<Title>> {
        let url = format!(
            "{}/search?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        self.get_json(&url, "Failed to search titles").await
    }

    async fn get_recommendations(
        &self,
        name: &str,
        category: Option<&Category>,
    ) -> Result<Vec<Title>> {
        let mut url = format!("{}/recommend/{}", self.base_url, urlencoding::encode(name));
        if let Some(category) = category {
            url.push_str("?category=");
            url.push_str(&urlencoding::encode(category.as_api()));
        }
        self.get_json(&url, "Failed to get recommendations").await
    }

    async fn status(&self) -> Result<ApiStatus> {
        let url = format!("{}/", self.base_url);
        self.get_json(&url, "Failed to fetch API status").await
    }

    async fn refresh(&self) -> Result<RefreshStatus> {
        let url = format!("{}/refresh", self.base_url);
        self.get_json(&url, "Failed to refresh catalog").await
    }

    fn poster_url(&self, path: &str) -> String {
        poster_url(&self.base_url, path)
    }
}
