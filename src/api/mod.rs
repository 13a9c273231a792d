use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ApiStatus, Category, RefreshStatus, Title, TitlePage};

mod client;
mod poster;

pub use client::CatalogClient;
pub use poster::{poster_url, CARD_FALLBACK_POSTER, PLACEHOLDER_POSTER};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_titles(
        &self,
        category: Option<&Category>,
        page: u32,
        limit: u32,
    ) -> Result<TitlePage>;
    async fn fetch_trending(&self, count: usize) -> Result<Vec<Title>>;
    async fn search_titles(&self, query: &str) -> Result<Vec<Title>>;
    async fn get_recommendations(
        &self,
        name: &str,
        category: Option<&Category>,
    ) -> Result<Vec<Title>>;
    async fn status(&self) -> Result<ApiStatus>;
    async fn refresh(&self) -> Result<RefreshStatus>;
    fn poster_url(&self, path: &str) -> String;
}
