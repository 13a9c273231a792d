//! Fetch one page of titles and print every record property with how many
//! records carry a usable value for it. Spots CSV columns the client ignores.
//! Uses WATCHIFY_API_URL from the environment (.env supported).
//! Usage: cargo run --bin catalog_props -- [category]

use anyhow::{Context, Result};
use dotenvy::dotenv;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use watchify::api::{DEFAULT_LIMIT, DEFAULT_PAGE};
use watchify::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present for local runs.
    dotenv().ok();

    let config = Config::from_env()?;
    let category = env::args().nth(1);

    let mut url = format!(
        "{}/titles?page={}&limit={}",
        config.api_base_url, DEFAULT_PAGE, DEFAULT_LIMIT
    );
    if let Some(category) = category.as_deref() {
        url.push_str(&format!("&category={}", urlencoding::encode(category)));
    }

    let response = Client::new()
        .get(&url)
        .send()
        .await
        .context("Failed to call catalog API")?
        .error_for_status()
        .context("Catalog API returned an error status")?;

    let body: Value = response.json().await.context("Failed to parse catalog response")?;
    let titles = body
        .get("titles")
        .and_then(|v| v.as_array())
        .context("No titles array found in catalog response")?;

    let mut filled: BTreeMap<String, usize> = BTreeMap::new();
    for record in titles.iter().filter_map(|t| t.as_object()) {
        for (name, value) in record {
            let usable = match value {
                Value::Null => false,
                Value::String(s) => !s.is_empty() && s != "None",
                _ => true,
            };
            let count = filled.entry(name.clone()).or_insert(0);
            if usable {
                *count += 1;
            }
        }
    }

    println!("{} records from {}", titles.len(), url);
    for (name, count) in filled {
        println!("{name}: {count}");
    }

    Ok(())
}
