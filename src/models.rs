use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Title {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Year", default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(rename = "Rating", default, deserialize_with = "lenient_string")]
    pub rating: String,
    #[serde(rename = "Genres", default)]
    pub genres: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Poster_Path", default)]
    pub poster_path: String,
    #[serde(rename = "Source_URL", default)]
    pub source_url: String,
    #[serde(rename = "Category", default)]
    pub category: String,
}

impl Title {
    pub fn kind(&self) -> Category {
        Category::parse(&self.category)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TitlePage {
    #[serde(default)]
    pub titles: Vec<Title>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiStatus {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshStatus {
    pub status: String,
}

impl RefreshStatus {
    pub fn succeeded(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Movie,
    TvShow,
    Anime,
    Other(String),
}

impl Category {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "movie" => Category::Movie,
            "tv show" => Category::TvShow,
            "anime" => Category::Anime,
            _ => Category::Other(raw.to_string()),
        }
    }

    pub fn as_api(&self) -> &str {
        match self {
            Category::Movie => "Movie",
            Category::TvShow => "TV Show",
            Category::Anime => "Anime",
            Category::Other(s) => s,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api())
    }
}

// The backend fills missing cells with "None" but numeric columns can still
// come through as JSON numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}
