use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::api::{CatalogApi, DEFAULT_PAGE};
use crate::config::Config;
use crate::models::{Category, Title};

pub const HERO_FALLBACK_MOVIES: usize = 8;
pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Home,
    Movies,
    TvSeries,
    Anime,
    Other(String),
}

impl ActiveView {
    pub fn from_id(id: &str) -> Self {
        match id {
            "home" => ActiveView::Home,
            "movies" => ActiveView::Movies,
            "tv-series" => ActiveView::TvSeries,
            "anime" => ActiveView::Anime,
            other => ActiveView::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ActiveView::Home => "home",
            ActiveView::Movies => "movies",
            ActiveView::TvSeries => "tv-series",
            ActiveView::Anime => "anime",
            ActiveView::Other(id) => id,
        }
    }

    pub fn anchor(&self) -> Option<&'static str> {
        match self {
            ActiveView::Movies => Some("movies-section"),
            ActiveView::TvSeries => Some("tv-section"),
            ActiveView::Anime => Some("anime-section"),
            ActiveView::Home | ActiveView::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollRequest {
    Top,
    Anchor(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTicket {
    Cleared,
    /// A request must be issued; its response is only applied if `seq` is
    /// still the latest when it arrives.
    Issued { seq: u64, query: String },
}

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub trending: Vec<Title>,
    pub movies: Vec<Title>,
    pub tv_shows: Vec<Title>,
    pub anime: Vec<Title>,
    pub recently_watched: Vec<Title>,
    pub search_results: Vec<Title>,
    pub active: ActiveView,
    pub is_searching: bool,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl HomeState {
    pub fn hero_titles(&self) -> &[Title] {
        if !self.trending.is_empty() {
            &self.trending
        } else {
            let end = self.movies.len().min(HERO_FALLBACK_MOVIES);
            &self.movies[..end]
        }
    }
}

pub struct HomePage {
    api: Arc<dyn CatalogApi>,
    section_size: usize,
    state: HomeState,
    search_seq: u64,
}

impl HomePage {
    pub fn new(api: Arc<dyn CatalogApi>, config: &Config) -> Self {
        Self {
            api,
            section_size: config.section_size,
            state: HomeState::default(),
            search_seq: 0,
        }
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    pub fn api(&self) -> Arc<dyn CatalogApi> {
        Arc::clone(&self.api)
    }

    pub fn section_size(&self) -> usize {
        self.section_size
    }

    /// Fetches every home slice concurrently. A failed fetch leaves its slice
    /// empty without affecting the others.
    pub async fn load<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        info!("Starting catalog fetch");
        let size = self.section_size;
        let limit = u32::try_from(size).unwrap_or(u32::MAX);
        let (movie, tv, anime) = (Category::Movie, Category::TvShow, Category::Anime);

        let (trending, movies, tv_shows, anime_page) = tokio::join!(
            self.api.fetch_trending(size),
            self.api.fetch_titles(Some(&movie), DEFAULT_PAGE, limit),
            self.api.fetch_titles(Some(&tv), DEFAULT_PAGE, limit),
            self.api.fetch_titles(Some(&anime), DEFAULT_PAGE, limit),
        );

        let trending = settle("trending", trending);
        let movies = settle("movies", movies.map(|p| p.titles));
        let tv_shows = settle("tv shows", tv_shows.map(|p| p.titles));
        let anime = settle("anime", anime_page.map(|p| p.titles));

        info!(
            trending = trending.len(),
            movies = movies.len(),
            tv_shows = tv_shows.len(),
            anime = anime.len(),
            "Catalog fetch complete"
        );

        self.state.recently_watched = sample_recently_watched(&movies, &tv_shows, size, rng);
        self.state.trending = trending;
        self.state.movies = movies;
        self.state.tv_shows = tv_shows;
        self.state.anime = anime;
        self.state.loaded_at = Some(Utc::now());

        if let Some(first) = self.state.trending.first() {
            info!("Hero starts on trending title '{}'", first.name);
        } else if let Some(first) = self.state.movies.first() {
            info!("Hero starts on movie '{}'", first.name);
        } else {
            warn!("No titles found for the hero banner");
        }
    }

    pub fn select_category(&mut self, id: &str) -> Option<ScrollRequest> {
        let view = ActiveView::from_id(id);
        debug!(category = %id, "Category selected");
        self.state.is_searching = false;
        // In-flight searches belong to the mode being left.
        self.search_seq += 1;
        let anchor = view.anchor();
        self.state.active = view;
        anchor.map(ScrollRequest::Anchor)
    }

    pub fn select_title(&self, title: &Title) -> ScrollRequest {
        debug!(title = %title.name, "Title selected");
        ScrollRequest::Top
    }

    pub fn begin_search(&mut self, query: &str) -> SearchTicket {
        self.search_seq += 1;
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            self.state.is_searching = false;
            self.state.search_results.clear();
            return SearchTicket::Cleared;
        }
        self.state.is_searching = true;
        SearchTicket::Issued {
            seq: self.search_seq,
            query: query.to_string(),
        }
    }

    pub fn finish_search(&mut self, seq: u64, outcome: Result<Vec<Title>>) -> bool {
        if seq != self.search_seq {
            debug!(
                seq,
                latest = self.search_seq,
                "Discarding stale search response"
            );
            return false;
        }
        match outcome {
            Ok(results) => {
                debug!(results = results.len(), "Search results applied");
                self.state.search_results = results;
                true
            }
            Err(e) => {
                error!("Search error: {:#}", e);
                false
            }
        }
    }

    pub async fn search(&mut self, query: &str) {
        if let SearchTicket::Issued { seq, query } = self.begin_search(query) {
            let outcome = self.api.search_titles(&query).await;
            self.finish_search(seq, outcome);
        }
    }
}

fn settle<T: Default>(slice: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("Fetching {} failed, showing it empty: {:#}", slice, e);
        T::default()
    })
}

pub fn sample_recently_watched<R: Rng + ?Sized>(
    movies: &[Title],
    tv_shows: &[Title],
    count: usize,
    rng: &mut R,
) -> Vec<Title> {
    let mut pool: Vec<Title> = movies.iter().chain(tv_shows).cloned().collect();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn titles(names: &[&str]) -> Vec<Title> {
        names
            .iter()
            .map(|n| Title {
                name: n.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn view_ids_round_trip_and_map_to_anchors() {
        for id in ["home", "movies", "tv-series", "anime"] {
            assert_eq!(ActiveView::from_id(id).id(), id);
        }
        assert_eq!(ActiveView::Movies.anchor(), Some("movies-section"));
        assert_eq!(ActiveView::TvSeries.anchor(), Some("tv-section"));
        assert_eq!(ActiveView::Anime.anchor(), Some("anime-section"));
        assert_eq!(ActiveView::Home.anchor(), None);
        assert_eq!(ActiveView::from_id("kids").anchor(), None);
    }

    #[test]
    fn sample_is_drawn_from_movies_and_tv_only() {
        let movies = titles(&["A", "B", "C"]);
        let tv = titles(&["D", "E"]);
        let mut rng = StdRng::seed_from_u64(7);
        let sample = sample_recently_watched(&movies, &tv, 12, &mut rng);
        assert_eq!(sample.len(), 5);
        let mut names: Vec<_> = sample.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn sample_is_capped_and_reproducible_with_a_seed() {
        let movies = titles(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
        let tv = titles(&["11", "12", "13", "14", "15"]);
        let first = sample_recently_watched(&movies, &tv, 12, &mut StdRng::seed_from_u64(42));
        let second = sample_recently_watched(&movies, &tv, 12, &mut StdRng::seed_from_u64(42));
        assert_eq!(first.len(), 12);
        assert_eq!(first, second);
    }

    #[test]
    fn hero_falls_back_to_first_movies() {
        let mut state = HomeState {
            movies: titles(&["1", "2", "3", "4", "5", "6", "7", "8", "9"]),
            ..Default::default()
        };
        assert_eq!(state.hero_titles().len(), 8);
        state.trending = titles(&["T"]);
        assert_eq!(state.hero_titles()[0].name, "T");
    }
}
