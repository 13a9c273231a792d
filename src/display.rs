use crate::models::Title;

pub const NOT_AVAILABLE: &str = "N/A";
const DEFAULT_SCALE: &str = "10";
pub const HERO_GENRES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating<'a> {
    raw: &'a str,
}

impl<'a> Rating<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self { raw }
    }

    pub fn score(&self) -> &'a str {
        if self.raw.is_empty() {
            return NOT_AVAILABLE;
        }
        let score = self.raw.split('/').next().unwrap_or_default().trim();
        if score.is_empty() {
            NOT_AVAILABLE
        } else {
            score
        }
    }

    pub fn scale(&self) -> Option<&'a str> {
        if self.raw.is_empty() {
            return Some(DEFAULT_SCALE);
        }
        let (_, scale) = self.raw.split_once('/')?;
        let scale = scale.split('/').next().unwrap_or_default().trim();
        (!scale.is_empty()).then_some(scale)
    }

    pub fn fraction(&self) -> String {
        match self.scale() {
            Some(scale) => format!("{} / {}", self.score(), scale),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }
}

pub fn genres(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect()
}

pub fn genre_badge(raw: &str) -> &str {
    genres(raw).into_iter().next().unwrap_or_default()
}

pub fn hero_genres(raw: &str) -> Vec<&str> {
    let mut all = genres(raw);
    all.truncate(HERO_GENRES);
    all
}

pub fn headline(title: &Title) -> String {
    title.name.to_uppercase()
}

pub fn premiere_tag(title: &Title) -> String {
    format!("{} Premiere", title.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_splits_on_slash() {
        let r = Rating::parse("8.5/10");
        assert_eq!(r.score(), "8.5");
        assert_eq!(r.scale(), Some("10"));
        assert_eq!(r.fraction(), "8.5 / 10");
    }

    #[test]
    fn rating_without_slash_has_no_fraction() {
        let r = Rating::parse("8.5");
        assert_eq!(r.score(), "8.5");
        assert_eq!(r.scale(), None);
        assert_eq!(r.fraction(), "N/A");
        assert_eq!(r.raw(), "8.5");
    }

    #[test]
    fn empty_rating_is_not_available_out_of_ten() {
        let r = Rating::parse("");
        assert_eq!(r.score(), "N/A");
        assert_eq!(r.fraction(), "N/A / 10");
    }

    #[test]
    fn rating_with_blank_parts() {
        assert_eq!(Rating::parse(" /5").score(), "N/A");
        assert_eq!(Rating::parse("7/ ").scale(), None);
        assert_eq!(Rating::parse(" 7 / 5 ").fraction(), "7 / 5");
    }

    #[test]
    fn genres_are_trimmed_and_capped_for_hero() {
        let raw = "Action, Adventure ,Sci-Fi, Drama";
        assert_eq!(genre_badge(raw), "Action");
        assert_eq!(hero_genres(raw), vec!["Action", "Adventure", "Sci-Fi"]);
        assert_eq!(genre_badge(""), "");
        assert!(hero_genres(" , ").is_empty());
    }

    #[test]
    fn headline_is_uppercase() {
        let title = Title {
            name: "Spirited Away".to_string(),
            category: "Anime".to_string(),
            ..Default::default()
        };
        assert_eq!(headline(&title), "SPIRITED AWAY");
        assert_eq!(premiere_tag(&title), "Anime Premiere");
    }
}
