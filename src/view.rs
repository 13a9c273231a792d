use std::fmt::Write;

use crate::api::{CatalogApi, CARD_FALLBACK_POSTER};
use crate::display::{self, Rating};
use crate::hero::{HeroCarousel, HERO_INDICATORS, HERO_THUMBNAILS};
use crate::home::{ActiveView, HomeState};
use crate::models::Title;
use crate::nav::{NavState, NAV_ITEMS};

const BRAND: &str = "WATCHIFY";
const TAGLINE: &str = "Your premium AI-powered entertainment recommendation system. \
Discover movies, TV series, and anime tailored to your taste.";

#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub heading: &'static str,
    pub anchor: Option<&'static str>,
    pub items: &'a [Title],
}

pub fn sections(state: &HomeState, section_size: usize) -> Vec<Section<'_>> {
    let head = |items: &[Title]| items.len().min(section_size);
    let all = if state.is_searching {
        vec![Section {
            heading: "Search Results",
            anchor: None,
            items: &state.search_results[..],
        }]
    } else {
        match &state.active {
            ActiveView::Home => vec![
                Section {
                    heading: "Trending Now",
                    anchor: None,
                    items: &state.trending[..],
                },
                Section {
                    heading: "Recently Watched",
                    anchor: None,
                    items: &state.recently_watched[..],
                },
                Section {
                    heading: "Blockbuster Movies",
                    anchor: ActiveView::Movies.anchor(),
                    items: &state.movies[..head(&state.movies)],
                },
                Section {
                    heading: "Top TV Series",
                    anchor: ActiveView::TvSeries.anchor(),
                    items: &state.tv_shows[..head(&state.tv_shows)],
                },
                Section {
                    heading: "Anime Collection",
                    anchor: ActiveView::Anime.anchor(),
                    items: &state.anime[..head(&state.anime)],
                },
            ],
            ActiveView::Movies => vec![Section {
                heading: "All Movies",
                anchor: None,
                items: &state.movies[..],
            }],
            ActiveView::TvSeries => vec![Section {
                heading: "All TV Series",
                anchor: None,
                items: &state.tv_shows[..],
            }],
            ActiveView::Anime => vec![Section {
                heading: "All Anime",
                anchor: None,
                items: &state.anime[..],
            }],
            ActiveView::Other(_) => Vec::new(),
        }
    };
    all.into_iter().filter(|s| !s.items.is_empty()).collect()
}

pub fn visible_titles<'a>(sections: &[Section<'a>]) -> Vec<&'a Title> {
    sections.iter().flat_map(|s| s.items.iter()).collect()
}

pub fn card_poster(api: &dyn CatalogApi, title: &Title, load_failed: bool) -> String {
    if load_failed {
        CARD_FALLBACK_POSTER.to_string()
    } else {
        api.poster_url(&title.poster_path)
    }
}

pub struct Screen<'a> {
    pub state: &'a HomeState,
    pub nav: &'a NavState,
    pub hero: &'a HeroCarousel,
    pub api: &'a dyn CatalogApi,
    pub section_size: usize,
}

impl<'a> Screen<'a> {
    pub fn sections(&self) -> Vec<Section<'a>> {
        sections(self.state, self.section_size)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_nav(&mut out);
        self.render_hero(&mut out);
        let mut number = 1;
        for section in self.sections() {
            render_section(&mut out, self.api, &section, &mut number);
        }
        let _ = writeln!(out, "\n{BRAND}\n{TAGLINE}");
        out
    }

    fn render_nav(&self, out: &mut String) {
        let active = self.state.active.id();
        let items: Vec<String> = NAV_ITEMS
            .iter()
            .map(|item| {
                if item.id == active {
                    format!("[{}]", item.label)
                } else {
                    item.label.to_string()
                }
            })
            .collect();
        let bar = if self.nav.scrolled { "=" } else { "-" };
        let _ = writeln!(out, "{BRAND}  {}", items.join("  "));
        if self.nav.search_open {
            let _ = writeln!(out, "Search: {}_", self.nav.query);
        }
        if self.nav.mobile_menu_open {
            for item in NAV_ITEMS.iter() {
                let _ = writeln!(out, "  > {}", item.label);
            }
        }
        let _ = writeln!(out, "{}", bar.repeat(60));
    }

    fn render_hero(&self, out: &mut String) {
        let titles = self.state.hero_titles();
        let Some(title) = titles.get(self.hero.index()) else {
            let _ = writeln!(out, "\n{BRAND}\nLoading amazing content...\n");
            return;
        };

        if self.hero.is_fading() {
            let _ = writeln!(out, "\n...\n");
            return;
        }

        let rating = Rating::parse(&title.rating);
        let _ = writeln!(out, "\n{}", display::premiere_tag(title));
        let _ = writeln!(out, "{}", display::headline(title));
        let _ = writeln!(out, "{}", title.year);
        let _ = writeln!(out, "★ {}", rating.fraction());
        let genres = display::hero_genres(&title.genres);
        if !genres.is_empty() {
            let _ = writeln!(out, "{}", genres.join(" | "));
        }
        if !title.plot.is_empty() {
            let _ = writeln!(out, "{}", title.plot);
        }
        let _ = writeln!(out, "Poster: {}", self.api.poster_url(&title.poster_path));
        for thumb in titles.iter().take(HERO_THUMBNAILS) {
            let _ = writeln!(out, "  thumb: {}", self.api.poster_url(&thumb.poster_path));
        }
        let dots: String = (0..titles.len().min(HERO_INDICATORS))
            .map(|i| if i == self.hero.index() { "━━" } else { "·" })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{dots}");
    }
}

fn render_section(out: &mut String, api: &dyn CatalogApi, section: &Section<'_>, number: &mut usize) {
    match section.anchor {
        Some(anchor) => {
            let _ = writeln!(out, "\n## {} #{}", section.heading, anchor);
        }
        None => {
            let _ = writeln!(out, "\n## {}", section.heading);
        }
    }
    for title in section.items {
        let _ = writeln!(out, "{:>3}. {}", number, card_line(title));
        let _ = writeln!(out, "     {}", card_poster(api, title, false));
        *number += 1;
    }
}

pub fn card_line(title: &Title) -> String {
    let rating = Rating::parse(&title.rating);
    let badge = display::genre_badge(&title.genres);
    let mut line = format!("{} ({}) ★ {}", title.name, title.year, rating.score());
    if !badge.is_empty() {
        let _ = write!(line, " [{badge}]");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(names: &[&str]) -> Vec<Title> {
        names
            .iter()
            .map(|n| Title {
                name: n.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn headings(state: &HomeState) -> Vec<&'static str> {
        sections(state, 12).iter().map(|s| s.heading).collect()
    }

    #[test]
    fn home_hides_empty_sections() {
        let state = HomeState {
            trending: titles(&["A", "B"]),
            movies: titles(&["C", "D"]),
            recently_watched: titles(&["C"]),
            ..Default::default()
        };
        assert_eq!(
            headings(&state),
            vec!["Trending Now", "Recently Watched", "Blockbuster Movies"]
        );
    }

    #[test]
    fn home_sections_are_capped() {
        let many: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let names: Vec<&str> = many.iter().map(String::as_str).collect();
        let state = HomeState {
            anime: titles(&names),
            ..Default::default()
        };
        let all = sections(&state, 12);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].heading, "Anime Collection");
        assert_eq!(all[0].anchor, Some("anime-section"));
        assert_eq!(all[0].items.len(), 12);
    }

    #[test]
    fn search_takes_priority_over_category() {
        let state = HomeState {
            movies: titles(&["C"]),
            search_results: titles(&["S"]),
            active: ActiveView::Movies,
            is_searching: true,
            ..Default::default()
        };
        assert_eq!(headings(&state), vec!["Search Results"]);
    }

    #[test]
    fn category_views_show_the_full_list() {
        let many: Vec<String> = (0..15).map(|i| i.to_string()).collect();
        let names: Vec<&str> = many.iter().map(String::as_str).collect();
        let state = HomeState {
            tv_shows: titles(&names),
            active: ActiveView::TvSeries,
            ..Default::default()
        };
        let all = sections(&state, 12);
        assert_eq!(all[0].heading, "All TV Series");
        assert_eq!(all[0].items.len(), 15);
    }

    #[test]
    fn unknown_category_renders_nothing() {
        let state = HomeState {
            trending: titles(&["A"]),
            active: ActiveView::Other("kids".to_string()),
            ..Default::default()
        };
        assert!(sections(&state, 12).is_empty());
    }

    #[test]
    fn card_line_degrades_on_bad_fields() {
        let title = Title {
            name: "Dune".to_string(),
            year: "2021".to_string(),
            rating: "8.0/10".to_string(),
            genres: "Sci-Fi, Adventure".to_string(),
            ..Default::default()
        };
        assert_eq!(card_line(&title), "Dune (2021) ★ 8.0 [Sci-Fi]");

        let bare = Title {
            name: "Mystery".to_string(),
            ..Default::default()
        };
        assert_eq!(card_line(&bare), "Mystery () ★ N/A");
    }

    #[test]
    fn visible_titles_follow_section_order() {
        let state = HomeState {
            trending: titles(&["A"]),
            movies: titles(&["B", "C"]),
            ..Default::default()
        };
        let all = sections(&state, 12);
        let names: Vec<_> = visible_titles(&all).iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
