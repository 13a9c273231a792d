use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, info};

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::hero::HeroCarousel;
use crate::home::{HomePage, ScrollRequest, SearchTicket};
use crate::models::Title;
use crate::nav::NavState;
use crate::view::{sections, visible_titles, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Input(String),
    Category(String),
    Select(usize),
    Scroll(u32),
    ToggleSearch,
    ToggleMenu,
    HeroNext,
    HeroPrev,
    HeroJump(usize),
    Quit,
}

impl UiEvent {
    /// Parses one line of terminal input. Lines starting with `:` are
    /// commands; anything else replaces the search box contents.
    pub fn from_line(line: &str) -> Option<Self> {
        let Some(command) = line.strip_prefix(':') else {
            return Some(UiEvent::Input(line.to_string()));
        };
        let mut parts = command.split_whitespace();
        let name = parts.next()?;
        let arg = parts.next();
        let event = match name {
            "q" | "quit" => UiEvent::Quit,
            "home" | "movies" | "tv-series" | "anime" => UiEvent::Category(name.to_string()),
            "category" => UiEvent::Category(arg?.to_string()),
            "select" | "s" => UiEvent::Select(arg?.parse().ok()?),
            "scroll" => UiEvent::Scroll(arg?.parse().ok()?),
            "search" => UiEvent::ToggleSearch,
            "menu" => UiEvent::ToggleMenu,
            "next" => UiEvent::HeroNext,
            "prev" => UiEvent::HeroPrev,
            "hero" => UiEvent::HeroJump(arg?.parse().ok()?),
            _ => return None,
        };
        Some(event)
    }
}

pub trait Frontend: Send {
    fn present(&mut self, screen: &Screen<'_>);
    fn scroll_to(&mut self, request: &ScrollRequest);
}

struct SearchDone {
    seq: u64,
    outcome: Result<Vec<Title>>,
}

pub struct Session {
    page: HomePage,
    nav: NavState,
    hero: HeroCarousel,
    rng: StdRng,
    search_debounce: Duration,
    hero_rotate_every: Duration,
    hero_fade: Duration,
}

impl Session {
    pub fn new(page: HomePage, config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            page,
            nav: NavState::default(),
            hero: HeroCarousel::default(),
            rng,
            search_debounce: config.search_debounce,
            hero_rotate_every: config.hero_rotate_every,
            hero_fade: config.hero_fade,
        }
    }

    pub fn page(&self) -> &HomePage {
        &self.page
    }

    pub fn hero(&self) -> &HeroCarousel {
        &self.hero
    }

    pub async fn run<F: Frontend>(
        mut self,
        mut events: mpsc::Receiver<UiEvent>,
        mut frontend: F,
    ) -> (Self, F) {
        self.page.load(&mut self.rng).await;
        self.hero.set_len(self.page.state().hero_titles().len());
        self.present(&mut frontend);

        let (debouncer, mut queries) = Debouncer::spawn(self.search_debounce);
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<SearchDone>();

        let rotation = sleep(self.hero_rotate_every);
        tokio::pin!(rotation);
        let mut rotation_armed = self.hero.rotates();
        let mut fade_at: Option<Instant> = None;

        loop {
            let fade = async move {
                match fade_at {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    if event == UiEvent::Quit {
                        break;
                    }
                    let fading_before = self.hero.is_fading();
                    self.handle_event(event, &debouncer, &mut frontend);
                    if self.hero.is_fading() && !fading_before {
                        fade_at = Some(Instant::now() + self.hero_fade);
                    }
                    self.present(&mut frontend);
                }
                Some(query) = queries.recv() => {
                    self.dispatch_search(query, &done_tx);
                    self.present(&mut frontend);
                }
                Some(done) = done_rx.recv() => {
                    if self.page.finish_search(done.seq, done.outcome) {
                        self.present(&mut frontend);
                    }
                }
                _ = &mut rotation, if rotation_armed => {
                    rotation_armed = false;
                    if self.hero.next() {
                        fade_at = Some(Instant::now() + self.hero_fade);
                        self.present(&mut frontend);
                    }
                }
                _ = fade => {
                    fade_at = None;
                    let moved = self.hero.settle();
                    // Only an index change restarts the rotation period.
                    if moved || !rotation_armed {
                        rotation.as_mut().reset(Instant::now() + self.hero_rotate_every);
                        rotation_armed = self.hero.rotates();
                    }
                    self.present(&mut frontend);
                }
            }
        }

        info!("Session ended");
        (self, frontend)
    }

    fn handle_event<F: Frontend>(
        &mut self,
        event: UiEvent,
        debouncer: &Debouncer<String>,
        frontend: &mut F,
    ) {
        match event {
            UiEvent::Input(text) => {
                self.nav.set_query(&text);
                debouncer.push(text);
            }
            UiEvent::Category(id) => {
                if let Some(request) = self.page.select_category(&id) {
                    frontend.scroll_to(&request);
                }
            }
            UiEvent::Select(number) => {
                let shown = sections(self.page.state(), self.page.section_size());
                let picked = number
                    .checked_sub(1)
                    .and_then(|i| visible_titles(&shown).get(i).copied().cloned());
                match picked {
                    Some(title) => frontend.scroll_to(&self.page.select_title(&title)),
                    None => debug!(number, "No card with that number"),
                }
            }
            UiEvent::Scroll(offset) => self.nav.on_scroll(offset),
            UiEvent::ToggleSearch => self.nav.toggle_search(),
            UiEvent::ToggleMenu => self.nav.toggle_mobile_menu(),
            UiEvent::HeroNext => {
                self.hero.next();
            }
            UiEvent::HeroPrev => {
                self.hero.prev();
            }
            UiEvent::HeroJump(target) => {
                self.hero.jump(target);
            }
            UiEvent::Quit => {}
        }
    }

    fn dispatch_search(&mut self, query: String, done: &mpsc::UnboundedSender<SearchDone>) {
        match self.page.begin_search(&query) {
            SearchTicket::Cleared => debug!("Search cleared"),
            SearchTicket::Issued { seq, query } => {
                debug!(seq, query = %query, "Issuing search");
                let api = self.page.api();
                let done = done.clone();
                tokio::spawn(async move {
                    let outcome = api.search_titles(&query).await;
                    let _ = done.send(SearchDone { seq, outcome });
                });
            }
        }
    }

    fn present<F: Frontend>(&self, frontend: &mut F) {
        let api = self.page.api();
        let screen = Screen {
            state: self.page.state(),
            nav: &self.nav,
            hero: &self.hero,
            api: api.as_ref(),
            section_size: self.page.section_size(),
        };
        frontend.present(&screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_search_input() {
        assert_eq!(
            UiEvent::from_line("star wars"),
            Some(UiEvent::Input("star wars".to_string()))
        );
        assert_eq!(UiEvent::from_line(""), Some(UiEvent::Input(String::new())));
    }

    #[test]
    fn colon_commands() {
        assert_eq!(UiEvent::from_line(":q"), Some(UiEvent::Quit));
        assert_eq!(
            UiEvent::from_line(":tv-series"),
            Some(UiEvent::Category("tv-series".to_string()))
        );
        assert_eq!(
            UiEvent::from_line(":category kids"),
            Some(UiEvent::Category("kids".to_string()))
        );
        assert_eq!(UiEvent::from_line(":select 4"), Some(UiEvent::Select(4)));
        assert_eq!(UiEvent::from_line(":hero 2"), Some(UiEvent::HeroJump(2)));
        assert_eq!(UiEvent::from_line(":next"), Some(UiEvent::HeroNext));
    }

    #[test]
    fn malformed_commands_are_rejected() {
        assert_eq!(UiEvent::from_line(":select"), None);
        assert_eq!(UiEvent::from_line(":select x"), None);
        assert_eq!(UiEvent::from_line(":"), None);
        assert_eq!(UiEvent::from_line(":dance"), None);
    }
}
