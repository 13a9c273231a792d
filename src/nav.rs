pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem { id: "home", label: "Home" },
    NavItem { id: "movies", label: "Movies" },
    NavItem { id: "tv-series", label: "TV Series" },
    NavItem { id: "anime", label: "Anime" },
];

#[derive(Debug, Clone, Default)]
pub struct NavState {
    pub search_open: bool,
    pub mobile_menu_open: bool,
    pub scrolled: bool,
    pub query: String,
}

impl NavState {
    pub fn toggle_search(&mut self) {
        self.search_open = !self.search_open;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn on_scroll(&mut self, offset: u32) {
        self.scrolled = offset > 0;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query.clear();
        self.query.push_str(query);
    }
}
