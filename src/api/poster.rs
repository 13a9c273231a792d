pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Poster";
pub const CARD_FALLBACK_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Poster";

const POSTERS_SEGMENT: &str = "posters/";

pub fn poster_url(base: &str, path: &str) -> String {
    if path.is_empty() || path == "None" {
        return PLACEHOLDER_POSTER.to_string();
    }

    let clean = path.replace('\\', "/");
    if clean.starts_with("http") {
        return clean;
    }
    if clean.starts_with(POSTERS_SEGMENT) {
        return format!("{base}/{clean}");
    }
    format!("{base}/{POSTERS_SEGMENT}{clean}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000";

    #[test]
    fn missing_paths_use_placeholder() {
        assert_eq!(poster_url(BASE, ""), PLACEHOLDER_POSTER);
        assert_eq!(poster_url(BASE, "None"), PLACEHOLDER_POSTER);
    }

    #[test]
    fn absolute_urls_pass_through() {
        let url = "https://image.tmdb.org/t/p/original/abc.jpg";
        assert_eq!(poster_url(BASE, url), url);
    }

    #[test]
    fn posters_segment_is_not_duplicated() {
        assert_eq!(
            poster_url(BASE, "posters/avatar.jpg"),
            "http://localhost:8000/posters/avatar.jpg"
        );
    }

    #[test]
    fn backslashes_are_normalized_before_prefixing() {
        assert_eq!(
            poster_url(BASE, "posters\\anime\\naruto.jpg"),
            "http://localhost:8000/posters/anime/naruto.jpg"
        );
        assert_eq!(
            poster_url(BASE, "anime\\naruto.jpg"),
            "http://localhost:8000/posters/anime/naruto.jpg"
        );
    }

    #[test]
    fn bare_file_names_get_the_posters_route() {
        assert_eq!(
            poster_url(BASE, "inception.jpg"),
            "http://localhost:8000/posters/inception.jpg"
        );
    }

    #[test]
    fn lowercase_none_is_a_real_path() {
        assert_eq!(poster_url(BASE, "none"), "http://localhost:8000/posters/none");
    }
}
