use crate::error::SummaryError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;

const WATCH_URL: &str = "https://www.youtube.com/watch";

static MOVIE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// A YouTube video identifier.
///
/// Only ASCII letters, digits, `-` and `_` are accepted, so the id is also
/// safe to use as part of a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovieId(String);

impl MovieId {
    /// Parses a bare id or extracts it from a YouTube link.
    ///
    /// Supported links are `youtube.com/watch?v=<id>`, `youtu.be/<id>` and
    /// relative `/watch?v=<id>` paths.
    pub fn parse(input: &str) -> Result<Self, SummaryError> {
        let input = input.trim();
        let candidate = if MOVIE_ID_RE.is_match(input) {
            Some(input.to_string())
        } else {
            id_from_link(input)
        };

        match candidate {
            Some(id) if MOVIE_ID_RE.is_match(&id) => Ok(Self(id)),
            _ => Err(SummaryError::InvalidMovieId(input.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical watch page for this video, sent as the request locator.
    pub fn watch_url(&self) -> String {
        let mut url = Url::parse(WATCH_URL).expect("static watch URL is valid");
        url.query_pairs_mut().append_pair("v", &self.0);
        url.to_string()
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn id_from_link(input: &str) -> Option<String> {
    let url = match Url::parse(input) {
        Ok(url) => url,
        // Relative links such as `/watch?v=...`.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("https://www.youtube.com/").ok()?.join(input).ok()?
        }
        Err(_) => return None,
    };

    let host = url.host_str().unwrap_or_default();
    if host == "youtu.be" {
        return url
            .path_segments()?
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);
    }

    if host == "youtube.com" || host.ends_with(".youtube.com") {
        if url.path() != "/watch" {
            return None;
        }
        return url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());
    }

    None
}
