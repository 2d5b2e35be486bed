// src/app/api.rs
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::app::types::Character;

/// Failure of the character fetch: transport (connect, timeout, body read),
/// a non-success HTTP status, or a body that doesn't parse. No retry at this
/// layer; callers surface all three the same way.
#[derive(Debug)]
pub enum FetchError {
    Transport(reqwest::Error),
    Status(StatusCode),
    Decode(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Decode(e) => write!(f, "decode: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}

/// Response envelope: the character list lives under `data`.
#[derive(Debug, Deserialize)]
struct CharactersPage {
    #[serde(default)]
    data: Vec<Character>,
}

/// Fetch one page of characters. Blocking; callers run this off the UI
/// thread and hand the result back over a channel.
pub fn fetch_characters_page(
    api_base: &str,
    page: u32,
    timeout: Duration,
) -> Result<Vec<Character>, FetchError> {
    let url = format!("{api_base}/character?page={page}");
    info!("GET {url}");

    let client = Client::builder()
        .user_agent("reelpick/fetch")
        .timeout(timeout)
        .build()?;

    let resp = client.get(&url).send()?;
    if !resp.status().is_success() {
        return Err(FetchError::Status(resp.status()));
    }

    let body = resp.text()?;
    let parsed: CharactersPage = serde_json::from_str(&body).map_err(FetchError::Decode)?;

    info!("fetched {} characters", parsed.data.len());
    Ok(parsed.data)
}

#[cfg(test)]
mod tests {
    use super::CharactersPage;

    #[test]
    fn parses_full_record() {
        let body = r#"{
            "info": {"count": 1},
            "data": [{
                "name": "Mickey Mouse",
                "imageUrl": "https://img.example/mickey.png",
                "films": ["Fantasia"],
                "tvShows": ["Mickey Mouse Clubhouse"],
                "shortFilms": ["Steamboat Willie"],
                "parkAttractions": ["Mickey's PhilharMagic"]
            }]
        }"#;
        let page: CharactersPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.data.len(), 1);
        let ch = &page.data[0];
        assert_eq!(ch.name, "Mickey Mouse");
        assert_eq!(ch.films, vec!["Fantasia"]);
        assert_eq!(ch.tv_shows, vec!["Mickey Mouse Clubhouse"]);
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let body = r#"{"data": [{"name": "Nameless Extra"}]}"#;
        let page: CharactersPage = serde_json::from_str(body).unwrap();
        let ch = &page.data[0];
        assert!(ch.image_url.is_none());
        assert!(ch.films.is_empty());
        assert!(ch.park_attractions.is_empty());
    }

    #[test]
    fn tolerates_missing_data_field() {
        let page: CharactersPage = serde_json::from_str(r#"{"info": {}}"#).unwrap();
        assert!(page.data.is_empty());
    }
}
