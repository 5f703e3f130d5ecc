//! # Music links
//!
//! Turns a pasted Spotify, YouTube or YouTube Music link into the URL of its
//! embeddable player.
//!
//! | Input | Embed URL |
//! |-------|-----------|
//! | `open.spotify.com/playlist/ID` | `open.spotify.com/embed/playlist/ID` |
//! | any link with a `list` query parameter | `youtube.com/embed/videoseries?list=ID&autoplay=1` |
//! | `youtube.com/watch?v=ID`, `youtu.be/ID` | `youtube.com/embed/ID?autoplay=1` |

use thiserror::Error;
use url::Url;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaLinkError {
    #[error("Please paste a valid YouTube or Spotify link")]
    InvalidUrl,
}

/// Build the embeddable player URL for a pasted music link.
pub fn embed_url(input: &str) -> Result<String, MediaLinkError> {
    let url = Url::parse(input.trim()).map_err(|_| MediaLinkError::InvalidUrl)?;

    let is_spotify = url
        .host_str()
        .is_some_and(|host| host == "spotify.com" || host.ends_with(".spotify.com"));
    if is_spotify {
        return Ok(spotify_embed(url));
    }

    if let Some(list) = query_value(&url, "list") {
        return Ok(format!("{YOUTUBE_EMBED}/videoseries?list={list}&autoplay=1"));
    }

    let video = query_value(&url, "v")
        .or_else(|| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(str::to_string)
        })
        .filter(|id| !id.is_empty())
        .ok_or(MediaLinkError::InvalidUrl)?;
    Ok(format!("{YOUTUBE_EMBED}/{video}?autoplay=1"))
}

fn spotify_embed(mut url: Url) -> String {
    if !url.path().starts_with("/embed/") {
        let path = format!("/embed{}", url.path());
        url.set_path(&path);
    }
    url.to_string()
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}
