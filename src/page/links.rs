//! External link handling
//!
//! Links in the results window open inside the window by default. Links marked
//! `open-external` are handed to the user's browser instead, but only when they
//! look like ordinary web URLs.

use regex::Regex;
use reqwest::Url;
use tracing::debug;

use crate::page::host::HostCommand;

/// Class marking a link that should open in the browser
pub const OPEN_EXTERNAL_CLASS: &str = "open-external";

/// Decides which clicked links leave the results window
#[derive(Debug, Clone)]
pub struct LinkFilter {
    /// Matches `http://` or `https://` followed by a host character
    web_url_re: Regex,
}

impl LinkFilter {
    pub fn new() -> Self {
        Self {
            web_url_re: Regex::new(r"^https?://[^/]").unwrap(),
        }
    }

    pub fn is_web_url(&self, href: &str) -> bool {
        self.web_url_re.is_match(href)
    }

    /// Host command for a clicked `open-external` link, if it should be opened.
    ///
    /// The URL goes through WHATWG parsing before it reaches the shell, which
    /// does more than percent-encoding: the host is lowercased, a default port
    /// is dropped and an empty path becomes `/`, so `http://ESLint.org` is
    /// opened as `http://eslint.org/`. Path and query case are kept.
    pub fn open_command(&self, href: &str) -> Option<HostCommand> {
        if !self.is_web_url(href) {
            debug!("Not opening {:?}: doesn't look like a normal URL", href);
            return None;
        }

        match Url::parse(href) {
            Ok(url) => Some(HostCommand::OpenExternal(url.into())),
            Err(e) => {
                debug!("Not opening {:?}: {}", href, e);
                None
            }
        }
    }
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::new()
    }
}
