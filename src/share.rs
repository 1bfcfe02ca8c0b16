use std::str::FromStr;

use serde::Serialize;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use worker::Url;

pub const SHARE_MESSAGE: &str = "Send me anonymous feedback!";
pub const COPY_NOTICE: &str = "Link copied to clipboard!";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Twitter,
    Facebook,
    LinkedIn,
    Copy,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 4] = [
        SharePlatform::Twitter,
        SharePlatform::Facebook,
        SharePlatform::LinkedIn,
        SharePlatform::Copy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SharePlatform::Twitter => "twitter",
            SharePlatform::Facebook => "facebook",
            SharePlatform::LinkedIn => "linkedin",
            SharePlatform::Copy => "copy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SharePlatform::Twitter => "Share on X",
            SharePlatform::Facebook => "Share on Facebook",
            SharePlatform::LinkedIn => "Share on LinkedIn",
            SharePlatform::Copy => "Copy link",
        }
    }
}

impl FromStr for SharePlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SharePlatform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == s)
            .ok_or_else(|| format!("unknown share platform: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ShareAction {
    /// Open the intent URL in a new browser context.
    OpenWindow { url: String },
    /// Put the page URL on the clipboard and show the notice.
    CopyLink { url: String, notice: &'static str },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShareMenu {
    open: bool,
}

impl ShareMenu {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Picks a platform for `page_url` and closes the menu.
    pub fn select(&mut self, platform: SharePlatform, page_url: &Url) -> ShareAction {
        self.open = false;
        share_action(platform, page_url)
    }
}

pub fn share_action(platform: SharePlatform, page_url: &Url) -> ShareAction {
    let page = encode(page_url.as_str());
    let url = match platform {
        SharePlatform::Twitter => format!(
            "https://twitter.com/intent/tweet?url={page}&text={}",
            encode(SHARE_MESSAGE)
        ),
        SharePlatform::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={page}"),
        SharePlatform::LinkedIn => {
            format!("https://www.linkedin.com/sharing/share-offsite/?url={page}")
        }
        SharePlatform::Copy => {
            return ShareAction::CopyLink {
                url: page_url.to_string(),
                notice: COPY_NOTICE,
            }
        }
    };

    ShareAction::OpenWindow { url }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// The canonical URL of a user's feedback page, without query or fragment.
pub fn page_url(origin: &Url, username: &str) -> Url {
    let mut url = origin.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push("feedback").push(username);
    }
    url
}
