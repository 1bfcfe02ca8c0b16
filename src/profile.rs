use serde::Deserialize;
use tracing::{debug, info, warn};
use worker::{Fetch, Method, Request, RequestInit, Url};

use crate::error::ProfileError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Rejects an empty username and drops a blank avatar URL.
    pub fn validated(self) -> Result<Self, ProfileError> {
        if self.username.trim().is_empty() {
            return Err(ProfileError::InvalidProfile("empty username".to_string()));
        }

        let avatar_url = self.avatar_url.filter(|url| !url.trim().is_empty());
        Ok(Self {
            username: self.username,
            avatar_url,
        })
    }

    /// First letter of the username, uppercased, for the avatar fallback.
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

pub trait ProfileSource {
    async fn fetch_profile(&self, username: &str) -> Result<UserProfile, ProfileError>;
}

/// Profile lookups against the public users API.
pub struct HttpProfileSource {
    api_base: String,
}

impl HttpProfileSource {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

impl ProfileSource for HttpProfileSource {
    async fn fetch_profile(&self, username: &str) -> Result<UserProfile, ProfileError> {
        info!("fetch_profile start: username={}", username);
        let url = profile_url(&self.api_base, username)?;
        debug!("fetch_profile: url={}", url);

        let mut init = RequestInit::new();
        init.with_method(Method::Get);

        let mut request = Request::new_with_init(url.as_str(), &init)?;
        let headers = request.headers_mut()?;
        headers.set("User-Agent", "feedbackgrove")?;
        headers.set("Accept", "application/json")?;

        let mut response = Fetch::Request(request).send().await?;
        let status = response.status_code();
        if let Err(err) = check_status(status) {
            warn!("profile API error: username={} status={}", username, status);
            return Err(err);
        }

        let body = response.text().await?;
        let profile = parse_profile(&body)?;
        info!("fetch_profile done: username={}", profile.username);
        Ok(profile)
    }
}

/// `{api_base}/users/{username}` with the username percent-encoded as a
/// single path segment.
pub fn profile_url(api_base: &str, username: &str) -> Result<Url, ProfileError> {
    let mut url = Url::parse(api_base)
        .map_err(|err| ProfileError::Network(format!("bad API base {api_base}: {err}")))?;
    url.path_segments_mut()
        .map_err(|_| ProfileError::Network(format!("API base cannot hold a path: {api_base}")))?
        .pop_if_empty()
        .push("users")
        .push(username);
    Ok(url)
}

fn check_status(status: u16) -> Result<(), ProfileError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(ProfileError::NotFound),
        status => Err(ProfileError::Upstream { status }),
    }
}

fn parse_profile(body: &str) -> Result<UserProfile, ProfileError> {
    let profile: UserProfile = serde_json::from_str(body)
        .map_err(|err| ProfileError::InvalidProfile(err.to_string()))?;
    profile.validated()
}
