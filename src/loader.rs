use tracing::{debug, warn};

use crate::profile::{ProfileSource, UserProfile};
use crate::error::ProfileError;

pub const NOT_FOUND_MESSAGE: &str = "User not found. Please check the URL and try again.";
pub const INVALID_USERNAME_MESSAGE: &str = "Invalid username. Please check the URL and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error { message: &'static str },
    Loaded(UserProfile),
}

/// Handle for one in-flight fetch. Only the ticket from the latest
/// [`ProfileLoader::request`] can resolve the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    username: String,
}

impl FetchTicket {
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Debug)]
pub struct ProfileLoader {
    generation: u64,
    username: Option<String>,
    state: ViewState,
}

impl Default for ProfileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileLoader {
    pub fn new() -> Self {
        Self {
            generation: 0,
            username: None,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Starts a fetch for `username`.
    ///
    /// Returns `None` when nothing needs fetching: the username is empty
    /// (the loader moves straight to the error state) or it is the same
    /// username as the current request.
    pub fn request(&mut self, username: &str) -> Option<FetchTicket> {
        if self.username.as_deref() == Some(username) {
            return None;
        }

        self.generation += 1;
        self.username = Some(username.to_string());

        if username.trim().is_empty() {
            self.state = ViewState::Error {
                message: INVALID_USERNAME_MESSAGE,
            };
            return None;
        }

        self.state = ViewState::Loading;
        Some(FetchTicket {
            generation: self.generation,
            username: username.to_string(),
        })
    }

    /// Applies a fetch result. Returns `false` and leaves the state alone
    /// when the ticket has been superseded by a newer request.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<UserProfile, ProfileError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "dropping stale profile result: username={} generation={} current={}",
                ticket.username, ticket.generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(profile) => ViewState::Loaded(profile),
            Err(err) => {
                warn!("profile load failed: username={} error={}", ticket.username, err);
                ViewState::Error {
                    message: NOT_FOUND_MESSAGE,
                }
            }
        };
        true
    }

    /// Requests, fetches and resolves in one go.
    pub async fn load<S: ProfileSource>(&mut self, source: &S, username: &str) -> &ViewState {
        if let Some(ticket) = self.request(username) {
            let result = source.fetch_profile(ticket.username()).await;
            self.resolve(ticket, result);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use super::*;

    struct MemorySource {
        profiles: HashMap<String, UserProfile>,
        calls: Cell<usize>,
    }

    impl MemorySource {
        fn with(usernames: &[&str]) -> Self {
            let profiles = usernames
                .iter()
                .map(|name| {
                    (
                        name.to_string(),
                        UserProfile {
                            username: name.to_string(),
                            avatar_url: None,
                        },
                    )
                })
                .collect();
            Self {
                profiles,
                calls: Cell::new(0),
            }
        }
    }

    impl ProfileSource for MemorySource {
        async fn fetch_profile(&self, username: &str) -> Result<UserProfile, ProfileError> {
            self.calls.set(self.calls.get() + 1);
            self.profiles
                .get(username)
                .cloned()
                .ok_or(ProfileError::NotFound)
        }
    }

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            username: name.to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn starts_loading() {
        assert_eq!(ProfileLoader::new().state(), &ViewState::Loading);
    }

    #[tokio::test]
    async fn successful_fetch_loads_profile() {
        let source = MemorySource::with(&["alice"]);
        let mut loader = ProfileLoader::new();
        let state = loader.load(&source, "alice").await;
        assert_eq!(state, &ViewState::Loaded(profile("alice")));
    }

    #[tokio::test]
    async fn any_failure_shows_not_found() {
        let source = MemorySource::with(&[]);
        let mut loader = ProfileLoader::new();
        let state = loader.load(&source, "ghost").await;
        assert_eq!(
            state,
            &ViewState::Error {
                message: NOT_FOUND_MESSAGE
            }
        );
    }

    #[tokio::test]
    async fn empty_username_skips_fetch() {
        let source = MemorySource::with(&["alice"]);
        let mut loader = ProfileLoader::new();
        let state = loader.load(&source, "").await;
        assert_eq!(
            state,
            &ViewState::Error {
                message: INVALID_USERNAME_MESSAGE
            }
        );
        assert_eq!(source.calls.get(), 0);
    }

    #[tokio::test]
    async fn same_username_is_not_refetched() {
        let source = MemorySource::with(&["alice"]);
        let mut loader = ProfileLoader::new();
        loader.load(&source, "alice").await;
        loader.load(&source, "alice").await;
        assert_eq!(source.calls.get(), 1);

        loader.load(&source, "bob").await;
        assert_eq!(source.calls.get(), 2);
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut loader = ProfileLoader::new();
        let first = loader.request("alice").unwrap();
        let second = loader.request("bob").unwrap();

        assert!(loader.resolve(second, Ok(profile("bob"))));
        assert!(!loader.resolve(first, Ok(profile("alice"))));
        assert_eq!(loader.state(), &ViewState::Loaded(profile("bob")));
    }

    #[test]
    fn stale_failure_does_not_clobber_pending_request() {
        let mut loader = ProfileLoader::new();
        let first = loader.request("alice").unwrap();
        let _second = loader.request("bob").unwrap();

        assert!(!loader.resolve(first, Err(ProfileError::Network("reset".to_string()))));
        assert_eq!(loader.state(), &ViewState::Loading);
    }
}
