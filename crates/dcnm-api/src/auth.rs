use std::time::Duration;

use reqwest::header::HeaderValue;
use secrecy::SecretString;
use tokio::time::Instant;

/// A token counts as expired this long before its requested lifetime ends.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(10);

/// Credential material produced by a dialect authenticator.
#[derive(Debug, Clone)]
pub enum Credential {
    /// DCNM 11: a token sent as a request header on every call.
    /// The value is marked sensitive so it never shows up in debug output.
    Header {
        name: &'static str,
        value: HeaderValue,
    },

    /// NDFC 12: the session rides in the client's cookie jar. The JWT
    /// from the login body is kept only as proof of success.
    Cookie { jwt: SecretString },
}

/// Authentication state of a session, as seen by the freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum AuthState {
    #[strum(to_string = "not authenticated")]
    NotAuthenticated,
    #[strum(to_string = "token valid")]
    TokenValid,
    #[strum(to_string = "token expired")]
    TokenExpired,
}

/// An issued credential plus the time it was requested and its lifetime.
#[derive(Debug, Clone)]
pub struct AuthToken {
    credential: Credential,
    issued_at: Instant,
    lifetime: Duration,
}

impl AuthToken {
    pub fn new(credential: Credential, issued_at: Instant, lifetime: Duration) -> Self {
        Self {
            credential,
            issued_at,
            lifetime,
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// `true` while `now - issued_at <= lifetime - EXPIRY_MARGIN`.
    pub fn is_current_at(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.issued_at);
        elapsed.saturating_add(EXPIRY_MARGIN) <= self.lifetime
    }

    pub fn is_current(&self) -> bool {
        self.is_current_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie_token(lifetime: Duration) -> AuthToken {
        AuthToken::new(
            Credential::Cookie {
                jwt: SecretString::from("jwt"),
            },
            Instant::now(),
            lifetime,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_token_is_current() {
        let token = cookie_token(Duration::from_secs(30));
        assert!(token.is_current());
    }

    #[tokio::test(start_paused = true)]
    async fn token_current_up_to_lifetime_minus_margin() {
        let token = cookie_token(Duration::from_secs(30));

        tokio::time::advance(Duration::from_secs(20)).await;
        assert!(token.is_current(), "t == L - 10s must still be current");

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!token.is_current(), "t > L - 10s must be stale");
    }

    #[test]
    fn boundary_holds_for_many_lifetimes() {
        let issued = Instant::now();
        for secs in [11_u64, 30, 60, 600, 3600] {
            let lifetime = Duration::from_secs(secs);
            let token = AuthToken::new(
                Credential::Cookie {
                    jwt: SecretString::from("jwt"),
                },
                issued,
                lifetime,
            );
            let edge = lifetime - EXPIRY_MARGIN;
            assert!(token.is_current_at(issued + edge), "lifetime {secs}s at edge");
            assert!(
                !token.is_current_at(issued + edge + Duration::from_millis(1)),
                "lifetime {secs}s past edge"
            );
        }
    }

    #[test]
    fn lifetime_shorter_than_margin_is_never_current() {
        let issued = Instant::now();
        let token = AuthToken::new(
            Credential::Cookie {
                jwt: SecretString::from("jwt"),
            },
            issued,
            Duration::from_secs(5),
        );
        assert!(!token.is_current_at(issued));
    }
}
