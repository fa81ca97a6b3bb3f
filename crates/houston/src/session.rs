use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::HoustonProblem;

/// The credential obtained by `appctl login`.
///
/// A session is only usable while `now < expires_at` and while its token
/// is a well-formed JWT issued for the configured client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "id_token")]
    token: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session from a token and the instant it stops being valid.
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Session {
        Session {
            token: token.into(),
            expires_at,
        }
    }

    /// Creates a session that expires `expires_in_seconds` after `now`.
    pub fn expiring_in(token: impl Into<String>, now: DateTime<Utc>, expires_in_seconds: u64) -> Session {
        let expires_at = i64::try_from(expires_in_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Session::new(token, expires_at)
    }

    /// The bearer token sent with every backend request.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// When the session stops being valid.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the session can no longer be used at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Decodes the claims carried by the token without checking its signature.
    pub fn claims(&self) -> Result<TokenClaims, HoustonProblem> {
        let mut segments = self.token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => {
                return Err(HoustonProblem::InvalidToken(
                    "it is not a JSON web token".to_string(),
                ))
            }
        };
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| HoustonProblem::InvalidToken(format!("its payload is not base64 ({e})")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| HoustonProblem::InvalidToken(format!("its claims are not JSON ({e})")))
    }

    /// Checks that the session may be used at `now` by the client `audience`.
    pub fn validate(&self, audience: &str, now: DateTime<Utc>) -> Result<TokenClaims, HoustonProblem> {
        if self.is_expired_at(now) {
            return Err(HoustonProblem::SessionExpired);
        }
        let claims = self.claims()?;
        if !claims.aud.contains(audience) {
            return Err(HoustonProblem::InvalidToken(
                "it was issued for a different client".to_string(),
            ));
        }
        match claims.exp {
            Some(exp) if exp <= now.timestamp() => Err(HoustonProblem::SessionExpired),
            Some(_) => Ok(claims),
            None => Err(HoustonProblem::InvalidToken(
                "it does not say when it expires".to_string(),
            )),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &mask_token(&self.token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// The subset of id-token claims appctl looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Who the token was issued for
    #[serde(default)]
    pub aud: Audience,
    /// Expiry as seconds since the epoch
    pub exp: Option<i64>,
    /// Present for accounts that logged in with an email identity
    pub email: Option<String>,
    /// Present for accounts that logged in through a code host
    pub nickname: Option<String>,
}

impl TokenClaims {
    /// The identifier telemetry events are attributed to, and how the user logged in.
    pub fn identity(&self) -> Option<(&str, &'static str)> {
        if let Some(email) = &self.email {
            Some((email.as_str(), "google-auth"))
        } else {
            self.nickname.as_deref().map(|nickname| (nickname, "github"))
        }
    }
}

/// The `aud` claim, which may be a single value or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// A single audience
    One(String),
    /// Several audiences
    Many(Vec<String>),
}

impl Default for Audience {
    fn default() -> Self {
        Audience::Many(Vec::new())
    }
}

impl Audience {
    /// Whether `audience` is one of the token's audiences.
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::One(one) => one == audience,
            Audience::Many(many) => many.iter().any(|a| a == audience),
        }
    }
}

/// Hides all but the ends of a token so it can be logged.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;
    use speculoos::prelude::*;

    use super::{mask_token, Session};
    use crate::HoustonProblem;

    const CLIENT_ID: &str = "appctl-client";

    fn jwt(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn expiry_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let session = Session::expiring_in("t", now, 60);
        assert!(!session.is_expired_at(now + Duration::seconds(59)));
        assert!(session.is_expired_at(now + Duration::seconds(60)));
    }

    #[test]
    fn it_accepts_a_token_for_this_client() {
        let now = Utc::now();
        let token = jwt(json!({
            "aud": CLIENT_ID,
            "exp": (now + Duration::hours(1)).timestamp(),
            "email": "dev@example.com"
        }));
        let session = Session::new(token, now + Duration::hours(1));
        let claims = session.validate(CLIENT_ID, now).unwrap();
        assert_that!(claims.identity()).is_equal_to(Some(("dev@example.com", "google-auth")));
    }

    #[test]
    fn it_accepts_an_audience_list() {
        let now = Utc::now();
        let token = jwt(json!({
            "aud": ["other", CLIENT_ID],
            "exp": (now + Duration::hours(1)).timestamp(),
            "nickname": "octocat"
        }));
        let session = Session::new(token, now + Duration::hours(1));
        let claims = session.validate(CLIENT_ID, now).unwrap();
        assert_that!(claims.identity()).is_equal_to(Some(("octocat", "github")));
    }

    #[rstest]
    #[case::wrong_audience(json!({"aud": "someone-else", "exp": 4_102_444_800_i64}))]
    #[case::no_expiry(json!({"aud": CLIENT_ID}))]
    fn it_rejects_foreign_tokens(#[case] claims: serde_json::Value) {
        let now = Utc::now();
        let session = Session::new(jwt(claims), now + Duration::hours(1));
        assert!(matches!(
            session.validate(CLIENT_ID, now),
            Err(HoustonProblem::InvalidToken(_))
        ));
    }

    #[rstest]
    #[case::not_a_jwt("opaque-token")]
    #[case::bad_base64("a.%%%.c")]
    #[case::bad_json("a.bm90IGpzb24.c")]
    fn it_rejects_malformed_tokens(#[case] token: &str) {
        let now = Utc::now();
        let session = Session::new(token, now + Duration::hours(1));
        assert!(matches!(
            session.validate(CLIENT_ID, now),
            Err(HoustonProblem::InvalidToken(_))
        ));
    }

    #[test]
    fn an_expired_claim_expires_the_session() {
        let now = Utc::now();
        let token = jwt(json!({"aud": CLIENT_ID, "exp": (now - Duration::minutes(1)).timestamp()}));
        let session = Session::new(token, now + Duration::hours(1));
        assert!(matches!(
            session.validate(CLIENT_ID, now),
            Err(HoustonProblem::SessionExpired)
        ));
    }

    #[test]
    fn it_never_prints_the_whole_token() {
        let session = Session::new("abcdefghijklmnopqrstuvwxyz", Utc::now());
        let debug = format!("{session:?}");
        assert!(!debug.contains("abcdefghijklmnopqrstuvwxyz"));
        assert_eq!(mask_token("abcdefghijklmnop"), "abcd********mnop");
        assert_eq!(mask_token("short"), "*****");
    }
}
