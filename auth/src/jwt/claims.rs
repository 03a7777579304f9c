use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::NoContext;
use uuid::Timestamp;
use uuid::Uuid;

/// Claim set carried by every access token.
///
/// `exp` is absent on non-expiring tokens. `jti` is a UUIDv7 minted from the
/// issuance instant, so it orders tokens at millisecond precision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Build claims for a token issued at `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Authenticated subject identifier
    /// * `issued_at` - Issuance instant
    /// * `expires_at` - Expiry instant, or `None` for a non-expiring token
    pub fn issue(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let seconds = u64::try_from(issued_at.timestamp()).unwrap_or_default();
        let jti = Uuid::new_v7(Timestamp::from_unix(
            NoContext,
            seconds,
            issued_at.timestamp_subsec_nanos(),
        ));

        Self {
            sub: subject.to_string(),
            exp: expires_at.map(|at| at.timestamp()),
            iat: issued_at.timestamp(),
            jti: jti.to_string(),
        }
    }

    /// Check if the token is expired at `current_timestamp` (seconds).
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }

    /// Issuance instant in Unix milliseconds.
    ///
    /// Read from the UUIDv7 `jti`; falls back to the start of the `iat` second
    /// when the identifier carries no timestamp.
    pub fn issued_at_millis(&self) -> i64 {
        Uuid::parse_str(&self.jti)
            .ok()
            .and_then(|jti| jti.get_timestamp())
            .map(|timestamp| {
                let (seconds, nanos) = timestamp.to_unix();
                seconds as i64 * 1_000 + i64::from(nanos / 1_000_000)
            })
            .unwrap_or(self.iat * 1_000)
    }
}
