use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::identity::Identity;

/// Payload carried inside every issued token.
///
/// `exp` and `iat` use the registered JWT claim names and are NumericDate
/// values: seconds since the epoch, with a fractional part when the instant
/// does not fall on a whole second. Precision is one microsecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: Identity,
    #[serde(with = "numeric_date")]
    pub exp: DateTime<Utc>,
    #[serde(with = "numeric_date")]
    pub iat: DateTime<Utc>,
}

impl TokenClaims {
    /// Build claims for `identity` issued at `now`, valid for `lifetime`.
    pub fn new(identity: Identity, now: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            user_id: identity,
            exp: now + lifetime,
            iat: now,
        }
    }

    /// Whether the token is no longer usable at `now`.
    ///
    /// The expiry instant itself is already outside the validity window.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_micros() >= self.exp.timestamp_micros()
    }
}

/// Serde adapter between `DateTime<Utc>` and a JWT NumericDate.
///
/// Whole seconds are written as integers so tokens issued on a second
/// boundary look like any other JWT.
mod numeric_date {
    use chrono::DateTime;
    use chrono::Utc;
    use serde::de::Error;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    const MICROS_PER_SECOND: i64 = 1_000_000;

    pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let micros = instant.timestamp_micros();
        if micros % MICROS_PER_SECOND == 0 {
            serializer.serialize_i64(micros / MICROS_PER_SECOND)
        } else {
            serializer.serialize_f64(micros as f64 / MICROS_PER_SECOND as f64)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = f64::deserialize(deserializer)?;
        if !seconds.is_finite() {
            return Err(D::Error::custom("NumericDate must be finite"));
        }

        let micros = (seconds * MICROS_PER_SECOND as f64).round();
        if micros.abs() >= i64::MAX as f64 {
            return Err(D::Error::custom("NumericDate out of range"));
        }

        DateTime::from_timestamp_micros(micros as i64)
            .ok_or_else(|| D::Error::custom("NumericDate out of range"))
    }
}
