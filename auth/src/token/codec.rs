use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;
use crate::identity::Identity;

/// Hours an issued token stays valid. There is no refresh; clients log in again.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Signed compact token codec.
///
/// Issues and verifies `header.payload.signature` tokens (base64url segments)
/// signed with HS256 over a secret injected at construction. The secret is
/// never rotated for the lifetime of the codec.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenCodec {
    /// Create a new codec with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Shared symmetric key used for both signing and verification
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    /// Issue a token for `identity`, valid from `now` for [`TOKEN_LIFETIME_HOURS`].
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, identity: Identity, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = TokenClaims::new(identity, now, self.lifetime);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token at `now` and return the identity it was issued for.
    ///
    /// The signature is checked before expiry, so a forged token never
    /// reports `Expired`. A token issued at `t0` is accepted for every `now`
    /// with `t0 <= now < t0 + 24h`, to the microsecond.
    ///
    /// # Errors
    /// * `MalformedToken` - Not three decodable segments, or required claims missing
    /// * `BadSignature` - Signature mismatch, or header names an algorithm other than HS256
    /// * `Expired` - `now` is at or past the expiry instant
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock, with no leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                _ => TokenError::MalformedToken,
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    fn segment(value: &serde_json::Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = TokenCodec::new(SECRET);
        let t = issued_at();

        let token = codec.issue(Identity(42), t).expect("Failed to issue token");

        assert_eq!(codec.verify(&token, t), Ok(Identity(42)));
        assert_eq!(
            codec.verify(&token, t + Duration::hours(23) + Duration::minutes(59)),
            Ok(Identity(42))
        );
        assert_eq!(
            codec.verify(&token, t + Duration::hours(24) - Duration::seconds(1)),
            Ok(Identity(42))
        );
    }

    #[test]
    fn test_verify_expired() {
        let codec = TokenCodec::new(SECRET);
        let t = issued_at();

        let token = codec.issue(Identity(42), t).expect("Failed to issue token");

        assert_eq!(
            codec.verify(&token, t + Duration::hours(24)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.verify(&token, t + Duration::hours(24) + Duration::minutes(1)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.verify(&token, t + Duration::days(365)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_expiry_window_with_subsecond_issue_time() {
        let codec = TokenCodec::new(SECRET);
        let t = issued_at() + Duration::milliseconds(700);

        let token = codec.issue(Identity(42), t).expect("Failed to issue token");

        assert_eq!(
            codec.verify(&token, t + Duration::hours(24) - Duration::milliseconds(500)),
            Ok(Identity(42))
        );
        assert_eq!(
            codec.verify(&token, t + Duration::hours(24) - Duration::microseconds(1)),
            Ok(Identity(42))
        );
        assert_eq!(
            codec.verify(&token, t + Duration::hours(24)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_token_is_compact_and_url_safe() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(Identity(1), issued_at()).unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| !s.is_empty()));
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));

        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[0]).unwrap()).unwrap();
        assert_eq!(header["alg"], "HS256");

        let payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
        assert_eq!(payload["user_id"], 1);
        assert_eq!(
            payload["exp"],
            issued_at().timestamp() + TOKEN_LIFETIME_HOURS * 3600
        );
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer.issue(Identity(42), issued_at()).unwrap();

        assert_eq!(
            verifier.verify(&token, issued_at()),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_verify_tampered_payload() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(Identity(42), issued_at()).unwrap();
        let segments: Vec<&str> = token.split('.').collect();

        let forged_payload = segment(&json!({
            "user_id": 1,
            "exp": issued_at().timestamp() + 3600,
            "iat": issued_at().timestamp(),
        }));
        let forged = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);

        assert_eq!(
            codec.verify(&forged, issued_at()),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_verify_rejects_other_algorithm_with_same_secret() {
        let codec = TokenCodec::new(SECRET);
        let claims = TokenClaims::new(Identity(42), issued_at(), Duration::hours(1));

        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(
            codec.verify(&token, issued_at()),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_verify_rejects_unsigned_token() {
        let codec = TokenCodec::new(SECRET);

        let header = segment(&json!({ "alg": "none", "typ": "JWT" }));
        let payload = segment(&json!({
            "user_id": 42,
            "exp": issued_at().timestamp() + 3600,
            "iat": issued_at().timestamp(),
        }));

        for token in [
            format!("{}.{}.", header, payload),
            format!("{}.{}", header, payload),
        ] {
            let result = codec.verify(&token, issued_at());
            assert!(
                matches!(
                    result,
                    Err(TokenError::MalformedToken) | Err(TokenError::BadSignature)
                ),
                "unsigned token accepted: {:?}",
                result
            );
        }
    }

    #[test]
    fn test_verify_malformed_tokens() {
        let codec = TokenCodec::new(SECRET);

        for token in ["", "abc123", "invalid.token.here", "a.b.c", "...", "a.b"] {
            assert_eq!(
                codec.verify(token, issued_at()),
                Err(TokenError::MalformedToken),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_verify_signed_token_missing_claims() {
        let codec = TokenCodec::new(SECRET);
        let key = EncodingKey::from_secret(SECRET);
        let header = Header::new(Algorithm::HS256);

        let without_user = encode(
            &header,
            &json!({ "exp": issued_at().timestamp() + 3600 }),
            &key,
        )
        .unwrap();
        let without_exp = encode(&header, &json!({ "user_id": 42 }), &key).unwrap();

        assert_eq!(
            codec.verify(&without_user, issued_at()),
            Err(TokenError::MalformedToken)
        );
        assert_eq!(
            codec.verify(&without_exp, issued_at()),
            Err(TokenError::MalformedToken)
        );
    }

    #[test]
    fn test_verify_many_identities() {
        let codec = TokenCodec::new(SECRET);
        let t = issued_at();

        for id in [0, 1, 42, -7, i64::MAX / 2] {
            let token = codec.issue(Identity(id), t).unwrap();
            assert_eq!(codec.verify(&token, t + Duration::hours(12)), Ok(Identity(id)));
        }
    }
}
