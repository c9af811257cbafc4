//! JWT claims decoding.
//!
//! The client never verifies token signatures: it holds no key, and the
//! backend is the authority that rejects bad tokens with a 401. Decoding
//! here only extracts the payload so the session layer can reason about
//! expiry and role. Malformed input decodes to `None`; a parse failure
//! never escapes this boundary.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Claims carried by the backend's access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's unique identifier
    pub sub: String,
    /// User email
    pub email: String,
    /// Role name, e.g. "Admin" or a customer role
    pub role: String,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
    /// Expiry timestamp (seconds since epoch)
    pub exp: i64,
}

/// Payload-only validation: no signature check and no expiry check.
/// Expired tokens still decode; comparing `exp` against the clock is the
/// session evaluator's job, not the decoder's.
static PAYLOAD_ONLY: Lazy<Validation> = Lazy::new(|| {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation
});

static UNUSED_KEY: Lazy<DecodingKey> = Lazy::new(|| DecodingKey::from_secret(&[]));

/// Decode the payload of `token`, or `None` if it is not a well-formed JWT
/// carrying the expected claims.
pub fn decode_claims(token: &str) -> Option<Claims> {
    decode::<Claims>(token, &UNUSED_KEY, &PAYLOAD_ONLY)
        .map(|data| data.claims)
        .ok()
}
