use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use shared_types::{AppError, TokenClaims};

/// Read the claims of a JWT access token.
///
/// Only the payload segment is decoded; the signature is the backend's concern.
pub fn decode_claims(token: &str) -> Result<TokenClaims, AppError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) => payload,
        _ => return Err(AppError::unauthorized("Malformed access token")),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AppError::unauthorized(format!("Malformed access token: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::unauthorized(format!("Unreadable token claims: {e}")))
}
