use crate::core::{AppError, AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Validità di un token dal momento dell'emissione
pub const TOKEN_VALIDITY_HOURS: i64 = 24;

// struct che codifica il contenuto del token jwt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
    pub exp: i64, // Expiry time of the token (unix seconds)
}

/// Identità risolta da un token valido, legata alla singola richiesta
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("token signature does not match")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Emissione e validazione dei token HS256.
///
/// Il segreto viene passato una sola volta all'avvio e non cambia più.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // la scadenza la controlliamo noi, senza leeway
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    /// Emette un token che scade `TOKEN_VALIDITY_HOURS` dopo `now`
    #[instrument(skip(self, identity), fields(username = %identity.username, id = %identity.id))]
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, TokenError> {
        debug!("Encoding JWT token for user");
        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            is_admin: identity.is_admin,
            exp: (now + Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(|token| {
                info!("JWT token encoded successfully");
                token
            })
            .map_err(|e| {
                error!("Failed to encode JWT token: {:?}", e);
                TokenError::Signing(e.to_string())
            })
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Verifica firma e struttura, poi rifiuta i token con `exp <= now`
    #[instrument(skip(self, token))]
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        debug!("Decoding JWT token");
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        if data.claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        debug!("JWT token decoded successfully for user: {}", data.claims.username);
        Ok(data.claims)
    }
}

/// Motivi per cui il gate rifiuta una richiesta. Tutti producono 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingAuthHeader,
    MalformedAuthHeader,
    InvalidToken,
}

impl AuthRejection {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingAuthHeader => "Authorization header required",
            Self::MalformedAuthHeader => "Authorization header format must be Bearer {token}",
            Self::InvalidToken => "Invalid token",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        AppError::unauthorized(self.message()).into_response()
    }
}

/// Estrae il token da `Authorization: Bearer <token>`.
///
/// Schema case-sensitive, un solo spazio, esattamente due parti.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthRejection> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthRejection::MissingAuthHeader),
    };
    let value = value
        .to_str()
        .map_err(|_| AuthRejection::MalformedAuthHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthRejection::MalformedAuthHeader),
    }
}

#[instrument(skip_all, fields(method = %req.method(), path = %req.uri().path()))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    debug!("Running authentication middleware");
    let claims = {
        let token = bearer_token(req.headers()).inspect_err(|rejection| {
            warn!("Rejected request: {:?}", rejection);
        })?;

        state.tokens.validate(token).map_err(|e| {
            // la causa resta nei log, il client vede solo "Invalid token"
            warn!(cause = %e, "Rejected bearer token");
            AuthRejection::InvalidToken
        })?
    };

    let identity = Identity::from(claims);
    debug!("User authenticated: {}", identity.username);
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // presente solo se la route passa da authentication_middleware
        parts.extensions.get::<Identity>().cloned().ok_or_else(|| {
            error!("Identity requested on a route without authentication middleware");
            AuthRejection::MissingAuthHeader
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn alice() -> Identity {
        Identity {
            id: 7,
            username: "alice".to_string(),
            is_admin: true,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(&alice()).expect("Failed to issue token");

        assert_eq!(token.split('.').count(), 3);

        let claims = codec.validate(&token).expect("Failed to validate token");
        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "alice");
        assert!(claims.is_admin);
        assert_eq!(Identity::from(claims), alice());
    }

    #[test]
    fn test_expiry_is_24_hours_after_issue() {
        let codec = TokenCodec::new(SECRET);
        let issued = at(1_700_000_000);
        let token = codec.issue_at(&alice(), issued).unwrap();

        let claims = codec.validate_at(&token, issued).unwrap();
        assert_eq!(claims.exp - issued.timestamp(), 24 * 60 * 60);
    }

    #[test]
    fn test_valid_within_window_expired_after() {
        let codec = TokenCodec::new(SECRET);
        let issued = at(1_700_000_000);
        let token = codec.issue_at(&alice(), issued).unwrap();
        let window = Duration::hours(TOKEN_VALIDITY_HOURS);

        assert!(codec.validate_at(&token, issued).is_ok());
        assert!(codec.validate_at(&token, issued + Duration::hours(12)).is_ok());
        assert!(
            codec
                .validate_at(&token, issued + window - Duration::seconds(1))
                .is_ok()
        );

        assert_eq!(
            codec.validate_at(&token, issued + window),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.validate_at(&token, issued + window + Duration::days(3)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_issue_is_deterministic_for_same_instant() {
        let codec = TokenCodec::new(SECRET);
        let now = at(1_700_000_000);
        let first = codec.issue_at(&alice(), now).unwrap();
        let second = codec.issue_at(&alice(), now).unwrap();
        assert_eq!(first, second);

        let later = codec.issue_at(&alice(), now + Duration::seconds(1)).unwrap();
        assert_ne!(first, later);
    }

    #[test]
    fn test_mutated_signature_is_rejected() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(&alice()).unwrap();
        let (signed, signature) = token.rsplit_once('.').unwrap();

        const ALPHABET: &[u8] =
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

        // l'ultimo carattere porta bit di padding, gli altri 6 bit significativi
        for pos in 0..signature.len() - 1 {
            let mut bytes = signature.as_bytes().to_vec();
            let idx = ALPHABET.iter().position(|&c| c == bytes[pos]).unwrap();
            bytes[pos] = ALPHABET[idx ^ 1];
            let tampered = format!("{}.{}", signed, String::from_utf8(bytes).unwrap());

            assert_eq!(
                codec.validate(&tampered),
                Err(TokenError::InvalidSignature),
                "bit flip at position {} was accepted",
                pos
            );
        }
    }

    #[test]
    fn test_mutated_claims_are_rejected() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(&alice()).unwrap();
        let other = codec
            .issue(&Identity {
                id: 1,
                username: "mallory".to_string(),
                is_admin: true,
            })
            .unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(codec.validate(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");
        let token = issuer.issue(&alice()).unwrap();

        assert_eq!(verifier.validate(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_malformed_tokens() {
        let codec = TokenCodec::new(SECRET);
        for token in ["", "abc", "a.b", "a.b.c.d", "invalid.token.here", "!!!.@@@.###"] {
            assert!(
                matches!(codec.validate(token), Err(TokenError::Malformed(_))),
                "token {:?} should be malformed",
                token
            );
        }
    }

    #[test]
    fn test_missing_claims_are_malformed() {
        #[derive(Serialize)]
        struct Partial {
            id: i32,
            exp: i64,
        }

        let codec = TokenCodec::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                id: 1,
                exp: Utc::now().timestamp() + 3600,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(codec.validate(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let codec = TokenCodec::new(SECRET);
        let claims = Claims {
            id: 1,
            username: "alice".to_string(),
            is_admin: false,
            exp: Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(codec.validate(&token).is_err());
    }

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));

        assert_eq!(
            bearer_token(&HeaderMap::new()),
            Err(AuthRejection::MissingAuthHeader)
        );
        assert_eq!(bearer_token(&headers("")), Err(AuthRejection::MissingAuthHeader));

        for malformed in [
            "Token abc",
            "bearer abc",
            "BEARER abc",
            "Bearer",
            "Bearer ",
            "Bearer  abc",
            "Bearer abc def",
            "Bearer\tabc",
            " Bearer abc",
        ] {
            assert_eq!(
                bearer_token(&headers(malformed)),
                Err(AuthRejection::MalformedAuthHeader),
                "header {:?} should be malformed",
                malformed
            );
        }
    }

    #[test]
    fn test_opaque_header_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );
        assert_eq!(bearer_token(&headers), Err(AuthRejection::MalformedAuthHeader));
    }
}
