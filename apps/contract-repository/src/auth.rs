use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

use crate::AppState;

pub const REALM: &str = "WirePact Contract Repository";

/// Username and password expected in `Authorization: Basic` headers.
#[derive(Clone)]
pub struct BasicCredentials {
    user_digest: [u8; 32],
    pass_digest: [u8; 32],
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials").finish_non_exhaustive()
    }
}

impl BasicCredentials {
    pub fn new(user: &str, pass: &str) -> Self {
        Self {
            user_digest: digest(user),
            pass_digest: digest(pass),
        }
    }

    /// Compares digests so the check does not short-circuit on the first
    /// differing byte of the secret.
    pub fn verify(&self, user: &str, pass: &str) -> bool {
        let user_ok = digest(user) == self.user_digest;
        let pass_ok = digest(pass) == self.pass_digest;
        user_ok & pass_ok
    }

    pub fn verify_headers(&self, headers: &HeaderMap) -> bool {
        match parse_basic_authorization(headers) {
            Some((user, pass)) => self.verify(&user, &pass),
            None => false,
        }
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Decodes `Authorization: Basic base64(user:pass)`.
pub fn parse_basic_authorization(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

pub async fn basic_auth_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.credentials.verify_headers(request.headers()) {
        return next.run(request).await;
    }

    tracing::warn!(path = %request.uri().path(), "rejected request without valid basic credentials");
    unauthorized_challenge()
}

pub fn unauthorized_challenge() -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        Html("<h1>401 Unauthorized</h1>".to_string()),
    )
        .into_response();
    if let Ok(challenge) = HeaderValue::from_str(&format!("Basic realm=\"{REALM}\"")) {
        response.headers_mut().insert(WWW_AUTHENTICATE, challenge);
    }
    response
}
