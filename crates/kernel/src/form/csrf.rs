//! CSRF token generation and verification.
//!
//! Form tokens are bound to one admin action (e.g. `add_post_type`),
//! single-use and time-limited, and kept in the session.
//!
//! Link tokens (delete links, one per overview row) are not stored. They are
//! an HMAC of the action and the current time window under a per-session
//! secret, so any number of them can be issued at once.

use anyhow::{Context, Result, bail};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tower_sessions::Session;

/// Session key for storing CSRF tokens.
const CSRF_SESSION_KEY: &str = "csrf_tokens";

/// Maximum number of tokens to store per session.
const MAX_TOKENS: usize = 32;

/// Token validity period in seconds (1 hour).
const TOKEN_VALIDITY_SECS: i64 = 3600;

/// Session key for the link token secret.
const LINK_SECRET_KEY: &str = "csrf_link_secret";

/// Link tokens from the current and the previous window are accepted.
const LINK_WINDOW_SECS: i64 = TOKEN_VALIDITY_SECS;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    action: String,
    token: String,
    issued: i64,
}

impl StoredToken {
    fn is_live(&self, now: i64) -> bool {
        now - self.issued <= TOKEN_VALIDITY_SECS
    }
}

async fn load_tokens(session: &Session) -> Vec<StoredToken> {
    session
        .get(CSRF_SESSION_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or_default()
}

/// Generate a CSRF token for `action` and store it in the session.
pub async fn generate_csrf_token(session: &Session, action: &str) -> Result<String> {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);

    let issued = chrono::Utc::now().timestamp();

    let mut hasher = Sha256::new();
    hasher.update(random_bytes);
    hasher.update(action.as_bytes());
    hasher.update(issued.to_le_bytes());
    let token = hex::encode(hasher.finalize());

    let mut tokens = load_tokens(session).await;
    tokens.retain(|t| t.is_live(issued));
    tokens.push(StoredToken {
        action: action.to_string(),
        token: token.clone(),
        issued,
    });

    // Keep only the most recent tokens.
    if tokens.len() > MAX_TOKENS {
        let skip = tokens.len() - MAX_TOKENS;
        tokens.drain(..skip);
    }

    session
        .insert(CSRF_SESSION_KEY, tokens)
        .await
        .map_err(|e| anyhow::anyhow!("failed to store CSRF token: {e}"))?;

    Ok(token)
}

/// Verify and consume a CSRF token for `action`.
pub async fn verify_csrf_token(session: &Session, action: &str, submitted: &str) -> Result<bool> {
    if submitted.is_empty() {
        bail!("empty CSRF token");
    }

    let mut tokens = load_tokens(session).await;
    if tokens.is_empty() {
        return Ok(false);
    }

    let now = chrono::Utc::now().timestamp();
    let found = tokens.iter().position(|t| {
        t.action == action
            && t.is_live(now)
            && bool::from(t.token.as_bytes().ct_eq(submitted.as_bytes()))
    });

    let Some(index) = found else {
        return Ok(false);
    };

    tokens.remove(index);
    tokens.retain(|t| t.is_live(now));

    session
        .insert(CSRF_SESSION_KEY, tokens)
        .await
        .map_err(|e| anyhow::anyhow!("failed to update CSRF tokens: {e}"))?;

    Ok(true)
}

fn link_token(secret: &str, action: &str, window: i64) -> Result<String> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).context("invalid link token secret")?;
    mac.update(action.as_bytes());
    mac.update(&window.to_le_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn link_window(now: i64) -> i64 {
    now.div_euclid(LINK_WINDOW_SECS)
}

/// Generate a link token for `action`, creating the session secret on first
/// use.
pub async fn generate_link_token(session: &Session, action: &str) -> Result<String> {
    let secret = match session.get::<String>(LINK_SECRET_KEY).await.unwrap_or(None) {
        Some(secret) => secret,
        None => {
            let mut bytes = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut bytes);
            let secret = hex::encode(bytes);
            session
                .insert(LINK_SECRET_KEY, &secret)
                .await
                .map_err(|e| anyhow::anyhow!("failed to store link token secret: {e}"))?;
            secret
        }
    };

    link_token(&secret, action, link_window(chrono::Utc::now().timestamp()))
}

/// Verify a link token for `action`. Link tokens are not consumed.
pub async fn verify_link_token(session: &Session, action: &str, submitted: &str) -> Result<bool> {
    if submitted.is_empty() {
        bail!("empty link token");
    }

    let Some(secret) = session.get::<String>(LINK_SECRET_KEY).await.unwrap_or(None) else {
        return Ok(false);
    };

    let window = link_window(chrono::Utc::now().timestamp());
    for w in [window, window - 1] {
        let expected = link_token(&secret, action, w)?;
        if bool::from(expected.as_bytes().ct_eq(submitted.as_bytes())) {
            return Ok(true);
        }
    }
    Ok(false)
}
