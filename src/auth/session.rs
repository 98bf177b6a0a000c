//! Cookie-backed sessions: opaque UUID tokens mapped to user ids, with a
//! fixed TTL and lazy expiry on lookup.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Name of the HttpOnly cookie carrying the session token.
pub const SESSION_COOKIE: &str = "boxoffice_session";

#[derive(Debug, Clone)]
pub struct Session {
    pub token: Uuid,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Server-side session table. Tokens are random v4 UUIDs, never derived
/// from user data, so possession of the cookie is the whole credential.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Mints a new session for the user and registers it.
    pub fn create(&self, user_id: i64) -> Session {
        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions
            .write()
            .expect("session lock poisoned")
            .insert(session.token, session.clone());
        session
    }

    /// Looks up a live session. Expired entries are dropped here rather
    /// than by a background sweeper.
    pub fn resolve(&self, token: Uuid) -> Option<Session> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().expect("session lock poisoned");
            match sessions.get(&token) {
                Some(session) if session.expires_at > now => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.sessions
            .write()
            .expect("session lock poisoned")
            .remove(&token);
        None
    }

    pub fn revoke(&self, token: Uuid) {
        self.sessions
            .write()
            .expect("session lock poisoned")
            .remove(&token);
    }

    /// `Set-Cookie` value installing this session in the browser.
    pub fn cookie(&self, session: &Session) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            session.token,
            self.ttl.num_seconds()
        )
    }
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pulls the session token out of a raw `Cookie` header, tolerating
/// other cookies and stray whitespace around pairs.
pub fn token_from_cookie_header(header: &str) -> Option<Uuid> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}
