//! QR-code login state machine.
//!
//! ```text
//!          step                 step (801/802)
//!   Init ────────▶ Pending ◀───────────────┐
//!     ▲               │  └─────────────────┘
//!     │               ├── step (803) ──▶ Success
//!     │               └── step (other) ─▶ Failed
//!     └──────────── restart ◀──────────── (any state)
//! ```
//!
//! The session is driven from the outside: the CLI calls [`LoginSession::step`]
//! on a fixed timer and decides when to [`LoginSession::restart`]. Nothing is
//! retried automatically.

use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::{config::LOGIN_POLL_SECS, error::LoginError, netease::LoginApi, types::QrCheck};

pub use crate::types::LoginState;

/// Timer that paces [`LoginSession::step`].
///
/// The first tick completes immediately. Ticks missed while a request was in
/// flight are not replayed in a burst; the next poll waits a full period.
pub fn poll_timer() -> Interval {
    let mut timer = interval(Duration::from_secs(LOGIN_POLL_SECS));
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginSession {
    pub state: LoginState,
    pub qr_key: Option<String>,
    pub qr_image: Option<String>,
    pub check_code: Option<i64>,
    pub check_cookie: Option<String>,
    pub check_count: u32,
}

impl Default for LoginSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginSession {
    pub fn new() -> Self {
        Self {
            state: LoginState::Init,
            qr_key: None,
            qr_image: None,
            check_code: None,
            check_cookie: None,
            check_count: 0,
        }
    }

    /// Advances the session by one poll and returns the new state.
    ///
    /// Terminal states are returned unchanged without contacting the API. On
    /// error the session is left as it was.
    pub async fn step<A: LoginApi>(&mut self, api: &A) -> Result<LoginState, LoginError> {
        match self.state {
            LoginState::Init => {
                let qr = api.qr_image_url().await?;
                self.qr_key = Some(qr.key);
                self.qr_image = Some(qr.image);
                self.check_code = None;
                self.check_cookie = None;
                self.check_count += 1;
                self.state = LoginState::Pending;
            }
            LoginState::Pending => {
                let key = self.qr_key.as_deref().ok_or(LoginError::MissingKey)?;
                let QrCheck {
                    state,
                    code,
                    cookie,
                } = api.qr_login_status(key).await?;
                self.check_code = Some(code);
                self.check_cookie = cookie;
                self.check_count += 1;
                self.state = state;
            }
            LoginState::Success | LoginState::Failed => {}
        }

        Ok(self.state)
    }

    /// Drops all session data and returns to [`LoginState::Init`].
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, LoginState::Success | LoginState::Failed)
    }
}
