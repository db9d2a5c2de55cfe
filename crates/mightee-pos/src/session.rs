//! # Session State
//!
//! Holds the current order session behind a mutex.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple handlers may access/modify the session
//! 2. Only one handler should modify it at a time
//! 3. Handlers can run concurrently under the async runtime
//!
//! The state is explicit and session-scoped: handlers receive it as a
//! parameter, nothing lives in ambient globals. A new session starts
//! empty; nothing survives a restart.

use std::sync::{Arc, Mutex};

use mightee_core::OrderSession;

/// Shared, session-scoped order state.
#[derive(Debug, Default)]
pub struct SessionState {
    session: Arc<Mutex<OrderSession>>,
}

impl SessionState {
    /// Creates a new empty session.
    pub fn new() -> Self {
        SessionState {
            session: Arc::new(Mutex::new(OrderSession::new())),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = state.with_session(|s| s.total());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderSession) -> R,
    {
        let session = self.session.lock().expect("session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_session_mut(|s| s.add_item(selection, 2))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderSession) -> R,
    {
        let mut session = self.session.lock().expect("session mutex poisoned");
        f(&mut session)
    }
}
