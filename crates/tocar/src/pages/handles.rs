//! Handles to externally defined page objects.
//!
//! The sign-in dialog, the software keyboard, and the system activity chooser
//! are owned by other layers of the test suite. This crate's contract with
//! them is limited to constructing them with the current session and handing
//! control to the caller.

use super::FromSession;
use crate::session::Session;

/// The identity-provider sign-in dialog
#[derive(Debug, Clone)]
pub struct Persona {
    session: Session,
}

impl Persona {
    /// The session this handle is bound to
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }
}

impl FromSession for Persona {
    fn from_session(session: Session) -> Self {
        Self { session }
    }
}

/// The on-screen software keyboard
#[derive(Debug, Clone)]
pub struct Keyboard {
    session: Session,
}

impl Keyboard {
    /// The session this handle is bound to
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }
}

impl FromSession for Keyboard {
    fn from_session(session: Session) -> Self {
        Self { session }
    }
}

/// The system "share / open with" activity chooser
#[derive(Debug, Clone)]
pub struct Activities {
    session: Session,
}

impl Activities {
    /// The session this handle is bound to
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }
}

impl FromSession for Activities {
    fn from_session(session: Session) -> Self {
        Self { session }
    }
}
