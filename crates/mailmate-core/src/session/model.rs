//! Session identity types.

use crate::gateway::IdentityResponse;
use serde::{Deserialize, Serialize};

/// The signed-in user, as reported by the backend at start-up.
///
/// Created once and never mutated. It is dropped on logout or when the
/// program exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Name used to greet the user.
    pub display_name: String,
    /// Account address, when the backend reports one.
    pub email: Option<String>,
}

impl Session {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: None,
        }
    }
}

impl From<IdentityResponse> for Session {
    fn from(response: IdentityResponse) -> Self {
        Self {
            display_name: response.name,
            email: response.email,
        }
    }
}

/// Result of the identity query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Authenticated(Session),
    Unauthenticated,
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Identity::Authenticated(session) => Some(session),
            Identity::Unauthenticated => None,
        }
    }
}
