//! Current-user identity used to scope task queries.

use crate::error::{TaskError, TaskResult};

/// Supplies the identity of the signed-in user.
pub trait SessionProvider: Send + Sync {
    fn owner_id(&self) -> TaskResult<String>;
}

/// Fixed identity taken from configuration; `None` means signed out.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user_id: Option<String>,
}

impl StaticSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn signed_out() -> Self {
        Self { user_id: None }
    }

    pub fn from_option(user_id: Option<String>) -> Self {
        Self {
            user_id: user_id.filter(|id| !id.trim().is_empty()),
        }
    }
}

impl SessionProvider for StaticSession {
    fn owner_id(&self) -> TaskResult<String> {
        self.user_id.clone().ok_or_else(TaskError::unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn signed_in_session_returns_owner() {
        assert_eq!(StaticSession::new("alice").owner_id().unwrap(), "alice");
    }

    #[test]
    fn signed_out_session_is_unauthenticated() {
        let err = StaticSession::signed_out().owner_id().unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn blank_identity_counts_as_signed_out() {
        assert!(StaticSession::from_option(Some("  ".into())).owner_id().is_err());
    }
}
