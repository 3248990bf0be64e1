use super::User;
use crate::error::DomainError;

/// The identity behind the current request, resolved once from its session.
#[derive(Debug, Clone, Default)]
pub enum Principal {
    #[default]
    Anonymous,
    User(User),
}

impl Principal {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::User(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Principal::User(user) => Some(user),
            Principal::Anonymous => None,
        }
    }

    /// The logged-in user, or `Unauthenticated`.
    pub fn require_user(&self) -> Result<&User, DomainError> {
        self.user().ok_or(DomainError::Unauthenticated)
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Principal::User(user)
    }
}
