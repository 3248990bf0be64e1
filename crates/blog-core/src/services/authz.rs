//! Authorization gate for privileged (administrator) actions.

use crate::domain::{Principal, User};
use crate::error::DomainError;

/// Outcome of an authorization check.
#[derive(Debug)]
pub enum Authorization<'a> {
    Authorized(&'a User),
    Denied,
}

impl<'a> Authorization<'a> {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Authorization::Authorized(_))
    }

    /// The authorized administrator, or `Forbidden`.
    pub fn into_result(self) -> Result<&'a User, DomainError> {
        match self {
            Authorization::Authorized(user) => Ok(user),
            Authorization::Denied => Err(DomainError::Forbidden),
        }
    }
}

/// Allow only a logged-in account whose stored role is admin.
pub fn require_admin(principal: &Principal) -> Authorization<'_> {
    match principal {
        Principal::User(user) if user.is_admin() => Authorization::Authorized(user),
        _ => Authorization::Denied,
    }
}
