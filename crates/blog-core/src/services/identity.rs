//! Identity directory: registration and credential checks.

use std::sync::Arc;

use crate::domain::{AdminPolicy, NewUser, User, UserId, mask_email};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

const DUPLICATE_EMAIL: &str = "email already registered";

/// Maps emails to accounts and owns the registration rules.
pub struct IdentityDirectory {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    admin_policy: AdminPolicy,
}

impl IdentityDirectory {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        admin_policy: AdminPolicy,
    ) -> Self {
        Self {
            users,
            passwords,
            admin_policy,
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_email(email).await?)
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_id(id).await?)
    }

    /// Register a new account.
    ///
    /// The email pre-check only short-circuits the common case; the store's
    /// unique constraint decides races between concurrent registrations.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        NewUser::validate_input(email, name, password)?;
        let masked = mask_email(email);

        if self.users.find_by_email(email).await?.is_some() {
            tracing::debug!(user_email = %masked, "Registration rejected: email taken");
            return Err(DomainError::Duplicate(DUPLICATE_EMAIL.to_string()));
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let new_user = NewUser {
            email: email.to_string(),
            name: name.to_string(),
            password_hash,
            role: self.admin_policy.assignment_for(email),
        };

        let user = self.users.insert(new_user).await.map_err(|e| match e {
            RepoError::Constraint(_) => {
                tracing::debug!(user_email = %masked, "Registration lost a race on email");
                DomainError::Duplicate(DUPLICATE_EMAIL.to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(user_id = user.id, role = %user.role, user_email = %masked, "User registered");
        Ok(user)
    }

    /// Check an email/password pair.
    ///
    /// A legacy digest is upgraded after a successful check; a failed check
    /// never touches the stored digest.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let masked = mask_email(email);

        let Some(mut user) = self.users.find_by_email(email).await? else {
            tracing::debug!(user_email = %masked, "Login for unknown identity");
            return Err(DomainError::UnknownIdentity);
        };

        if !self.passwords.verify(password, &user.password_hash) {
            tracing::warn!(user_id = user.id, "Login with bad credential");
            return Err(DomainError::BadCredential);
        }

        if self.passwords.needs_rehash(&user.password_hash) {
            self.upgrade_digest(&mut user, password).await;
        }

        Ok(user)
    }

    async fn upgrade_digest(&self, user: &mut User, password: &str) {
        let fresh = match self.passwords.hash(password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "Could not rehash legacy digest");
                return;
            }
        };

        match self
            .users
            .update_password_hash(user.id, fresh.clone())
            .await
        {
            Ok(()) => {
                user.password_hash = fresh;
                tracing::info!(user_id = user.id, "Upgraded legacy password digest");
            }
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "Could not store upgraded digest");
            }
        }
    }
}
