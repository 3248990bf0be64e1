use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{MAX_FIELD_LEN, require_field};
use crate::error::DomainError;

pub type UserId = i32;

/// Identifier the store hands to the very first registered account.
pub const FIRST_ACCOUNT_ID: UserId = 1;

/// Privilege level stored with every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

/// User entity - represents a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// How the role of a new account is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleAssignment {
    Fixed(Role),
    /// Admin if and only if the store assigns [`FIRST_ACCOUNT_ID`].
    FirstAccount,
}

/// Which account becomes the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminPolicy {
    /// The first account ever registered (identifier 1).
    #[default]
    FirstAccount,
    /// The account registered with exactly this email.
    Email(String),
}

impl AdminPolicy {
    pub fn assignment_for(&self, email: &str) -> RoleAssignment {
        match self {
            AdminPolicy::FirstAccount => RoleAssignment::FirstAccount,
            AdminPolicy::Email(admin) if admin == email => RoleAssignment::Fixed(Role::Admin),
            AdminPolicy::Email(_) => RoleAssignment::Fixed(Role::Member),
        }
    }
}

/// A validated account waiting to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: RoleAssignment,
}

impl NewUser {
    /// Check registration input before any hashing happens.
    ///
    /// Every field is required; email and name must fit their columns. The
    /// password is never length-checked since only its digest is stored.
    pub fn validate_input(email: &str, name: &str, password: &str) -> Result<(), DomainError> {
        require_field("Email", email, Some(MAX_FIELD_LEN))?;
        require_field("Name", name, Some(MAX_FIELD_LEN))?;
        require_field("Password", password, None)
    }
}

/// Mask an email for logging so no full address ends up in log sinks.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("member".parse::<Role>().unwrap(), Role::Member);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_admin_policy_assignment() {
        assert_eq!(
            AdminPolicy::FirstAccount.assignment_for("a@b.c"),
            RoleAssignment::FirstAccount
        );

        let policy = AdminPolicy::Email("boss@blog.dev".to_string());
        assert_eq!(
            policy.assignment_for("boss@blog.dev"),
            RoleAssignment::Fixed(Role::Admin)
        );
        // Email equality is case-sensitive.
        assert_eq!(
            policy.assignment_for("Boss@blog.dev"),
            RoleAssignment::Fixed(Role::Member)
        );
    }

    #[test]
    fn test_validate_input() {
        assert!(NewUser::validate_input("ann@example.com", "Ann", "long-enough").is_ok());
        assert!(NewUser::validate_input("ann@example.com", "", "long-enough").is_err());
        assert!(NewUser::validate_input("", "Ann", "long-enough").is_err());
        assert!(NewUser::validate_input("ann@example.com", "Ann", "  ").is_err());
        assert!(NewUser::validate_input(&"a".repeat(251), "Ann", "long-enough").is_err());
    }

    #[test]
    fn test_any_non_blank_triple_is_accepted() {
        assert!(NewUser::validate_input("ann@example.com", "Ann", "abc").is_ok());
        assert!(NewUser::validate_input("ann", "Ann", "x").is_ok());
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane@example.com"), "j***@example.com");
        assert_eq!(mask_email("j@example.com"), "***@example.com");
        assert_eq!(mask_email("nonsense"), "***");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            email: "ann@example.com".to_string(),
            name: "Ann".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::Admin,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"role\":\"admin\""));
    }
}
