//! Argon2 password hashing, with read support for legacy PBKDF2 digests.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sha2::Sha256;

use blog_core::ports::{AuthError, PasswordService};

/// Prefix of digests written by the previous deployment
/// (`pbkdf2:sha256:<iterations>$<salt>$<hex>`).
const LEGACY_PREFIX: &str = "pbkdf2:sha256";

/// Iteration count assumed when a legacy digest omits it.
const LEGACY_DEFAULT_ITERATIONS: u32 = 260_000;

/// Argon2-based password service.
///
/// New digests are always Argon2id PHC strings. Legacy PBKDF2-HMAC-SHA256
/// digests still verify, and `needs_rehash` flags them for upgrade.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Argon2id with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    fn verify_argon2(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable password digest");
                false
            }
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match LegacyDigest::parse(hash) {
            Some(legacy) => legacy.matches(password),
            None if hash.starts_with("pbkdf2:") => {
                tracing::warn!("Unsupported legacy password digest");
                false
            }
            None => self.verify_argon2(password, hash),
        }
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        hash.starts_with("pbkdf2:")
    }
}

/// A parsed `pbkdf2:sha256[:<iterations>]$<salt>$<hex>` digest.
struct LegacyDigest<'a> {
    iterations: u32,
    salt: &'a str,
    expected: Vec<u8>,
}

impl<'a> LegacyDigest<'a> {
    fn parse(digest: &'a str) -> Option<Self> {
        let mut parts = digest.splitn(3, '$');
        let method = parts.next()?;
        let salt = parts.next()?;
        let hex_hash = parts.next()?;

        let rest = method.strip_prefix(LEGACY_PREFIX)?;
        let iterations = match rest {
            "" => LEGACY_DEFAULT_ITERATIONS,
            _ => rest.strip_prefix(':')?.parse().ok()?,
        };
        if iterations == 0 || salt.is_empty() {
            return None;
        }

        let expected = hex::decode(hex_hash).ok()?;
        if expected.is_empty() {
            return None;
        }

        Some(Self {
            iterations,
            salt,
            expected,
        })
    }

    fn matches(&self, password: &str) -> bool {
        let mut derived = vec![0u8; self.expected.len()];
        pbkdf2::pbkdf2_hmac::<Sha256>(
            password.as_bytes(),
            self.salt.as_bytes(),
            self.iterations,
            &mut derived,
        );
        constant_time_eq(&derived, &self.expected)
    }
}

/// Constant-time byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
