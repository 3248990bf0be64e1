//! Session revocation stores - Redis and in-memory.

mod memory;
#[cfg(feature = "redis")]
mod redis;

pub use memory::InMemorySessionStore;
#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisSessionStore};
