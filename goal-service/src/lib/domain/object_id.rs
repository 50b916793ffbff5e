use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::sync::OnceLock;

use chrono::Utc;
use thiserror::Error;

/// Error for identifier parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ObjectIdError {
    #[error("Invalid identifier: expected 24 hex characters, got {0:?}")]
    InvalidFormat(String),
}

/// Opaque 12-byte document identifier, rendered as 24 hex characters.
///
/// Layout: 4-byte big-endian seconds since the Unix epoch, 5 bytes fixed
/// per process, 3-byte counter. Ids minted later in the same process
/// compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

impl ObjectId {
    const COUNTER_MASK: u32 = 0x00FF_FFFF;

    /// Generate a new identifier.
    pub fn new() -> Self {
        let timestamp = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let process_unique = PROCESS_UNIQUE.get_or_init(rand::random::<[u8; 5]>);
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::random::<u32>() & Self::COUNTER_MASK))
            .fetch_add(1, Ordering::Relaxed)
            & Self::COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parse an identifier from its 24-character hex form.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not exactly 24 hex characters
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| ObjectIdError::InvalidFormat(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Lowercase 24-character hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
