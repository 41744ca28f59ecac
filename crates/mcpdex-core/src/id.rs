use crate::error::DirectoryError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

const GENERATED_PREFIX: &str = "server-";
const MAX_LENGTH: usize = 128;

/// Identifier of a directory record.
///
/// Ids are opaque to callers. Generated ids are `server-` followed by the
/// base58 encoding of the generator's raw bytes; ids coming from outside
/// (request bodies, the fallback catalog) are validated by [`ServerId::new`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(SmolStr);

impl ServerId {
    /// Creates a `ServerId` by encoding the given bytes as base58.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcpdex_core::ServerId;
    ///
    /// let id = ServerId::generated([0u8, 0, 0, 1]);
    /// assert!(id.as_str().starts_with("server-"));
    /// ```
    pub fn generated<T: AsRef<[u8]>>(bytes: T) -> Self {
        let encoded = bs58::encode(bytes).into_string();
        Self(SmolStr::new(format!("{GENERATED_PREFIX}{encoded}")))
    }

    /// Creates a new `ServerId` after validating the input.
    ///
    /// Valid ids are 1-128 characters and contain only `[a-zA-Z0-9_-]`.
    pub fn new(id: impl AsRef<str>) -> Result<Self, DirectoryError> {
        let id = id.as_ref();
        Self::validate(id)?;
        Ok(Self(SmolStr::new(id)))
    }

    /// Creates a `ServerId` without validation.
    ///
    /// Use this only for ids read back from a trusted store.
    pub fn new_unchecked(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id.as_ref()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), DirectoryError> {
        if id.is_empty() || id.len() > MAX_LENGTH {
            return Err(DirectoryError::InvalidArgument(format!(
                "server id length must be between 1 and {}, got {}",
                MAX_LENGTH,
                id.len()
            )));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DirectoryError::InvalidArgument(format!(
                "server id must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ServerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ServerId").field(&self.0).finish()
    }
}

impl Display for ServerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
