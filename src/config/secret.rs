//! Salt handling using the secrecy crate
//!
//! The salt is the one value whose disclosure weakens every identifier ever
//! produced, so it is kept inside a `Secret` container:
//!
//! - **Automatic Zeroization**: memory is zeroed when the secret is dropped
//! - **Debug Protection**: `Debug` output is redacted
//! - **Explicit Access**: `expose_secret()` is required to read the value
//!
//! # Example
//!
//! ```rust
//! use logmask::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let salt = secret_string("my-salt".to_string());
//! assert_eq!(salt.expose_secret().as_str(), "my-salt");
//! assert!(!format!("{salt:?}").contains("my-salt"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl SecretValue {
    /// Borrow the secret as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Wrap a String in a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
