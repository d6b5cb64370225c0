//! Guarded secret values
//!
//! Secrets travel through the object model as [`GuardedString`], a thin
//! wrapper over [`SecretString`] that never prints its contents and wipes
//! its buffer on drop.

pub use secrecy::ExposeSecret;
use secrecy::SecretString;

/// A secret string, redacted in `Debug` and zeroized on drop.
#[derive(Debug)]
pub struct GuardedString(SecretString);

impl GuardedString {
    /// Wrap a secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::from(secret.into()))
    }

    /// The empty placeholder returned in place of secrets that cannot be read back.
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Check whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl ExposeSecret<str> for GuardedString {
    fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Default for GuardedString {
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for GuardedString {
    fn clone(&self) -> Self {
        Self::new(self.expose_secret())
    }
}

impl PartialEq for GuardedString {
    fn eq(&self, other: &Self) -> bool {
        self.expose_secret() == other.expose_secret()
    }
}

impl Eq for GuardedString {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = GuardedString::new("P@ssw0rd");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("P@ssw0rd"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn test_empty_placeholder() {
        let placeholder = GuardedString::empty();
        assert!(placeholder.is_empty());
        assert_eq!(placeholder.expose_secret(), "");
        assert_eq!(placeholder, GuardedString::default());
    }

    #[test]
    fn test_expose_secret() {
        let secret = GuardedString::new("abc");
        assert_eq!(secret.expose_secret(), "abc");
        assert_eq!(secret.clone(), secret);
        assert!(!secret.is_empty());
    }
}
