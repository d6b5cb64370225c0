//! userAccountControl decoding
//!
//! AD stores account state as a bitmask in `userAccountControl`. Only the
//! account-disabled flag is interpreted here, and only through the low four
//! bits of the value.

use thiserror::Error;
use tracing::{debug, error};

/// The value in `userAccountControl` could not be parsed as an integer.
#[derive(Debug, Error)]
#[error("malformed userAccountControl value '{value}'")]
pub struct UacParseError {
    value: String,
    #[source]
    source: std::num::ParseIntError,
}

/// Parsed `userAccountControl` bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAccountControl {
    /// Raw value.
    pub value: i64,
}

impl UserAccountControl {
    /// Logon script is executed.
    pub const SCRIPT: i64 = 0x0001;
    /// Account is disabled.
    pub const ACCOUNTDISABLE: i64 = 0x0002;
    /// Account is locked out.
    pub const LOCKOUT: i64 = 0x0010;
    /// No password is required.
    pub const PASSWD_NOTREQD: i64 = 0x0020;
    /// Default account type for a typical user.
    pub const NORMAL_ACCOUNT: i64 = 0x0200;
    /// Password never expires.
    pub const DONT_EXPIRE_PASSWORD: i64 = 0x1_0000;

    /// Wrap a raw value.
    #[must_use]
    pub fn from_value(value: i64) -> Self {
        Self { value }
    }

    /// Parse the textual attribute value.
    pub fn parse(raw: &str) -> Result<Self, UacParseError> {
        raw.parse::<i64>()
            .map(Self::from_value)
            .map_err(|source| UacParseError {
                value: raw.to_string(),
                source,
            })
    }

    /// Whether the account is enabled.
    ///
    /// Enabled unless the value modulo 16 is exactly the disabled bit. Other
    /// flags in the low nibble (script, home dir required) therefore mask the
    /// disabled bit, and higher flags such as lockout are ignored.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.value % 16 != Self::ACCOUNTDISABLE
    }
}

/// Decode the enabled flag from a raw `userAccountControl` value.
///
/// An absent value means enabled. A malformed value is logged and also
/// treated as enabled so that one bad attribute never aborts materialization.
#[must_use]
pub fn decode_enabled(raw: Option<&str>) -> bool {
    debug!(user_account_control = ?raw, "Decoding userAccountControl");

    let Some(raw) = raw else {
        return true;
    };

    match UserAccountControl::parse(raw) {
        Ok(uac) => uac.is_enabled(),
        Err(e) => {
            error!(error = %e, "Treating account as enabled");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_enabled() {
        assert!(decode_enabled(None));
    }

    #[test]
    fn test_disabled_bit() {
        assert!(!decode_enabled(Some("2")));
        assert!(!decode_enabled(Some("514")));
    }

    #[test]
    fn test_normal_account_is_enabled() {
        assert!(decode_enabled(Some("512")));
        assert!(decode_enabled(Some("66048")));
    }

    #[test]
    fn test_lockout_is_ignored() {
        // 512 | LOCKOUT
        assert!(decode_enabled(Some("528")));
        // 512 | LOCKOUT | ACCOUNTDISABLE
        assert!(!decode_enabled(Some("530")));
    }

    #[test]
    fn test_only_exact_low_nibble_counts() {
        // SCRIPT | ACCOUNTDISABLE | NORMAL_ACCOUNT: low nibble is 3
        assert!(decode_enabled(Some("515")));
    }

    #[test]
    fn test_malformed_is_enabled() {
        assert!(decode_enabled(Some("")));
        assert!(decode_enabled(Some("disabled")));
        assert!(decode_enabled(Some("0x202")));
    }

    #[test]
    fn test_parse_error_message() {
        let err = UserAccountControl::parse("abc").unwrap_err();
        assert_eq!(err.to_string(), "malformed userAccountControl value 'abc'");
    }

    #[test]
    fn test_flag_constants() {
        let uac = UserAccountControl::from_value(
            UserAccountControl::NORMAL_ACCOUNT | UserAccountControl::ACCOUNTDISABLE,
        );
        assert_eq!(uac.value, 514);
        assert!(!uac.is_enabled());
    }
}
