//! Operational attribute names
//!
//! Reserved logical names shared by every object class. They are spelled with
//! double underscores so they cannot collide with a directory attribute.

/// Logical name of the object's naming attribute.
pub const NAME: &str = "__NAME__";

/// Logical name of the object's unique identifier.
pub const UID: &str = "__UID__";

/// Logical name of the account password.
pub const PASSWORD: &str = "__PASSWORD__";

/// Logical name of the enabled/disabled flag.
pub const ENABLE: &str = "__ENABLE__";

/// All operational names.
pub const ALL: &[&str] = &[NAME, UID, PASSWORD, ENABLE];

/// Compare two attribute names the way the directory does (ignoring case).
#[must_use]
pub fn is_named(name: &str, reserved: &str) -> bool {
    name.eq_ignore_ascii_case(reserved)
}

/// Check whether a name is one of the operational names.
#[must_use]
pub fn is_operational(name: &str) -> bool {
    ALL.iter().any(|reserved| is_named(name, reserved))
}
