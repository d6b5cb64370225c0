//! Reserved attribute names for Active Directory mapping.

/// Virtual attribute listing the DNs of the directory groups an entry belongs to.
pub const LDAP_GROUPS: &str = "ldapGroups";

/// Virtual attribute listing the POSIX groups an entry belongs to.
pub const POSIX_GROUPS: &str = "posixGroups";

/// AD account control bitmask.
pub const USER_ACCOUNT_CONTROL: &str = "userAccountControl";

/// Default attribute POSIX groups use to reference their members.
pub const DEFAULT_POSIX_REF_ATTRIBUTE: &str = "uid";

/// Virtual attribute names. These never reach the schema mapping.
pub const VIRTUAL: &[&str] = &[LDAP_GROUPS, POSIX_GROUPS];

/// Check whether a name is one of the virtual group attributes.
#[must_use]
pub fn is_virtual(name: &str) -> bool {
    VIRTUAL.iter().any(|v| v.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_virtual() {
        assert!(is_virtual("ldapGroups"));
        assert!(is_virtual("POSIXGROUPS"));
        assert!(!is_virtual("memberOf"));
    }
}
