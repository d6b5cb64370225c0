//! Attribute-set resolution tests.
//!
//! Run with: cargo test -p adbridge-connector-ad --test resolver_tests

mod common;

use adbridge_connector::prelude::*;
use adbridge_connector_ad::attributes::{LDAP_GROUPS, POSIX_GROUPS, USER_ACCOUNT_CONTROL};

use common::*;

#[test]
fn test_default_attributes_for_account() {
    let mapper = sample_mapper();
    let logical = mapper.attributes_to_get(None, &ObjectClass::Account);

    for name in [
        "sAMAccountName",
        "cn",
        "email",
        operational::NAME,
        operational::UID,
        USER_ACCOUNT_CONTROL,
    ] {
        assert!(logical.contains(name), "missing {name}");
    }
    assert!(!logical.contains("memberOf"));
    assert!(!logical.contains(operational::PASSWORD));
    assert!(!logical.contains("thumbnailPhoto"));
}

#[test]
fn test_default_attributes_for_any_class() {
    let mapper = sample_mapper();

    let defaults = mapper.returned_by_default(&ObjectClass::Any);
    assert_eq!(defaults.into_vec(), vec![operational::NAME.to_string()]);

    let logical = mapper.attributes_to_get(None, &ObjectClass::Any);
    assert_eq!(logical.len(), 3);
    assert!(logical.contains(operational::NAME));
    assert!(logical.contains(operational::UID));
    assert!(logical.contains(USER_ACCOUNT_CONTROL));
}

#[test]
fn test_requested_attributes_drop_unreadable() {
    let mapper = sample_mapper();
    let requested = names(&["email", "thumbnailPhoto", "uSNChanged"]);

    let logical = mapper.attributes_to_get(Some(&requested), &ObjectClass::Account);

    assert!(logical.contains("email"));
    assert!(logical.contains("uSNChanged"));
    assert!(!logical.contains("thumbnailPhoto"));
    assert!(logical.contains(operational::NAME));
    assert!(logical.contains(operational::UID));
    assert!(logical.contains(USER_ACCOUNT_CONTROL));
    assert!(!logical.contains("sAMAccountName"));
}

#[test]
fn test_virtual_group_attributes_bypass_readability() {
    let mapper = sample_mapper();
    let requested = names(&["LDAPGROUPS", POSIX_GROUPS]);

    let logical = mapper.attributes_to_get(Some(&requested), &ObjectClass::Account);

    assert!(logical.contains(LDAP_GROUPS));
    assert!(logical.contains(POSIX_GROUPS));
    // The caller's spelling is kept.
    assert_eq!(logical.get(LDAP_GROUPS), Some("LDAPGROUPS"));
}

#[test]
fn test_password_request_is_kept() {
    let mapper = sample_mapper();
    let requested = names(&[operational::PASSWORD]);

    let logical = mapper.attributes_to_get(Some(&requested), &ObjectClass::Account);

    assert!(logical.contains(operational::PASSWORD));
}

#[test]
fn test_requested_names_are_case_insensitive() {
    let mapper = sample_mapper();
    let requested = names(&["Email", "__uid__", "USERACCOUNTCONTROL"]);

    let logical = mapper.attributes_to_get(Some(&requested), &ObjectClass::Account);

    // Nothing is duplicated under a second spelling.
    assert_eq!(logical.len(), 4);
    assert_eq!(logical.get("email"), Some("Email"));
}

#[test]
fn test_uid_and_account_control_always_present() {
    let mapper = sample_mapper();
    let classes = [
        ObjectClass::Account,
        ObjectClass::Group,
        ObjectClass::Any,
        ObjectClass::Other("printer".to_string()),
    ];

    for object_class in &classes {
        for requested in [None, Some(names(&[])), Some(names(&["cn", "thumbnailPhoto"]))] {
            let logical = mapper.attributes_to_get(requested.as_ref(), object_class);
            assert!(logical.contains(operational::UID), "{object_class}");
            assert!(logical.contains(USER_ACCOUNT_CONTROL), "{object_class}");
            if *object_class == ObjectClass::Account {
                assert!(!logical.contains("thumbnailPhoto"));
            }
        }
    }
}

#[test]
fn test_directory_attributes() {
    let mapper = sample_mapper();
    let logical = mapper.attributes_to_get(
        Some(&names(&["email", LDAP_GROUPS, POSIX_GROUPS])),
        &ObjectClass::Account,
    );

    let physical = mapper
        .directory_attributes_to_get(&logical, &ObjectClass::Account)
        .unwrap();

    assert!(physical.contains("mail"));
    assert!(physical.contains("objectGUID"));
    assert!(physical.contains(USER_ACCOUNT_CONTROL));
    assert!(physical.contains("uid"));
    assert!(!physical.contains(LDAP_GROUPS));
    assert!(!physical.contains(POSIX_GROUPS));
    assert!(!physical.contains("email"));
    assert!(!physical.contains(operational::NAME));
    assert_eq!(physical.len(), 4);
}

#[test]
fn test_directory_attributes_without_posix_groups() {
    let mapper = sample_mapper();
    let logical = names(&[operational::UID, LDAP_GROUPS]);

    let physical = mapper
        .directory_attributes_to_get(&logical, &ObjectClass::Account)
        .unwrap();

    assert_eq!(physical.into_vec(), vec!["objectGUID".to_string()]);
}

#[test]
fn test_directory_attributes_unknown_class() {
    let mapper = sample_mapper();
    let err = mapper
        .directory_attributes_to_get(&names(&["cn"]), &ObjectClass::Other("printer".to_string()))
        .unwrap_err();

    assert_eq!(err.error_code(), "OBJECT_CLASS_NOT_FOUND");
    assert!(err.is_permanent());
}
