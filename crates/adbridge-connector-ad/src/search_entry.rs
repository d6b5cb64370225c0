//! Conversion from `ldap3` search results.

use ldap3::SearchEntry;

use adbridge_connector::entry::DirectoryEntry;

/// Convert a search result into a [`DirectoryEntry`] found under `base_dn`.
///
/// `ldap3` splits values it could not decode as UTF-8 into `bin_attrs`;
/// those are kept as binary values so identifiers like `objectGUID`
/// survive intact.
pub fn entry_from_search(base_dn: &str, entry: SearchEntry) -> DirectoryEntry {
    let mut result = DirectoryEntry::new(base_dn, entry.dn);

    for (name, values) in entry.attrs {
        if !values.is_empty() {
            result = result.with_values(name, values);
        }
    }

    for (name, values) in entry.bin_attrs {
        if !values.is_empty() {
            result = result.with_binary_values(name, values);
        }
    }

    result
}
