//! DNS name checks applied before a name is interpolated into a remote
//! command line or a rendered artifact.

use crate::error::{Error, Result};

/// Maximum presentation length of a domain name (RFC 1035)
const MAX_NAME_LEN: usize = 253;

/// Maximum length of a single label (RFC 1035)
const MAX_LABEL_LEN: usize = 63;

/// Validate a zone name such as `abc.com` or `100.168.192.in-addr.arpa`
pub fn validate_zone_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation("Zone name cannot be empty"));
    }
    check_length(name)?;
    for label in name.split('.') {
        check_label(name, label)?;
    }
    Ok(())
}

/// Validate a record owner name relative to its zone
///
/// Accepts `@` for the apex and a leading `*` label for wildcards.
pub fn validate_owner_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation("Record name cannot be empty"));
    }
    if name == "@" {
        return Ok(());
    }
    check_length(name)?;
    for (i, label) in name.split('.').enumerate() {
        if i == 0 && label == "*" {
            continue;
        }
        check_label(name, label)?;
    }
    Ok(())
}

fn check_length(name: &str) -> Result<()> {
    if name.len() > MAX_NAME_LEN {
        return Err(Error::validation(format!(
            "Domain name too long: {} chars (max {}). Got: {}",
            name.len(),
            MAX_NAME_LEN,
            name
        )));
    }
    Ok(())
}

fn check_label(name: &str, label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(Error::validation(format!(
            "Domain name has empty label: '{}'",
            name
        )));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(Error::validation(format!(
            "Domain label too long: {} chars (max {}). Label: '{}'",
            label.len(),
            MAX_LABEL_LEN,
            label
        )));
    }
    if !label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::validation(format!(
            "Domain label contains invalid characters. Label: '{}'",
            label
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(Error::validation(format!(
            "Domain label cannot start or end with hyphen. Label: '{}'",
            label
        )));
    }
    Ok(())
}
