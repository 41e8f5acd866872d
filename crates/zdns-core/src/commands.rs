//! Remote command lines
//!
//! Every string the orchestrator sends to the remote shell is built here.
//! Callers validate names before building a command; nothing in this module
//! quotes or escapes.

/// Reload server configuration and all zones
pub fn reload() -> String {
    "rndc reload".to_string()
}

/// Write journal changes to the zone file and remove the journal
pub fn sync_clean(zone: &str) -> String {
    format!("rndc sync -clean {}", zone)
}

/// Purge cached records for a name
pub fn flush_name(zone: &str) -> String {
    format!("rndc flushname {}", zone)
}

/// Query zone status
pub fn zone_status(zone: &str) -> String {
    format!("rndc zonestatus {}", zone)
}

/// Full syntax and semantic check of a zone file
pub fn check_zone(zone: &str, zone_file_path: &str) -> String {
    format!("named-checkzone -i full -q -s full {} {}", zone, zone_file_path)
}

/// Register a master zone without a full reload
///
/// `file_reference` is resolved by `named` relative to its working directory.
pub fn add_zone(zone: &str, file_reference: &str) -> String {
    format!(
        "rndc addzone {} '{{ type master; file \"{}\"; allow-update{{any;}};}};'",
        zone, file_reference
    )
}

/// Deregister a zone and remove its files
pub fn delete_zone(zone: &str) -> String {
    format!("rndc delzone -clean {}", zone)
}

/// Stop accepting dynamic updates
pub fn freeze(zone: &str) -> String {
    format!("rndc freeze {}", zone)
}

/// Resume accepting dynamic updates
pub fn thaw(zone: &str) -> String {
    format!("rndc thaw {}", zone)
}

/// Run a staged dynamic-update script
pub fn nsupdate(script_path: &str) -> String {
    format!("nsupdate -v {}", script_path)
}

/// Exit 0 iff `path` exists
pub fn test_exists(path: &str) -> String {
    format!("test -e {}", path)
}

/// Remove a file, ignoring absence
pub fn remove_file(path: &str) -> String {
    format!("rm -f {}", path)
}
