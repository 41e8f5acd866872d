//! Artifact renderers
//!
//! Two small structured renderers replace text templates:
//!
//! - [`ZoneFile`]: the initial zone file uploaded by zone creation
//! - [`UpdateScript`]: the batch script fed to the dynamic-update tool
//!
//! Both render to a `String` with no I/O, and both can write straight into
//! a caller-owned temporary file via [`write_temp`].

pub mod nsupdate;
pub mod zone_file;

pub use nsupdate::UpdateScript;
pub use zone_file::ZoneFile;

use crate::error::Result;
use std::io::Write;
use tempfile::NamedTempFile;

/// Write rendered text into a fresh temporary file
///
/// The returned handle owns the file: dropping it closes and removes the
/// file, on every exit path of the caller.
pub fn write_temp(prefix: &str, content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().prefix(prefix).tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}
