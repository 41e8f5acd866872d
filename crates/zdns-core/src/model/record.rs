//! Resource records and record batches

use crate::error::{Error, Result};
use crate::model::names::{validate_owner_name, validate_zone_name};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Cname,
    Ns,
    Soa,
    Aaaa,
    Txt,
    Mx,
    Ptr,
    Srv,
    Url,
}

impl RecordType {
    /// Presentation mnemonic
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Cname => "CNAME",
            RecordType::Ns => "NS",
            RecordType::Soa => "SOA",
            RecordType::Aaaa => "AAAA",
            RecordType::Txt => "TXT",
            RecordType::Mx => "MX",
            RecordType::Ptr => "PTR",
            RecordType::Srv => "SRV",
            RecordType::Url => "URL",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "CNAME" => Ok(RecordType::Cname),
            "NS" => Ok(RecordType::Ns),
            "SOA" => Ok(RecordType::Soa),
            "AAAA" => Ok(RecordType::Aaaa),
            "TXT" => Ok(RecordType::Txt),
            "MX" => Ok(RecordType::Mx),
            "PTR" => Ok(RecordType::Ptr),
            "SRV" => Ok(RecordType::Srv),
            "URL" => Ok(RecordType::Url),
            other => Err(Error::validation(format!("Unsupported record type '{}'", other))),
        }
    }
}

/// A resource record inside a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Owner name relative to the zone (`test` → `test.<zone>`)
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Time-to-live in seconds
    pub ttl: u32,

    /// Record data; ignored for deletions
    #[serde(default, alias = "addr")]
    pub value: String,

    /// Free-text description, never sent to the server
    #[serde(default, alias = "desc")]
    pub description: String,
}

impl Record {
    /// Create a record
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        ttl: u32,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            value: value.into(),
            description: String::new(),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Fully qualified owner name inside `zone`
    pub fn owner_in(&self, zone: &str) -> String {
        if self.name == "@" {
            zone.to_string()
        } else {
            format!("{}.{}", self.name, zone)
        }
    }
}

/// Batch operation: every record in a batch is added or every record is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOperation {
    Add,
    #[serde(alias = "del")]
    Delete,
}

impl BatchOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchOperation::Add => "add",
            BatchOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for BatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(BatchOperation::Add),
            "delete" | "del" => Ok(BatchOperation::Delete),
            other => Err(Error::validation(format!(
                "Unknown record operation '{}'. Only add and delete are accepted",
                other
            ))),
        }
    }
}

/// One dynamic-update submission against a single zone
///
/// Records are applied in order; the batch is one intent but not a
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainBatch {
    /// Records, in submission order
    pub records: Vec<Record>,

    /// Target zone name
    pub zone: String,

    /// Add or delete
    pub operation: BatchOperation,
}

impl DomainBatch {
    /// Create a batch
    pub fn new(zone: impl Into<String>, operation: BatchOperation, records: Vec<Record>) -> Self {
        Self {
            records,
            zone: zone.into(),
            operation,
        }
    }

    /// Check everything that ends up in the rendered script
    pub fn validate(&self) -> Result<()> {
        validate_zone_name(&self.zone)?;
        if self.records.is_empty() {
            return Err(Error::validation(format!(
                "Record batch for zone {} is empty",
                self.zone
            )));
        }
        for record in &self.records {
            validate_owner_name(&record.name)?;
            if record.value.contains(['\n', '\r']) {
                return Err(Error::validation(format!(
                    "Record {} value contains a line break",
                    record.name
                )));
            }
            if self.operation == BatchOperation::Add && record.value.trim().is_empty() {
                return Err(Error::validation(format!(
                    "Record {} has no value to add",
                    record.name
                )));
            }
        }
        Ok(())
    }
}
