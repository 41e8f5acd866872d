//! Dynamic-update script renderer
//!
//! Line-oriented input for `nsupdate`:
//!
//! ```text
//! server 10.200.192.13
//! zone abc.com
//! update add test.abc.com 60 A 192.168.100.21
//! send
//! ```
//!
//! Record order is preserved; later lines may override earlier ones on the
//! server.

use crate::error::{Error, Result};
use crate::model::{BatchOperation, DomainBatch};
use std::fmt::Write;

/// Input for the update script renderer
#[derive(Debug, Clone, Copy)]
pub struct UpdateScript<'a> {
    server: &'a str,
    batch: &'a DomainBatch,
}

impl<'a> UpdateScript<'a> {
    /// Build the renderer input, validating the batch and server address
    pub fn new(server: &'a str, batch: &'a DomainBatch) -> Result<Self> {
        if server.is_empty() || server.contains(char::is_whitespace) {
            return Err(Error::validation(format!(
                "Invalid update server address '{}'",
                server
            )));
        }
        batch.validate()?;
        Ok(Self { server, batch })
    }

    /// Render the script
    pub fn render(&self) -> String {
        let zone = &self.batch.zone;
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "server {}", self.server);
        let _ = writeln!(out, "zone {}", zone);
        for record in &self.batch.records {
            let owner = record.owner_in(zone);
            match self.batch.operation {
                BatchOperation::Delete => {
                    let _ = writeln!(
                        out,
                        "update delete {} {} {}",
                        owner, record.ttl, record.record_type
                    );
                }
                BatchOperation::Add => {
                    let _ = writeln!(
                        out,
                        "update add {} {} {} {}",
                        owner,
                        record.ttl,
                        record.record_type,
                        record.value.trim()
                    );
                }
            }
        }
        let _ = writeln!(out, "send");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, RecordType};

    fn records() -> Vec<Record> {
        vec![
            Record::new("r1", RecordType::A, 60, "192.168.100.21"),
            Record::new("r2", RecordType::Cname, 300, "r1.abc.com."),
            Record::new("r3", RecordType::Txt, 3600, "\"v=spf1 -all\""),
        ]
    }

    #[test]
    fn delete_script() {
        let batch = DomainBatch::new(
            "abc.com",
            BatchOperation::Delete,
            vec![Record::new("test", RecordType::A, 60, "192.168.100.21")],
        );
        let script = UpdateScript::new("10.200.192.13", &batch).unwrap().render();
        assert_eq!(
            script,
            "server 10.200.192.13\nzone abc.com\nupdate delete test.abc.com 60 A\nsend\n"
        );
    }

    #[test]
    fn add_script_includes_values() {
        let batch = DomainBatch::new("abc.com", BatchOperation::Add, records());
        let script = UpdateScript::new("10.200.192.13", &batch).unwrap().render();
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(
            lines,
            vec![
                "server 10.200.192.13",
                "zone abc.com",
                "update add r1.abc.com 60 A 192.168.100.21",
                "update add r2.abc.com 300 CNAME r1.abc.com.",
                "update add r3.abc.com 3600 TXT \"v=spf1 -all\"",
                "send",
            ]
        );
    }

    #[test]
    fn delete_never_includes_values() {
        let batch = DomainBatch::new("abc.com", BatchOperation::Delete, records());
        let script = UpdateScript::new("ns1", &batch).unwrap().render();
        for record in records() {
            assert!(!script.contains(&record.value), "{}", record.value);
        }
    }

    #[test]
    fn preserves_record_order_for_both_operations() {
        for op in [BatchOperation::Add, BatchOperation::Delete] {
            let batch = DomainBatch::new("abc.com", op, records());
            let script = UpdateScript::new("ns1", &batch).unwrap().render();
            let owners: Vec<&str> = script
                .lines()
                .filter(|l| l.starts_with("update "))
                .map(|l| l.split_whitespace().nth(2).unwrap())
                .collect();
            assert_eq!(owners, vec!["r1.abc.com", "r2.abc.com", "r3.abc.com"]);
        }
    }

    #[test]
    fn apex_owner_renders_as_zone() {
        let batch = DomainBatch::new(
            "abc.com",
            BatchOperation::Add,
            vec![Record::new("@", RecordType::Mx, 300, "10 mail.abc.com.")],
        );
        let script = UpdateScript::new("ns1", &batch).unwrap().render();
        assert!(script.contains("update add abc.com 300 MX 10 mail.abc.com.\n"));
    }

    #[test]
    fn rejects_bad_server() {
        let batch = DomainBatch::new("abc.com", BatchOperation::Add, records());
        assert!(UpdateScript::new("", &batch).is_err());
        assert!(UpdateScript::new("ns1\nsend", &batch).is_err());
    }
}
