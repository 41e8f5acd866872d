//! Minimal embedding example for zdns-core
//!
//! Connects to a nameserver, deletes `test.abc.com 60 A` from `abc.com`
//! through a dynamic update, then prints the zone status.
//!
//! ```bash
//! ZDNS_HOST=10.200.192.13 ZDNS_USER=root ZDNS_PASSWORD=... cargo run -p zdns-demos --bin record_batch
//! ```

use std::sync::Arc;
use zdns_core::{
    BatchOperation, DomainBatch, Record, RecordBatchManager, RecordType, Result, ServerTarget,
    Zone, ZoneManager, ZoneOperation,
};
use zdns_ssh::SshSession;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let target = ServerTarget::new(
        env_or("ZDNS_HOST", "10.200.192.13"),
        env_or("ZDNS_USER", "root"),
        env_or("ZDNS_PASSWORD", ""),
    );

    // One session for the whole run, shared by both managers
    let session = Arc::new(SshSession::connect(&target).await?);
    let records = RecordBatchManager::new(session.clone(), target.clone())?;
    let zones = ZoneManager::new(session.clone(), target)?;

    let batch = DomainBatch::new(
        "abc.com",
        BatchOperation::Delete,
        vec![Record::new("test", RecordType::A, 60, "192.168.100.21")],
    );

    if records.apply(&batch).await? {
        println!("Success!!");
    } else {
        println!("Failed");
    }

    let (status, ok) = zones
        .execute(&Zone::new("abc.com", ZoneOperation::Status))
        .await?;
    if ok {
        println!("{}", status);
    }

    session.disconnect().await
}
