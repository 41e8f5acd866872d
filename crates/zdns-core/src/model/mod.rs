//! Data model: zone requests, records and record batches

pub mod names;
pub mod record;
pub mod zone;

pub use names::{validate_owner_name, validate_zone_name};
pub use record::{BatchOperation, DomainBatch, Record, RecordType};
pub use zone::{Zone, ZoneOperation};
