//! Zone file renderer
//!
//! Emits an RFC 1035 master file with one SOA, one NS and one glue record
//! pointing the zone's `dns` label at the authoritative server.

use crate::error::{Error, Result};
use crate::model::validate_zone_name;
use std::fmt::Write;
use std::net::IpAddr;

/// Default TTL for the zone (`$TTL`)
pub const DEFAULT_TTL: u32 = 86400;
/// SOA serial of a freshly created zone
pub const SOA_SERIAL: u32 = 0;
/// SOA refresh (3 hours)
pub const SOA_REFRESH: u32 = 10800;
/// SOA retry (15 minutes)
pub const SOA_RETRY: u32 = 900;
/// SOA expire (1 week)
pub const SOA_EXPIRE: u32 = 604800;
/// SOA minimum / negative-caching TTL (1 day)
pub const SOA_MINIMUM: u32 = 86400;

/// Label of the zone's own nameserver inside the zone
const NS_LABEL: &str = "dns";

/// Label of the responsible mailbox in the SOA RNAME
const ADMIN_LABEL: &str = "admin";

/// Input for the zone file renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFile {
    /// Zone name, e.g. `abc.com`
    pub name: String,
    /// Authoritative server address for the glue record
    pub server: IpAddr,
}

impl ZoneFile {
    /// Build the renderer input, validating the zone name and server address
    pub fn new(name: &str, server: &str) -> Result<Self> {
        validate_zone_name(name)?;
        let server = server.trim().parse::<IpAddr>().map_err(|_| {
            Error::validation(format!(
                "Authoritative server '{}' for zone {} is not an IP address",
                server, name
            ))
        })?;
        Ok(Self {
            name: name.to_string(),
            server,
        })
    }

    /// Render the zone file
    ///
    /// Identical input always yields byte-identical output.
    pub fn render(&self) -> String {
        let name = &self.name;
        let glue_type = match self.server {
            IpAddr::V4(_) => "A",
            IpAddr::V6(_) => "AAAA",
        };

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "$TTL {DEFAULT_TTL}\t; 1 day");
        let _ = writeln!(
            out,
            "@\tIN\tSOA\t{NS_LABEL}.{name}. {ADMIN_LABEL}.{name}. ("
        );
        let _ = writeln!(out, "\t\t{SOA_SERIAL}\t; serial");
        let _ = writeln!(out, "\t\t{SOA_REFRESH}\t; refresh (3 hours)");
        let _ = writeln!(out, "\t\t{SOA_RETRY}\t; retry (15 minutes)");
        let _ = writeln!(out, "\t\t{SOA_EXPIRE}\t; expire (1 week)");
        let _ = writeln!(out, "\t\t{SOA_MINIMUM}\t; minimum (1 day)");
        let _ = writeln!(out, "\t\t)");
        let _ = writeln!(out, "@\tIN\tNS\t{NS_LABEL}.{name}.");
        let _ = writeln!(out, "{NS_LABEL}\tIN\t{glue_type}\t{}", self.server);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: &str = "$TTL 86400\t; 1 day
@\tIN\tSOA\tdns.abc.com. admin.abc.com. (
\t\t0\t; serial
\t\t10800\t; refresh (3 hours)
\t\t900\t; retry (15 minutes)
\t\t604800\t; expire (1 week)
\t\t86400\t; minimum (1 day)
\t\t)
@\tIN\tNS\tdns.abc.com.
dns\tIN\tA\t10.200.192.13
";

    #[test]
    fn renders_fixed_layout() {
        let zone = ZoneFile::new("abc.com", "10.200.192.13").unwrap();
        assert_eq!(zone.render(), EXPECTED);
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = ZoneFile::new("abc.com", "10.200.192.13").unwrap().render();
        let b = ZoneFile::new("abc.com", "10.200.192.13").unwrap().render();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn ipv6_server_gets_aaaa_glue() {
        let zone = ZoneFile::new("abc.com", "2001:db8::53").unwrap();
        assert!(zone.render().ends_with("dns\tIN\tAAAA\t2001:db8::53\n"));
    }

    #[test]
    fn rejects_non_ip_server_and_bad_names() {
        assert!(matches!(
            ZoneFile::new("abc.com", "ns1.abc.com"),
            Err(Error::Validation(_))
        ));
        assert!(ZoneFile::new("abc.com", "").is_err());
        assert!(ZoneFile::new("abc com", "10.0.0.1").is_err());
    }
}
