// # zdnsctl - ZDNS command-line driver
//
// A THIN integration layer: parse input, set up logging, open one SSH
// session, issue one zone operation or one record batch, map the outcome to
// an exit code. All orchestration logic lives in zdns-core.
//
// ## Configuration
//
// Connection settings come from flags or environment variables:
//
// - `ZDNS_HOST`: Nameserver host
// - `ZDNS_PORT`: SSH port (default 22)
// - `ZDNS_USER`: Login user
// - `ZDNS_PASSWORD`: Login password
// - `ZDNS_ZONE_DIR`: Remote zone directory (default /var/named/zone)
// - `ZDNS_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export ZDNS_HOST=10.200.192.13 ZDNS_USER=root ZDNS_PASSWORD=...
//
// zdnsctl zone create abc.com
// zdnsctl zone status abc.com
// zdnsctl records batch.json
// ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use zdns_core::{DomainBatch, RecordBatchManager, ServerTarget, ZoneManager};
use zdns_ssh::SshSession;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum ZdnsExitCode {
    /// The operation succeeded
    Success = 0,
    /// Configuration or input error; nothing was sent
    ConfigError = 1,
    /// Session, dispatch or local I/O failure
    RuntimeError = 2,
    /// The remote side reported failure
    OperationFailed = 3,
}

impl From<ZdnsExitCode> for ExitCode {
    fn from(code: ZdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser)]
#[command(name = "zdnsctl")]
#[command(about = "Administer BIND zones and records over SSH", long_about = None)]
#[command(version)]
struct Cli {
    /// Nameserver host
    #[arg(long, env = "ZDNS_HOST")]
    host: String,

    /// SSH port
    #[arg(long, env = "ZDNS_PORT", default_value_t = 22)]
    port: u16,

    /// Login user
    #[arg(long, env = "ZDNS_USER")]
    user: String,

    /// Login password
    #[arg(long, env = "ZDNS_PASSWORD", hide_env_values = true)]
    password: String,

    /// Remote directory holding zone files
    #[arg(long, env = "ZDNS_ZONE_DIR", default_value = "/var/named/zone")]
    zone_dir: String,

    /// Log level
    #[arg(long, env = "ZDNS_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a zone operation
    Zone {
        /// create, delete, pause, thaw, flush, sync, reload or status
        operation: String,

        /// Zone name (not needed for reload)
        #[arg(default_value = "")]
        name: String,

        /// Authoritative server address (defaults to --host)
        #[arg(long)]
        server: Option<String>,
    },

    /// Apply a record batch read from a JSON file
    Records {
        /// Path to a JSON document: {"zone": .., "operation": "add"|"delete", "records": [..]}
        file: PathBuf,
    },
}

impl Cli {
    fn target(&self) -> ServerTarget {
        ServerTarget::new(&self.host, &self.user, &self.password)
            .with_port(self.port)
            .with_zone_dir(&self.zone_dir)
    }
}

/// Work resolved from the command line before any connection is made
enum Job {
    Zone {
        operation: String,
        name: String,
        server: Option<String>,
    },
    Records(DomainBatch),
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => anyhow::bail!(
            "ZDNS_LOG_LEVEL '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            other
        ),
    }
}

fn load_batch(path: &Path) -> Result<DomainBatch> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read batch file {}", path.display()))?;
    let batch: DomainBatch = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid batch file {}", path.display()))?;
    batch.validate()?;
    Ok(batch)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match parse_log_level(&cli.log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ZdnsExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ZdnsExitCode::ConfigError.into();
    }

    let target = cli.target();
    if let Err(e) = target.validate() {
        error!("Configuration validation error: {}", e);
        return ZdnsExitCode::ConfigError.into();
    }

    let job = match cli.command {
        Commands::Zone {
            operation,
            name,
            server,
        } => Job::Zone {
            operation,
            name,
            server,
        },
        Commands::Records { file } => match load_batch(&file) {
            Ok(batch) => Job::Records(batch),
            Err(e) => {
                error!("{:#}", e);
                return ZdnsExitCode::ConfigError.into();
            }
        },
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ZdnsExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run(target, job).await {
            Ok(true) => ZdnsExitCode::Success,
            Ok(false) => ZdnsExitCode::OperationFailed,
            Err(e) => {
                error!("{:#}", e);
                ZdnsExitCode::RuntimeError
            }
        }
    });

    code.into()
}

/// Open the session, run the job, close the session
async fn run(target: ServerTarget, job: Job) -> Result<bool> {
    let session = Arc::new(
        SshSession::connect(&target)
            .await
            .with_context(|| format!("Cannot establish session with {}", target.address()))?,
    );

    let outcome = match job {
        Job::Zone {
            operation,
            name,
            server,
        } => match ZoneManager::new(session.clone(), target) {
            Ok(zones) => zones
                .execute_raw(&name, server.as_deref(), &operation)
                .await
                .map(|(text, ok)| {
                    if !text.is_empty() {
                        print!("{}", text);
                    }
                    ok
                }),
            Err(e) => Err(e),
        },
        Job::Records(batch) => match RecordBatchManager::new(session.clone(), target) {
            Ok(records) => records.apply(&batch).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = session.disconnect().await {
        warn!("{}", e);
    }

    let ok = outcome?;
    if ok {
        info!("Success");
    } else {
        warn!("Operation failed");
    }
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn log_levels() {
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn cli_parses_zone_command_with_env_style_flags() {
        let cli = Cli::try_parse_from([
            "zdnsctl", "--host", "10.200.192.13", "--user", "root", "--password", "pw",
            "zone", "status", "abc.com",
        ])
        .unwrap();
        let target = cli.target();
        assert_eq!(target.port, 22);
        assert_eq!(target.zone_dir, "/var/named/zone");
        match cli.command {
            Commands::Zone {
                operation, name, ..
            } => {
                assert_eq!(operation, "status");
                assert_eq!(name, "abc.com");
            }
            Commands::Records { .. } => panic!("expected zone command"),
        }
    }

    #[test]
    fn batch_file_is_validated_before_connecting() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        write!(
            good,
            r#"{{"zone":"abc.com","operation":"del",
                "records":[{{"name":"test","type":"A","ttl":60,"addr":"192.168.100.21"}}]}}"#
        )
        .unwrap();
        let batch = load_batch(good.path()).unwrap();
        assert_eq!(batch.records.len(), 1);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, r#"{{"zone":"abc.com","operation":"replace","records":[]}}"#).unwrap();
        assert!(load_batch(bad.path()).is_err());

        let mut empty = tempfile::NamedTempFile::new().unwrap();
        write!(empty, r#"{{"zone":"abc.com","operation":"add","records":[]}}"#).unwrap();
        assert!(load_batch(empty.path()).is_err());
    }
}
