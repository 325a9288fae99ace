//! nodelock license tool
//!
//! Issues node-locked licenses on the vendor side and verifies them on the
//! customer machine.
//!
//! Usage:
//!   nodelock identity
//!   nodelock issue --vendor acme.com --application toolX --user u@acme.com \
//!       --project p1 --mac 70-F1-1C-11-58-0A --ip 192.168.1.10 \
//!       --validity 1 --unit years --out license.json --key-out license.key
//!   nodelock verify --license license.json --vendor acme.com --application toolX

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nodelock_cli::{identity_report, issue_to_files};
use nodelock_license::{
    IssueRequest, Issuer, NetworkClock, NodelockConfig, SystemClock, SystemIdentity, Validity,
    ValidityUnit, Verifier,
};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "nodelock")]
#[command(about = "Issue and verify node-locked licenses")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print this machine's IP and hardware addresses as JSON
    Identity,

    /// Issue a signed license for a customer machine
    Issue {
        #[arg(long)]
        vendor: String,
        #[arg(long)]
        application: String,
        #[arg(long)]
        user: String,
        #[arg(long)]
        project: String,
        /// Hardware address of the licensed machine
        #[arg(long)]
        mac: String,
        /// IP address of the licensed machine
        #[arg(long)]
        ip: String,
        /// Validity amount
        #[arg(long, default_value = "1")]
        validity: u32,
        /// Validity unit (days, weeks, months, years, ...)
        #[arg(long, default_value = "years")]
        unit: ValidityUnit,
        /// Where to write the license
        #[arg(short, long, default_value = "license.json")]
        out: PathBuf,
        /// Where to write the private key (printed to stdout when omitted)
        #[arg(long)]
        key_out: Option<PathBuf>,
    },

    /// Verify a license on this machine
    Verify {
        /// Path to the license file
        #[arg(short, long, default_value = "license.json")]
        license: PathBuf,
        #[arg(long)]
        vendor: String,
        #[arg(long)]
        application: String,
        /// Reference time in epoch milliseconds instead of the clock
        #[arg(long)]
        at: Option<i64>,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match &args.config {
        Some(path) => NodelockConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => NodelockConfig::default(),
    };

    match args.command {
        Command::Identity => {
            let identity = SystemIdentity::new(config.network.clone());
            let report = identity_report(&identity);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Issue {
            vendor,
            application,
            user,
            project,
            mac,
            ip,
            validity,
            unit,
            out,
            key_out,
        } => {
            let request = IssueRequest {
                vendor,
                application,
                user,
                project,
                mac,
                ip,
                validity: Validity::new(validity, unit),
            };
            let issuer = Issuer::with_config(SystemClock, &config.issuer);
            let issued = issue_to_files(&issuer, &request, &out, key_out.as_deref())?;
            if key_out.is_none() {
                println!("{}", issued.private_key.as_base64());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            license,
            vendor,
            application,
            at,
        } => {
            let verifier = Verifier::with_config(
                SystemIdentity::new(config.network.clone()),
                NetworkClock::new(config.network.clone()),
                &config.verifier,
            );
            if verifier.verify_file(&license, &vendor, &application, at) {
                info!(path = %license.display(), "license valid");
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
