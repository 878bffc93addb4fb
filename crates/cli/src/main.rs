use anyhow::Context;
use clap::Parser;
use ferrous_nsupdate_application::use_cases::{ReplaceRecordsParams, ReplaceRecordsUseCase};
use ferrous_nsupdate_domain::{CliOverrides, Config, UpdateOutcome};
use ferrous_nsupdate_infrastructure::dns::DnsUpdater;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

mod bootstrap;

#[derive(Parser)]
#[command(name = "ferrous-nsupdate")]
#[command(version)]
#[command(about = "Replace DNS records on a primary server with a TSIG-signed dynamic update")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// TSIG key name
    #[arg(long)]
    key_name: Option<String>,

    /// Base64-encoded TSIG secret
    #[arg(long)]
    secret: Option<String>,

    /// TSIG algorithm (hmac-md5, hmac-sha1, hmac-sha224, hmac-sha256, hmac-sha384, hmac-sha512)
    #[arg(long)]
    algorithm: Option<String>,

    /// Primary server: IP, IP:PORT, [IPv6]:PORT or HOST[:PORT]
    #[arg(short = 's', long)]
    server: Option<String>,

    /// Zone to update
    #[arg(short = 'z', long)]
    zone: String,

    /// Name to replace, relative to the zone ("@" for the apex)
    #[arg(short = 'd', long)]
    domain: String,

    /// IPv4 address for the A record
    #[arg(long = "a", value_name = "IPV4")]
    a: String,

    /// IPv6 address for the AAAA record
    #[arg(long = "aaaa", value_name = "IPV6")]
    aaaa: Option<String>,

    /// TXT data, one character-string per whitespace-separated token
    #[arg(long)]
    txt: Option<String>,

    /// TTL for all records
    #[arg(long)]
    ttl: Option<u32>,

    /// Timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server: cli.server.clone(),
        timeout_secs: cli.timeout,
        key_name: cli.key_name.clone(),
        key_secret: cli.secret.take(),
        key_algorithm: cli.algorithm.clone(),
        default_ttl: cli.ttl,
        log_level: cli.log_level.clone(),
    };

    let mut config = match bootstrap::load_config(cli.config.as_deref(), cli_overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    bootstrap::init_logging(&config);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, abandoning the update");
                cancel.cancel();
            }
        });
    }

    match run(&cli, &mut config, cancel).await {
        Ok(outcome) => report(&outcome, cli.json),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(
    cli: &Cli,
    config: &mut Config,
    cancel: CancellationToken,
) -> anyhow::Result<UpdateOutcome> {
    let key_name = config
        .key
        .name
        .clone()
        .context("no TSIG key name: pass --key-name or set [key] name")?;
    let server = config
        .server
        .address
        .clone()
        .context("no server: pass --server or set [server] address")?;
    // Moved out last so the use case's wipe covers the only copy.
    let secret = config
        .key
        .secret
        .take()
        .context("no TSIG secret: pass --secret or set [key] secret")?;

    let params = ReplaceRecordsParams {
        key_name,
        secret,
        algorithm: Some(config.key.algorithm.clone()),
        server,
        zone: cli.zone.clone(),
        domain: cli.domain.clone(),
        a_rdata: cli.a.clone(),
        aaaa_rdata: cli.aaaa.clone(),
        txt_rdata: cli.txt.clone(),
        ttl: Some(u64::from(config.update.default_ttl)),
        timeout: Some(Duration::from_secs(config.server.timeout_secs)),
    };

    debug!(zone = %params.zone, domain = %params.domain, server = %params.server, "Prepared update");

    let use_case = ReplaceRecordsUseCase::new(Arc::new(DnsUpdater::with_cancellation(cancel)));
    let outcome = use_case.execute(params).await?;
    Ok(outcome)
}

fn report(outcome: &UpdateOutcome, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string(outcome) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("error: failed to serialise outcome: {}", e),
        }
    } else if outcome.changed {
        println!("{}", outcome.msg);
    } else {
        eprintln!("{}", outcome.describe());
    }

    if outcome.changed {
        ExitCode::SUCCESS
    } else if outcome.fatal {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
