//! BucketGate CLI.
//!
//! ```text
//! bucketgate compile --bucket photos --file permissions.json --pretty
//! echo '{"read": ["public/"]}' | bucketgate compile --bucket photos
//! bucketgate url --bucket photos --key public/cat.png --public public/
//! bucketgate url --bucket photos --key private/doc.pdf --expires-in 600
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `S3_ENDPOINT_URL` | `http://127.0.0.1:9000` | Endpoint URLs are built against |
//! | `DEFAULT_REGION` | `us-east-1` | Signing region |
//! | `ACCESS_KEY` / `SECRET_KEY` | `minioadmin` | Signing key pair |
//! | `S3_BUCKET` | *(unset)* | Default for `--bucket` |
//! | `URL_EXPIRE_SECONDS` | `86400` | Default for `--expires-in` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bucketgate_access::{ResolvedUrl, StorageClient};
use bucketgate_core::GateConfig;
use bucketgate_memory::InMemoryGateway;
use bucketgate_policy::{PermissionSpecification, compile};

/// Compile bucket policies and resolve object URLs.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a permission specification into a bucket policy document.
    Compile(CompileArgs),
    /// Print the download URL of an object: plain if public, presigned otherwise.
    Url(UrlArgs),
}

#[derive(Debug, Args)]
struct CompileArgs {
    /// Bucket the policy is for.
    #[arg(short, long, env = "S3_BUCKET")]
    bucket: String,

    /// Permission specification JSON; read from stdin when omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Indent the output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Args)]
struct UrlArgs {
    /// Bucket holding the object.
    #[arg(short, long, env = "S3_BUCKET")]
    bucket: String,

    /// Object key.
    #[arg(short, long)]
    key: String,

    /// Public path pattern for the bucket; repeatable.
    #[arg(long = "public", value_name = "PATTERN")]
    public: Vec<String>,

    /// Lifetime of a presigned URL in seconds.
    #[arg(long, value_name = "SECS")]
    expires_in: Option<u64>,
}

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Compile `input` for `bucket`; `None` when the groups form no supported
/// combination.
fn compile_policy(input: &str, bucket: &str, pretty: bool) -> Result<Option<String>> {
    let spec = PermissionSpecification::from_json(input)
        .context("failed to parse permission specification")?;
    let Some(document) = compile(&spec, bucket) else {
        return Ok(None);
    };
    let json = if pretty {
        document.to_json_pretty()
    } else {
        document.to_json()
    };
    Ok(Some(json.context("failed to render policy")?))
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin"),
    }
}

fn resolve_url(args: &UrlArgs, config: &GateConfig, now: DateTime<Utc>) -> Result<ResolvedUrl> {
    let client = StorageClient::new(InMemoryGateway::new(config.clone()), config)
        .with_default_bucket(args.bucket.as_str());
    client.set_public_paths(None, args.public.iter().map(String::as_str))?;

    let expires_at = args
        .expires_in
        .map(|secs| {
            i64::try_from(secs)
                .ok()
                .and_then(Duration::try_seconds)
                .and_then(|ttl| now.checked_add_signed(ttl))
                .with_context(|| format!("--expires-in {secs} is out of range"))
        })
        .transpose()?;

    Ok(client
        .resolver()
        .resolve_url_at(&args.bucket, &args.key, expires_at, now)?)
}

fn run(cli: Cli, config: &GateConfig) -> Result<()> {
    match cli.command {
        Command::Compile(args) => {
            let input = read_input(args.file.as_ref())?;
            match compile_policy(&input, &args.bucket, args.pretty)? {
                Some(json) => println!("{json}"),
                None => debug!(bucket = %args.bucket, "no policy printed"),
            }
        }
        Command::Url(args) => {
            let resolved = resolve_url(&args, config, Utc::now())?;
            debug!(public = resolved.is_public(), "url resolved");
            println!("{resolved}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GateConfig::from_env();
    init_tracing(&config.log_level)?;
    debug!(?config, "loaded configuration");
    run(cli, &config)
}
