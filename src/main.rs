//! signed-submit - sign and submit an application payload

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signed_submit::config::{load_signing_secret, ClientConfig};
use signed_submit::payload::SystemClock;
use signed_submit::resolve::{FieldOverrides, ProcessEnv};
use signed_submit::{Orchestrator, SubmissionClient};

#[derive(Parser, Debug)]
#[command(name = "signed-submit")]
#[command(about = "Sign a canonical JSON application payload and submit it")]
struct Args {
    /// Submission endpoint (overrides SUBMIT_URL; defaults to the public endpoint)
    #[arg(long)]
    url: Option<String>,

    /// Request timeout in seconds (overrides SUBMIT_TIMEOUT_SECS; defaults to 30)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Shared HMAC signing secret
    ///
    /// A value passed on the command line shows up in the process list;
    /// prefer the environment variable or --signing-secret-file.
    #[arg(long, env = "SUBMIT_SIGNING_SECRET", hide_env_values = true)]
    signing_secret: Option<String>,

    /// File holding the shared HMAC signing secret
    #[arg(long, env = "SUBMIT_SIGNING_SECRET_FILE")]
    signing_secret_file: Option<PathBuf>,

    /// Log level (logs go to stderr)
    #[arg(long, env = "SUBMIT_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Print the signed body and signature header instead of sending
    #[arg(long)]
    dry_run: bool,

    /// Applicant name (overrides B12_NAME)
    #[arg(long)]
    name: Option<String>,

    /// Applicant email (overrides B12_EMAIL)
    #[arg(long)]
    email: Option<String>,

    /// Resume link (overrides B12_RESUME_LINK)
    #[arg(long)]
    resume_link: Option<String>,

    /// Repository link (overrides B12_REPOSITORY_LINK and the GitHub context)
    #[arg(long)]
    repository_link: Option<String>,

    /// Action run link (overrides B12_ACTION_RUN_LINK and the GitHub context)
    #[arg(long)]
    action_run_link: Option<String>,
}

impl Args {
    fn overrides(&self) -> FieldOverrides {
        FieldOverrides {
            name: self.name.clone(),
            email: self.email.clone(),
            resume_link: self.resume_link.clone(),
            repository_link: self.repository_link.clone(),
            action_run_link: self.action_run_link.clone(),
        }
    }
}

fn run(args: &Args) -> anyhow::Result<String> {
    let secret = load_signing_secret(
        args.signing_secret.as_deref(),
        args.signing_secret_file.as_deref(),
    )?;

    let env = ProcessEnv;
    let clock = SystemClock;
    let orchestrator = Orchestrator::new(&env, args.overrides(), &clock, secret);

    if args.dry_run {
        let signed = orchestrator.prepare()?;
        return Ok(format!(
            "{}\n{}",
            signed.body_str(),
            signed.signature.header_value()
        ));
    }

    let config =
        ClientConfig::from_env()?.with_overrides(args.url.as_deref(), args.timeout_secs);
    let client = SubmissionClient::new(&config).context("cannot build submission client")?;

    Ok(orchestrator.run(&client)?)
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting signed-submit v{}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Submission failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
