use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::Clock;
use provider::{InMemoryCheckout, Provider, RemoteConfig};
use services::{AppServices, SessionConfig, UpgradeConfig};
use ui::{App, build_app_context};

mod demo;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => {
                write!(f, "invalid {flag} value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--budget-secs <n>] [--grace-secs <n>] [--free-limit <n|none>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --budget-secs 60   --grace-secs 2   --free-limit 5");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_PROVIDER_URL, EXAM_PROVIDER_KEY, EXAM_PROVIDER_TOKEN  (remote backend)");
    eprintln!("  EXAM_BUDGET_SECS, EXAM_GRACE_SECS, EXAM_FREE_LIMIT");
}

struct Args {
    session: SessionConfig,
}

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}

fn parse_limit(flag: &'static str, raw: &str) -> Result<Option<u32>, ArgsError> {
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| ArgsError::InvalidNumber {
            flag,
            raw: raw.to_string(),
        })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut session = SessionConfig::default();
        if let Some(budget) = env_u32("EXAM_BUDGET_SECS") {
            session.question_budget_secs = budget;
        }
        if let Some(grace) = env_u32("EXAM_GRACE_SECS") {
            session.expiry_grace_secs = grace;
        }
        if let Ok(raw) = std::env::var("EXAM_FREE_LIMIT") {
            if let Ok(limit) = parse_limit("EXAM_FREE_LIMIT", &raw) {
                session.free_question_limit = limit;
            }
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--budget-secs" => {
                    let value = require_value(args, "--budget-secs")?;
                    session.question_budget_secs =
                        value.parse().map_err(|_| ArgsError::InvalidNumber {
                            flag: "--budget-secs",
                            raw: value.clone(),
                        })?;
                }
                "--grace-secs" => {
                    let value = require_value(args, "--grace-secs")?;
                    session.expiry_grace_secs =
                        value.parse().map_err(|_| ArgsError::InvalidNumber {
                            flag: "--grace-secs",
                            raw: value.clone(),
                        })?;
                }
                "--free-limit" => {
                    let value = require_value(args, "--free-limit")?;
                    session.free_question_limit = parse_limit("--free-limit", &value)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { session })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Remote backend when configured, otherwise a seeded in-memory demo.
    // The checkout widget is the scripted stand-in either way; the real
    // widget belongs to the hosted deployment.
    let provider = match RemoteConfig::from_env() {
        Some(config) => Provider::remote(config, Arc::new(InMemoryCheckout::approving())),
        None => {
            eprintln!("EXAM_PROVIDER_URL/KEY not set; using the in-memory demo backend");
            let (provider, backend) = Provider::in_memory();
            demo::seed(&backend)?;
            provider
        }
    };

    let services = AppServices::new(
        &provider,
        Clock::default_clock(),
        args.session,
        UpgradeConfig::default(),
    );
    let context = build_app_context(services);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Exam Practice")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

// The runtime context lets views drive their tick loops with tokio::time.
#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
