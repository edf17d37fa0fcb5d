//! Comment overlay - Entry Point

use clap::Parser;
use comment_overlay::document::SnapshotDocument;
use comment_overlay::model::{AppError, Point, Size};
use comment_overlay::report::{simulate, Scenario};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Lay out comment bubbles in a document snapshot and print where they land
#[derive(Parser, Debug)]
#[command(name = "comment-overlay")]
#[command(version)]
#[command(about = "Lay out comment bubbles in a document snapshot and report their positions")]
pub struct Args {
    /// Path to the JSON document snapshot
    pub snapshot: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scroll the window to X,Y after startup
    #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
    pub scroll: Option<(f64, f64)>,

    /// Resize the window to W,H after startup
    #[arg(long, value_name = "W,H", value_parser = parse_size, allow_hyphen_values = true)]
    pub resize: Option<(f64, f64)>,

    /// Click at document position X,Y (repeatable)
    #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
    pub click: Vec<(f64, f64)>,

    /// Override a layout token, e.g. --token=--comment-gap=1rem (repeatable)
    #[arg(long, value_name = "NAME=VALUE", value_parser = parse_token)]
    pub token: Vec<(String, String)>,

    /// Print the report on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Parse `X,Y` into a pair of finite numbers.
fn parse_pair(raw: &str) -> Result<(f64, f64), String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {:?}", raw))?;
    let number = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("{:?} is not a finite number", part.trim()))
    };
    Ok((number(x)?, number(y)?))
}

/// Parse `W,H` into a non-negative size.
fn parse_size(raw: &str) -> Result<(f64, f64), String> {
    let (w, h) = parse_pair(raw)?;
    if w < 0.0 || h < 0.0 {
        return Err(format!("size {}x{} must not be negative", w, h));
    }
    Ok((w, h))
}

/// Parse `NAME=VALUE`.
fn parse_token(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("token name must not be empty".to_string());
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file =
            comment_overlay::config::load_config_with_precedence(args.config.clone())?;
        let merged = comment_overlay::config::merge_config(config_file);
        let with_env = comment_overlay::config::apply_env_overrides(merged);
        comment_overlay::config::apply_cli_overrides(with_env, args.token.clone(), args.compact)
    };

    comment_overlay::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let doc = SnapshotDocument::load(&args.snapshot)?;
    info!(snapshot = %args.snapshot.display(), elements = doc.len(), "Snapshot loaded");

    let scenario = Scenario {
        tokens: config.tokens.clone(),
        retries: config.retry_delays(),
        resize: args.resize.map(|(w, h)| Size::new(w, h)),
        scroll: args.scroll.map(|(x, y)| Point::new(x, y)),
        clicks: args.click.iter().map(|&(x, y)| Point::new(x, y)).collect(),
    };

    let report = simulate(doc, &scenario);
    let json = report.to_json(config.pretty)?;
    writeln!(std::io::stdout().lock(), "{}", json)?;

    Ok(())
}
