//! Pozocheck command-line reviewer
//!
//! Reviews an exported `{ dossier, limits }` bundle outside the browser.
//! Logs go to stderr so stdout stays clean for `--json`.

mod config;
mod summary;

use anyhow::Context;
use clap::Parser;
use review_engine::{merge_analysis_csv, validate_tiers, AppState, Bundle, Registry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pozocheck")]
#[command(
    version,
    about = "Review a water well permit dossier against its reference limits",
    after_help = "Exit status is 2 when the dossier is not approved."
)]
struct Args {
    /// Exported bundle JSON; an empty dossier with default limits if omitted
    #[arg(short, long)]
    bundle: Option<PathBuf>,

    /// TOML file overriding parameter bounds and fee tiers
    #[arg(short, long)]
    limits: Option<PathBuf>,

    /// Registry list export (numbers separated by commas, semicolons, tabs or newlines)
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Lab analysis CSV (header row + data row) merged into the dossier
    #[arg(long)]
    analysis_csv: Option<PathBuf>,

    /// Print the full report as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Write the resulting bundle (after overrides and CSV merge) to this path
    #[arg(long)]
    export: Option<PathBuf>,
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}: {}", what, path.display()))
}

/// Build the review state from the bundle, limits overrides and analysis CSV
fn load_state(args: &Args) -> anyhow::Result<AppState> {
    let bundle = match &args.bundle {
        Some(path) => {
            let json = read_text(path, "bundle")?;
            Bundle::import_json(&json)
                .with_context(|| format!("Invalid bundle: {}", path.display()))?
        }
        None => {
            tracing::info!("No bundle given, starting from an empty dossier");
            AppState::default().to_bundle()
        }
    };

    let mut limits = bundle.limits;
    if let Some(path) = &args.limits {
        limits = config::Config::from_file(path)?.apply(limits)?;
    }

    let mut dossier = bundle.dossier;
    if let Some(path) = &args.analysis_csv {
        let csv = read_text(path, "analysis CSV")?;
        dossier.analysis = merge_analysis_csv(&dossier.analysis, &csv)
            .with_context(|| format!("Invalid analysis CSV: {}", path.display()))?;
    }

    Ok(AppState::new(dossier, limits))
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<Option<Registry>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = read_text(path, "registry list")?;
    let registry = Registry::parse(&text)
        .with_context(|| format!("Invalid registry list: {}", path.display()))?;
    Ok(Some(registry))
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the report; all logging goes to stderr
    tracing_subscriber::registry()
        .with(env_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting pozocheck v{}", env!("CARGO_PKG_VERSION"));

    let state = load_state(&args)?;
    let registry = load_registry(args.registry.as_deref())?;
    let report = state.review(registry.as_ref());

    if let Some(path) = &args.export {
        let json = state.to_bundle().export_json()?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write bundle: {}", path.display()))?;
        tracing::info!("Wrote bundle to {}", path.display());
    }

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize review report")?;
        println!("{}", json);
    } else {
        let issues = validate_tiers(&state.limits.tiers);
        print!("{}", summary::render(&report, &issues));
    }

    if !report.verdict.approved {
        std::process::exit(2);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{Parameter, ReferenceLimits};
    use tracing::level_filters::LevelFilter;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("pozocheck").chain(argv.iter().copied()))
    }

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pozocheck-{}-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_flags() {
        let args = args(&["--bundle", "b.json", "--analysis-csv", "lab.csv", "--json"]);
        assert_eq!(args.bundle, Some(PathBuf::from("b.json")));
        assert_eq!(args.analysis_csv, Some(PathBuf::from("lab.csv")));
        assert!(args.json);
        assert!(args.export.is_none());
    }

    #[test]
    fn test_env_filter_honours_rust_log() {
        assert_eq!(
            env_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            env_filter(Some("review_engine=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(env_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(env_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_load_state_without_bundle() {
        let state = load_state(&args(&[])).unwrap();
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_load_state_applies_overrides_and_csv() {
        let limits = scratch_file(
            "limits.toml",
            "[[bounds]]\nparameter = \"arsenic\"\nmax = 0.05\n",
        );
        let csv = scratch_file("lab.csv", "arsenico,ph\n0.03,7.2\n");

        let state = load_state(&args(&[
            "--limits",
            limits.to_str().unwrap(),
            "--analysis-csv",
            csv.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(state.dossier.analysis.value(Parameter::Arsenic), "0.03");
        assert_eq!(
            state.limits.bounds_for(Parameter::Arsenic).max,
            Some(0.05)
        );
        assert_eq!(state.limits.tiers, ReferenceLimits::default_tiers());
        assert_eq!(state.review(None).analysis.bad, 0);

        let _ = fs::remove_file(limits);
        let _ = fs::remove_file(csv);
    }

    #[test]
    fn test_missing_bundle_file_is_an_error() {
        let err = load_state(&args(&["--bundle", "/nonexistent/bundle.json"])).unwrap_err();
        assert!(err.to_string().contains("Failed to read bundle"));
    }

    #[test]
    fn test_load_registry() {
        assert!(load_registry(None).unwrap().is_none());

        let path = scratch_file("registry.txt", "PZ-1, PZ-2\nPZ-3");
        let registry = load_registry(Some(&path)).unwrap().unwrap();
        assert_eq!(registry.len(), 3);

        let empty = scratch_file("empty-registry.txt", " \n ");
        assert!(load_registry(Some(&empty)).is_err());

        let _ = fs::remove_file(path);
        let _ = fs::remove_file(empty);
    }
}
