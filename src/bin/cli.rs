//! CLI binary for jobhunt.

use clap::{Parser, Subcommand};
use jobhunt::config::API_KEY_ENV;
use jobhunt::digest::{render, save_digest};
use jobhunt::hunt::{rank_file, run_search};
use jobhunt::{DigestFormat, DigestMeta, HunterConfig};
use jobhunt_search::Digest;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// jobhunt: daily digest of job postings ranked against a keyword profile.
#[derive(Parser)]
#[command(name = "jobhunt", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Where and how to write the digest.
#[derive(clap::Args, Default)]
struct OutputArgs {
    /// Output file, or `-` for stdout. Defaults to `digest.output`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: markdown (md) or html. Defaults to `digest.format`.
    #[arg(short, long)]
    format: Option<DigestFormat>,

    /// Maximum number of postings. Defaults to `digest.limit`.
    #[arg(short, long)]
    limit: Option<usize>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search the configured sites and write a ranked digest.
    Search {
        /// Query text; defaults to the profile's required and bonus terms.
        #[arg(short, long)]
        query: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Rank previously collected results from a JSON file.
    Rank {
        /// JSON array of `{title, link, snippet}` records.
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Validate the configuration and print a summary.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `--output -` keeps stdout clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobhunt=info,jobhunt_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let path = HunterConfig::resolve_config_path(cli.config.as_deref())?;
    info!(path = %path.display(), "loading config");
    let config = HunterConfig::from_file(&path)?;

    let command = cli.command.unwrap_or(Command::Search {
        query: None,
        out: OutputArgs::default(),
    });
    match command {
        Command::Search { query, out } => {
            let (text, digest) = run_search(&config, query.as_deref(), out.limit).await?;
            write_digest(&config, &digest, Some(text), &out)
        }
        Command::Rank { input, out } => {
            config.validate()?;
            let digest = rank_file(&config, &input, out.limit)?;
            write_digest(&config, &digest, None, &out)
        }
        Command::Check => run_check(&config, &path),
    }
}

fn write_digest(
    config: &HunterConfig,
    digest: &Digest,
    query: Option<String>,
    out: &OutputArgs,
) -> anyhow::Result<()> {
    let format = out.format.unwrap_or(config.digest.format);
    let path = out.output.as_deref().unwrap_or(&config.digest.output);
    let content = render(digest, &DigestMeta::now(query), format);

    if path == Path::new("-") {
        print!("{content}");
        return Ok(());
    }
    save_digest(path, &content)?;
    println!("Saved {} jobs to {}", digest.len(), path.display());
    Ok(())
}

fn run_check(config: &HunterConfig, path: &Path) -> anyhow::Result<()> {
    config.validate()?;
    println!("jobhunt v{}", env!("CARGO_PKG_VERSION"));
    println!("config:    {}", path.display());
    print!("{}", config.summary());
    match config.query_text(None) {
        Ok(text) => println!("query:     {text}"),
        Err(_) => println!("query:     (none; pass --query to search)"),
    }
    match config.credentials() {
        Ok(creds) => println!("api:       cx {} (key set)", creds.cx),
        Err(e) => println!("api:       not configured ({e}); set {API_KEY_ENV} to search"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_flag_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["jobhunt", "search", "--config", "x.toml"]).expect("parse");
        assert_eq!(cli.config.as_deref(), Some(Path::new("x.toml")));
        assert!(matches!(cli.command, Some(Command::Search { .. })));
    }

    #[test]
    fn config_flag_accepted_before_subcommand() {
        let cli = Cli::try_parse_from(["jobhunt", "-c", "x.toml", "rank", "--input", "r.json"])
            .expect("parse");
        assert_eq!(cli.config.as_deref(), Some(Path::new("x.toml")));
        assert!(matches!(cli.command, Some(Command::Rank { .. })));
    }

    #[test]
    fn format_flag_parses_short_names() {
        let cli =
            Cli::try_parse_from(["jobhunt", "rank", "-i", "r.json", "-f", "md"]).expect("parse");
        let Some(Command::Rank { out, .. }) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(out.format, Some(DigestFormat::Markdown));
    }
}
