use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use semver_release::cli::{run_local, LocalOptions, DEFAULT_RELEASE_BRANCH};
use semver_release::ui;

#[derive(Parser)]
#[command(
    name = "semver-release",
    about = "Compute the next semantic version from conventional commits and tag it"
)]
struct Args {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Version a local Git repository
    Local(LocalArgs),

    /// Display CLI current version
    Version,
}

#[derive(clap::Args)]
struct LocalArgs {
    #[arg(help = "Path to the repository")]
    repository_path: PathBuf,

    #[arg(
        short,
        long = "rule-path",
        help = "Path to the TOML, JSON or YAML file containing the release rules"
    )]
    rule_path: Option<PathBuf>,

    #[arg(short, long, default_value = "", help = "Prefix added to the version tag name")]
    tag_prefix: String,

    #[arg(
        short = 'b',
        long,
        default_value = DEFAULT_RELEASE_BRANCH,
        help = "Branch to fetch commits from"
    )]
    release_branch: String,

    #[arg(long, help = "Path to an armored GPG key used to sign produced tags")]
    gpg_key_path: Option<PathBuf>,

    #[arg(short, long, help = "Only compute the next semver, do not create any tag")]
    dry_run: bool,
}

impl LocalArgs {
    fn into_options(self, ci_output: Option<PathBuf>) -> LocalOptions {
        LocalOptions {
            repository: self.repository_path,
            rules_path: self.rule_path,
            tag_prefix: self.tag_prefix,
            release_branch: self.release_branch,
            gpg_key_path: self.gpg_key_path,
            dry_run: self.dry_run,
            ci_output,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("semver_release=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("semver_release=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Version => {
            println!("semver-release {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Local(local) => {
            let ci_output = std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from);
            let options = local.into_options(ci_output);

            match run_local(&options) {
                Ok(result) => {
                    ui::display_decision(&result.decision, &options.tag_prefix, options.dry_run);
                    Ok(())
                }
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            }
        }
    }
}
