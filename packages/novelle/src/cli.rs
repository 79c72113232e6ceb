//! Command-line interface for the amendment engine.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::amendment::{parse_changes, QuotePolicy};
use crate::apply::{Amender, Outcome};
use crate::config::{validate_output_dir, MESSAGE_WRAP_WIDTH};
use crate::error::{NovelleError, Result};
use crate::output::save_outcome;
use crate::source::{build_from_segments, build_from_text, LawSegment};
use crate::tree::LawTree;

/// Novelle - Apply German amending-law instructions to the law they amend.
#[derive(Parser)]
#[command(name = "novelle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply an amending law to a source law.
    Apply {
        /// Source law file (flat text, or JSON segments with --segments)
        #[arg(short, long)]
        source: PathBuf,

        /// Amending law file
        #[arg(short, long)]
        changes: PathBuf,

        /// Title of the source law (default: source file name)
        #[arg(short, long)]
        title: Option<String>,

        /// Read the source law as a JSON segment list
        #[arg(long)]
        segments: bool,

        /// Directory for the source, modified and report files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Repair unbalanced quotation marks instead of failing
        #[arg(long)]
        lenient_quotes: bool,
    },

    /// Parse an amending law and print its changes.
    Parse {
        /// Amending law file
        #[arg(short, long)]
        changes: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = DataFormat::Yaml)]
        format: DataFormat,

        /// Repair unbalanced quotation marks instead of failing
        #[arg(long)]
        lenient_quotes: bool,
    },

    /// Parse a source law and print its tree.
    Tree {
        /// Source law file (flat text, or JSON segments with --segments)
        #[arg(short, long)]
        source: PathBuf,

        /// Title of the source law (default: source file name)
        #[arg(short, long)]
        title: Option<String>,

        /// Read the source law as a JSON segment list
        #[arg(long)]
        segments: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = TreeFormat::Text)]
        format: TreeFormat,
    },
}

/// Serialization format for parsed changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    Yaml,
    Json,
}

/// Rendering of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    Text,
    Json,
    Yaml,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            source,
            changes,
            title,
            segments,
            output,
            lenient_quotes,
        } => apply_command(
            &source,
            &changes,
            title.as_deref(),
            segments,
            output.as_deref(),
            quote_policy(lenient_quotes),
        ),
        Commands::Parse {
            changes,
            format,
            lenient_quotes,
        } => parse_command(&changes, format, quote_policy(lenient_quotes)),
        Commands::Tree {
            source,
            title,
            segments,
            format,
        } => tree_command(&source, title.as_deref(), segments, format),
    }
}

fn quote_policy(lenient: bool) -> QuotePolicy {
    if lenient {
        QuotePolicy::Repair
    } else {
        QuotePolicy::Strict
    }
}

/// File stem used as default title and artifact name.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "law".to_string())
}

/// Build the source tree from a text or JSON segment file.
fn load_source(path: &Path, title: Option<&str>, segments: bool) -> Result<LawTree> {
    let content = fs::read_to_string(path)?;
    let title = title.map_or_else(|| file_stem(path), String::from);

    if segments {
        let segments: Vec<LawSegment> = serde_json::from_str(&content)?;
        build_from_segments(&title, &segments)
    } else {
        build_from_text(&title, &content)
    }
}

/// Execute the apply command.
fn apply_command(
    source_path: &Path,
    changes_path: &Path,
    title: Option<&str>,
    segments: bool,
    output: Option<&Path>,
    policy: QuotePolicy,
) -> Result<()> {
    // Validate output directory before doing any work
    if let Some(output_dir) = output {
        validate_output_dir(output_dir)?;
    }

    println!(
        "{} {} with {}",
        style("Amending").bold(),
        style(source_path.display()).cyan(),
        style(changes_path.display()).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    pb.set_message("Building source law tree...");
    let source = match load_source(source_path, title, segments) {
        Ok(tree) => tree,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Parsing changes...");
    let changes = match fs::read_to_string(changes_path)
        .map_err(NovelleError::from)
        .and_then(|text| parse_changes(&text, policy))
    {
        Ok(changes) => changes,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Applying changes...");
    let amendment = match Amender::default().apply_changes(&source, &changes) {
        Ok(amendment) => amendment,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Nodes: {}", source.node_count());
    println!("  Changes: {}", changes.len());
    for result in amendment.results.iter().filter(|r| r.status() == 0) {
        let label = match result.outcome {
            Outcome::NotFound => style("not found").yellow().bold(),
            Outcome::Skipped => style("skipped").yellow(),
            _ => style("failed").red().bold(),
        };
        let details = format!("{} ({})", result.change.raw_text, result.message);
        println!("  {label}");
        println!(
            "{}",
            textwrap::indent(&textwrap::fill(&details, MESSAGE_WRAP_WIDTH), "    ")
        );
    }

    println!();
    println!("{}", style(amendment.summary()).green().bold());

    if let Some(output_dir) = output {
        let paths = save_outcome(output_dir, &file_stem(source_path), &source, &amendment)?;
        for path in paths {
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
    }

    Ok(())
}

/// Execute the parse command.
fn parse_command(changes_path: &Path, format: DataFormat, policy: QuotePolicy) -> Result<()> {
    let text = fs::read_to_string(changes_path)?;
    let changes = parse_changes(&text, policy)?;

    let rendered = match format {
        DataFormat::Yaml => format!("---\n{}", serde_yaml_ng::to_string(&changes)?),
        DataFormat::Json => serde_json::to_string_pretty(&changes)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Execute the tree command.
fn tree_command(
    source_path: &Path,
    title: Option<&str>,
    segments: bool,
    format: TreeFormat,
) -> Result<()> {
    let tree = load_source(source_path, title, segments)?;

    let rendered = match format {
        TreeFormat::Text => tree.to_text(),
        TreeFormat::Json => tree.to_json()?,
        TreeFormat::Yaml => tree.to_yaml()?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
