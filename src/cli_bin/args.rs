//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use stagex::catalog::{FeaturedPolicy, DEFAULT_RELATED_MAX};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "stagex",
    version,
    about = "Content ingestion and catalog queries for the StageX review site",
    long_about = "stagex builds the content manifest for a StageX site root, ingests posts \
                  and collections from markdown front matter, and queries the resulting \
                  catalog: featured and grid views, detail pages, related items and search."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Site root containing posts/, collections/ and data/
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Where records come from (detected when omitted)
    #[arg(long, global = true, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Extension of content files
    #[arg(long = "ext", global = true, value_name = "EXT", default_value = "md")]
    pub extension: String,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Scan the content directories and write the manifest
    Generate(GenerateArgs),
    /// List catalog views
    List(ListArgs),
    /// Show the detail page of one record
    Show(ShowArgs),
    /// Search titles and excerpts
    Search(SearchArgs),
    /// List records related to one record
    Related(RelatedArgs),
    /// Parse every content file and report the outcome per file
    Validate(ValidateArgs),
}

/// Ingestion strategies selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// Build documents listed in the manifest
    Manifest,
    /// Build documents found by scanning the content directories
    Directory,
    /// Read the precomputed aggregate
    Precomputed,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Catalog views for the list command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Featured view followed by the article grid
    Home,
    /// Featured records only
    Featured,
    /// Article grid only
    Grid,
    /// Every record
    All,
    /// Every post
    Posts,
    /// Every collection
    Collections,
}

/// Featured selection policies
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// Records flagged as featured
    Flagged,
    /// Most recent collections
    RecentCollections,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Manifest output path, relative to the root unless absolute
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Which view to list
    #[arg(long, value_enum, default_value = "home")]
    pub view: View,

    /// Number of featured records
    #[arg(long, value_name = "N")]
    pub featured: Option<usize>,

    /// Number of grid records
    #[arg(long, value_name = "N")]
    pub grid: Option<usize>,

    /// Override the featured policy of the strategy
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Only records in this category
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Record id
    pub id: String,

    /// Also print the document body
    #[arg(long)]
    pub body: bool,

    /// Maximum number of related records
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RELATED_MAX)]
    pub related: usize,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search term; empty matches everything
    #[arg(default_value = "")]
    pub term: String,
}

/// Arguments for the related command
#[derive(Args, Debug)]
pub struct RelatedArgs {
    /// Record id
    pub id: String,

    /// Maximum number of related records
    #[arg(short = 'n', long, default_value_t = DEFAULT_RELATED_MAX)]
    pub max: usize,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Exit with an error when any file fails to build
    #[arg(long)]
    pub fail_fast: bool,
}

impl From<PolicyArg> for FeaturedPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Flagged => Self::Flagged,
            PolicyArg::RecentCollections => Self::RecentCollections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_command() {
        let cli = Cli::try_parse_from(["stagex", "show", "2025-06-01-rebecca", "--body"]).unwrap();

        if let Commands::Show(args) = cli.command {
            assert_eq!(args.id, "2025-06-01-rebecca");
            assert!(args.body);
            assert_eq!(args.related, DEFAULT_RELATED_MAX);
        } else {
            panic!("Expected Show command");
        }
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.strategy.is_none());
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::try_parse_from([
            "stagex",
            "list",
            "--strategy",
            "precomputed",
            "--root",
            "site",
            "--format",
            "json",
            "--view",
            "grid",
            "--grid",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.strategy, Some(StrategyArg::Precomputed));
        assert_eq!(cli.root, PathBuf::from("site"));
        assert_eq!(cli.format, OutputFormat::Json);
        if let Commands::List(args) = cli.command {
            assert_eq!(args.view, View::Grid);
            assert_eq!(args.grid, Some(4));
            assert_eq!(args.featured, None);
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_search_term_optional() {
        let cli = Cli::try_parse_from(["stagex", "search"]).unwrap();
        if let Commands::Search(args) = cli.command {
            assert_eq!(args.term, "");
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_validate_fail_fast() {
        let cli = Cli::try_parse_from(["stagex", "validate", "--fail-fast"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert!(args.fail_fast);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["stagex", "-v", "-q", "list"]).is_err());
    }
}
