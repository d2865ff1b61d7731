//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Manifold - inspect multi-dimensional content graph configurations
#[derive(Parser, Debug)]
#[command(name = "mf")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a dimension configuration
    #[command(
        name = "validate",
        long_about = "Validate a dimension configuration file.\n\n\
            Parses the TOML configuration, builds every axis, and checks the \
            declared constraints. Exits non-zero if the configuration cannot \
            produce a usable dimension space; prints warnings for suspicious \
            but survivable declarations.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check a configuration before deploying it
    mf validate dimensions.toml

    # In CI, rely on the exit code
    mf validate dimensions.toml --quiet && echo ok"
    )]
    Validate {
        /// Path to the dimension configuration
        config: PathBuf,
    },

    /// Enumerate the allowed dimension space points
    #[command(
        name = "points",
        long_about = "Enumerate every allowed dimension space point.\n\n\
            Builds the constrained Cartesian product of all axis values and \
            prints one line per surviving point: its identity hash followed \
            by its coordinates as JSON.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List the allowed subspace
    mf points dimensions.toml

    # Count points after tightening constraints
    mf points dimensions.toml | wc -l

    # Find the hash for a coordinate
    mf points dimensions.toml | grep '\"language\":\"en\"'"
    )]
    Points {
        /// Path to the dimension configuration
        config: PathBuf,
    },

    /// Classify the variant relationship between two points
    #[command(
        name = "variant",
        long_about = "Classify how point A relates to point B.\n\n\
            Prints one of: same, specialization, generalization, peer. \
            A point outside the allowed subspace compares as a peer to \
            everything but itself.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Is en-us a specialization of en?
    mf variant dimensions.toml --a language=en-us --b language=en

    # Multi-axis coordinates
    mf variant dimensions.toml \\
        --a language=en-us,market=eu \\
        --b language=en,market=eu"
    )]
    Variant {
        /// Path to the dimension configuration
        config: PathBuf,

        /// First point, comma-separated dim=value pairs
        #[arg(long, value_name = "COORDS")]
        a: String,

        /// Second point, comma-separated dim=value pairs
        #[arg(long, value_name = "COORDS")]
        b: String,
    },

    /// Print the fallback chain from a point to its root
    #[command(
        name = "fallback",
        long_about = "Print the primary generalization chain of a point.\n\n\
            Starting from the given point, repeatedly steps to the nearest \
            generalization until a root is reached, printing one coordinate \
            set per line. This is the order content lookup falls back in \
            when a point has no own value.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Where does en-us-ca fall back to?
    mf fallback dimensions.toml --point language=en-us-ca

    # Multi-axis fallback order
    mf fallback dimensions.toml --point language=en-us,market=ch"
    )]
    Fallback {
        /// Path to the dimension configuration
        config: PathBuf,

        /// The point, comma-separated dim=value pairs
        #[arg(long, value_name = "COORDS")]
        point: String,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for mf commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    mf completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    mf completion zsh >> ~/.zshrc

    # Fish
    mf completion fish > ~/.config/fish/completions/mf.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
