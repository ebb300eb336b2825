//! CLI definitions for logseg
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

use crate::segment::OrphanPolicy;

/// Build clap styles.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "logseg")]
#[command(about = "Split large log files into entry-aligned chunks for LLM analysis")]
#[command(
    long_about = "logseg - split large log files into entry-aligned chunks.

Each line matching the active profile's start pattern begins a log entry;
all following lines (stack traces, wrapped messages) belong to that entry.
Entries are grouped into chunk files of at most N entries, written to
<output_chunk_dir>/<profile>/<input name>/chunk_NNNN.log.

QUICK START:
    logseg config init             Write a starter config
    logseg profiles                List configured log profiles
    logseg chunk                   Chunk the configured input file
    logseg chunk logs/ -p syslog   Chunk every .log file in logs/

Configuration is read from ~/.config/logseg/config.toml unless --config is given."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a log file (or a directory of .log files) into chunks
    #[command(long_about = "Split a log file into entry-aligned chunk files.

Values given on the command line override the configuration file. When
INPUT is a directory, every .log file directly inside it is processed in
turn, each into its own output directory.

Chunks from a previous run in the same output directory are removed first,
so re-running never leaves stale chunks behind.

EXAMPLES:
    logseg chunk                               Use input_log_file from config
    logseg chunk app.log                       Chunk app.log with the active profile
    logseg chunk app.log -p java -n 200        200 entries per chunk
    logseg chunk logs/ --orphans preamble      Keep lines before the first entry")]
    Chunk {
        /// Log file or directory (defaults to input_log_file)
        #[arg(help = "Log file or directory of .log files")]
        input: Option<PathBuf>,
        /// Profile to use instead of active_profile
        #[arg(long, short, help = "Log profile to use")]
        profile: Option<String>,
        /// Base output directory instead of output_chunk_dir
        #[arg(long, short, help = "Base output directory")]
        output: Option<PathBuf>,
        /// Maximum entries per chunk
        #[arg(
            long = "max-entries",
            short = 'n',
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        max_entries: Option<usize>,
        /// Handling of lines before the first entry
        #[arg(long, value_enum)]
        orphans: Option<OrphanPolicy>,
    },

    /// Extract a JSON value from free-form text
    #[command(long_about = "Extract a JSON value from free-form text such as an LLM response.

Markdown code fences are stripped and the outermost {...} or [...] block is
parsed. Output is always valid, compact JSON: if nothing parses, the text is
wrapped as {\"Response\": \"...\"}.

EXAMPLES:
    logseg extract response.txt
    some-agent --prompt ... | logseg extract")]
    Extract {
        /// File to read (defaults to stdin)
        #[arg(help = "File to read (reads stdin when omitted)")]
        file: Option<PathBuf>,
    },

    /// List configured log profiles
    Profiles,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate a shell completion script.

EXAMPLES:
    logseg completions --shell bash > ~/.local/share/bash-completion/completions/logseg
    logseg completions --shell zsh > ~/.zfunc/_logseg")]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}
