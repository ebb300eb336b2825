//! logseg - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use logseg::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Chunk {
            input,
            profile,
            output,
            max_entries,
            orphans,
        } => commands::chunk::handle(
            config_path,
            commands::chunk::ChunkArgs {
                input,
                profile,
                output,
                max_entries,
                orphans,
            },
        ),
        Commands::Extract { file } => commands::extract::handle(file.as_deref()),
        Commands::Profiles => commands::profiles::handle(config_path),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Init { force } => commands::config::handle_init(config_path, force),
            ConfigCommands::Path => commands::config::handle_path(config_path),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}

/// Install the stderr log subscriber.
///
/// `LOGSEG_LOG` takes precedence over the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_env("LOGSEG_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("logseg={}", default_level)));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
