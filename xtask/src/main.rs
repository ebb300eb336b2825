//! xtask - Build tasks for logseg
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man pages, COMMANDS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command, CommandFactory, Parser, Subcommand};

use logseg::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for logseg")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate man pages
        #[arg(long)]
        man: bool,

        /// Generate COMMANDS.md
        #[arg(long)]
        markdown: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
        } => {
            // If no specific format is specified, generate both
            let gen_all = !man && !markdown;

            if gen_all || man {
                generate_man_pages(&output)?;
            }
            if gen_all || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

/// Generate man pages using clap_mangen, one per (nested) subcommand
fn generate_man_pages(output: &Path) -> Result<()> {
    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    render_man(&man_dir, "logseg", &cmd)?;

    println!("Man pages generated in {}", man_dir.display());
    Ok(())
}

fn render_man(man_dir: &Path, page_name: &str, cmd: &Command) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    let path = man_dir.join(format!("{}.1", page_name));
    fs::write(&path, buffer)?;
    println!("Generated: {}", path.display());

    for sub in visible_subcommands(cmd) {
        render_man(man_dir, &format!("{}-{}", page_name, sub.get_name()), sub)?;
    }
    Ok(())
}

/// Generate COMMANDS.md markdown documentation
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let mut markdown = String::new();

    markdown.push_str("# logseg Command Reference\n\n");
    markdown.push_str("This document is auto-generated from the CLI definitions.\n\n");
    markdown.push_str("## Table of Contents\n\n");
    for sub in visible_subcommands(&cmd) {
        let name = sub.get_name();
        markdown.push_str(&format!("- [{}](#logseg-{})\n", name, name));
    }
    markdown.push_str("\n---\n\n");

    markdown.push_str("## logseg\n\n");
    if let Some(about) = cmd.get_about() {
        markdown.push_str(&format!("{}\n\n", about));
    }
    push_options(&mut markdown, cmd.get_arguments().collect());

    for sub in visible_subcommands(&cmd) {
        push_command(&mut markdown, "logseg", sub, 2);
    }

    markdown.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("COMMANDS.md");
    fs::write(&output_path, markdown)?;
    println!("Generated: {}", output_path.display());

    Ok(())
}

fn push_command(markdown: &mut String, parent: &str, cmd: &Command, depth: usize) {
    let full_name = format!("{} {}", parent, cmd.get_name());
    markdown.push_str(&format!("{} {}\n\n", "#".repeat(depth), full_name));

    if let Some(about) = cmd.get_about() {
        markdown.push_str(&format!("{}\n\n", about));
    }

    let args: Vec<_> = cmd.get_arguments().filter(|a| !a.is_global_set()).collect();
    let positional: Vec<_> = args.iter().copied().filter(|a| a.is_positional()).collect();
    if !positional.is_empty() {
        markdown.push_str("**Arguments**\n\n");
        for arg in positional {
            markdown.push_str(&format!("- `<{}>`: ", arg.get_id().as_str().to_uppercase()));
            if let Some(help) = arg.get_help() {
                markdown.push_str(&help.to_string());
            }
            markdown.push('\n');
        }
        markdown.push('\n');
    }
    push_options(markdown, args.into_iter().filter(|a| !a.is_positional()).collect());

    if let Some(long_about) = cmd.get_long_about() {
        markdown.push_str("```\n");
        markdown.push_str(&format!("{}\n", long_about));
        markdown.push_str("```\n\n");
    }

    for nested in visible_subcommands(cmd) {
        push_command(markdown, &full_name, nested, depth + 1);
    }

    if depth == 2 {
        markdown.push_str("---\n\n");
    }
}

fn push_options(markdown: &mut String, options: Vec<&Arg>) {
    let options: Vec<_> = options
        .into_iter()
        .filter(|a| {
            let id = a.get_id().as_str();
            id != "help" && id != "version"
        })
        .collect();
    if options.is_empty() {
        return;
    }

    markdown.push_str("**Options**\n\n");
    for arg in options {
        let long = arg.get_long().map(|l| format!("--{}", l));
        let short = arg.get_short().map(|s| format!("-{}", s));
        let flag = match (long, short) {
            (Some(l), Some(s)) => format!("{}, {}", s, l),
            (Some(l), None) => l,
            (None, Some(s)) => s,
            _ => continue,
        };
        markdown.push_str(&format!("- `{}`: ", flag));
        if let Some(help) = arg.get_help() {
            markdown.push_str(&help.to_string());
        }
        markdown.push('\n');
    }
    markdown.push('\n');
}

fn visible_subcommands(cmd: &Command) -> impl Iterator<Item = &Command> {
    cmd.get_subcommands()
        .filter(|sub| !sub.is_hide_set() && sub.get_name() != "help")
}
