use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for vrspace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests, and doc in sequence
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run the headless demo session
    Demo,
}

impl Commands {
    /// Cargo invocations for this task, in order.
    fn steps(&self) -> Vec<&'static [&'static str]> {
        match self {
            Commands::Check => {
                let mut steps = Commands::Fmt.steps();
                steps.extend(Commands::Clippy.steps());
                steps.extend(Commands::Test.steps());
                steps.extend(Commands::Doc.steps());
                steps
            }
            Commands::Fmt => vec![&["fmt", "--all", "--", "--check"]],
            Commands::Clippy => vec![&[
                "clippy",
                "--workspace",
                "--all-targets",
                "--",
                "-D",
                "warnings",
            ]],
            Commands::Test => vec![&["test", "--workspace"]],
            Commands::Doc => vec![&["doc", "--workspace", "--no-deps"]],
            Commands::Build => vec![&["build", "--workspace"]],
            Commands::Demo => vec![&["run", "-p", "vrspace-cli", "--", "run"]],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    for args in cli.command.steps() {
        run_cargo(args)?;
    }
    Ok(())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}
