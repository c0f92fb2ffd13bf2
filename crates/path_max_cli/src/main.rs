//! `path-max`: load a tree and query file, compare the three path-max
//! engines, export the tree as DOT, or run the built-in demo.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use path_max::{HarnessConfig, LoadError, export, load_instance, run_comparison};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod demo;

#[derive(Parser)]
#[command(name = "path-max")]
#[command(version)]
#[command(about = "Maximum edge weight on tree paths: naive, lifting and offline engines")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run v1, v2 and v3 over every query of an instance file and compare
    Compare {
        /// Instance file (`n m`, edges, `Q`, queries; 1-indexed)
        file: PathBuf,

        /// Write the reference answers, one rounded integer per line
        #[arg(short, long)]
        answers: Option<PathBuf>,

        /// Skip the naive per-query DFS engine
        #[arg(long, env = "SKIP_V1")]
        skip_v1: bool,
    },

    /// Export the loaded tree in Graphviz DOT format
    Dot {
        /// Instance file
        file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Graph name in the DOT header
        #[arg(long, default_value = "G")]
        name: String,
    },

    /// Run the five-vertex walkthrough
    Demo,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{0} has no live vertex to root the tree at")]
    EmptyTree(PathBuf),
    #[error("engines disagree")]
    Mismatch,
}

fn load(path: &Path) -> Result<path_max::Instance, CliError> {
    load_instance(path).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn compare(file: &Path, answers: Option<&Path>, skip_v1: bool) -> Result<(), CliError> {
    let instance = load(file)?;
    let report = run_comparison(&instance, &HarnessConfig { skip_v1 })
        .ok_or_else(|| CliError::EmptyTree(file.to_path_buf()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "file: {}", file.display())?;
    report.write_timings(&mut out)?;

    if let Some(path) = answers {
        let mut writer = BufWriter::new(File::create(path)?);
        report.write_answers(&mut writer)?;
        writer.flush()?;
    }

    if report.results_identical {
        Ok(())
    } else {
        Err(CliError::Mismatch)
    }
}

fn dot(file: &Path, output: Option<&Path>, name: &str) -> Result<(), CliError> {
    let instance = load(file)?;
    match output {
        Some(path) => export::write_dot_file(&instance.tree, name, path)?,
        None => export::write_dot(&instance.tree, name, io::stdout().lock())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Compare {
            file,
            answers,
            skip_v1,
        } => compare(&file, answers.as_deref(), skip_v1),
        Commands::Dot { file, output, name } => dot(&file, output.as_deref(), &name),
        Commands::Demo => demo::run(io::stdout().lock()).map_err(CliError::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
