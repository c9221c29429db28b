//! Options-tree normalizer CLI.
//!
//! Reads a JSON options tree, runs it through the engine with the default
//! collaborators, and prints the normalized tree. Extracted props can be
//! written next to it.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use normalizer::exit_codes;
use normalizer::io::config::{DEFAULT_CONFIG_FILE, NormalizerConfig, load_config, write_config};
use normalizer::io::options_file::{render_json, write_json};
use normalizer::logging;
use normalizer::process::process_file;
use normalizer::verify::verify_file;

#[derive(Parser)]
#[command(
    name = "normalizer",
    version,
    about = "Normalize UI options trees for native rendering"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize an options file and print the result.
    Process {
        /// Options tree (JSON).
        input: PathBuf,
        /// Owner of a root-level `passProps` key.
        #[arg(long)]
        component_id: Option<String>,
        /// Config file; defaults apply when it does not exist.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Write extracted props (id -> payload) to this file.
        #[arg(long)]
        props_out: Option<PathBuf>,
        /// Write the normalized tree here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Process twice and report anything the second pass changes.
    Verify {
        /// Options tree (JSON).
        input: PathBuf,
        /// Owner of a root-level `passProps` key.
        #[arg(long)]
        component_id: Option<String>,
        /// Config file; defaults apply when it does not exist.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Write a default config file.
    InitConfig {
        /// Destination path.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Process {
            input,
            component_id,
            config,
            props_out,
            output,
        } => cmd_process(
            &input,
            component_id.as_deref(),
            &config,
            props_out.as_deref(),
            output.as_deref(),
        ),
        Command::Verify {
            input,
            component_id,
            config,
        } => cmd_verify(&input, component_id.as_deref(), &config),
        Command::InitConfig { path, force } => cmd_init_config(&path, force),
    }
}

fn cmd_process(
    input: &Path,
    component_id: Option<&str>,
    config_path: &Path,
    props_out: Option<&Path>,
    output: Option<&Path>,
) -> Result<i32> {
    let config = load_config(config_path)?;
    let processed = process_file(input, component_id, &config)?;

    if let Some(path) = props_out {
        write_json(path, &processed.props, config.pretty)?;
    }
    match output {
        Some(path) => write_json(path, &processed.options, config.pretty)?,
        None => print!("{}", render_json(&processed.options, config.pretty)?),
    }
    Ok(exit_codes::OK)
}

fn cmd_verify(input: &Path, component_id: Option<&str>, config_path: &Path) -> Result<i32> {
    let config = load_config(config_path)?;
    let report = verify_file(input, component_id, &config)?;
    if report.is_stable() {
        println!("stable");
        return Ok(exit_codes::OK);
    }
    for issue in report.issues() {
        println!("{issue}");
    }
    Ok(exit_codes::UNSTABLE)
}

fn cmd_init_config(path: &Path, force: bool) -> Result<i32> {
    if !force && path.exists() {
        bail!("{} already exists (pass --force to overwrite)", path.display());
    }
    write_config(path, &NormalizerConfig::default())?;
    Ok(exit_codes::OK)
}
