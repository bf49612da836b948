extern crate libtxrc;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{Diagnostic, IntoDiagnostic, Result};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "TXRC CLI")]
#[command(about, author, version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert ".txrc" files to ".txt" and ".txt" files back to ".txrc"
    #[command(arg_required_else_help = true)]
    Convert {
        /// Input files (".txrc" or ".txt")
        files: Vec<String>,
        /// Overwrite existing output files
        #[arg(short, long, default_value_t = false, value_name = "TRUE|FALSE")]
        force: bool,
    },
    /// Print the unique strings stored in a ".txrc" file
    #[command(arg_required_else_help = true)]
    Ls {
        /// ".txrc" file
        file: String,
    },
}

#[derive(Error, Diagnostic, Debug)]
enum CliError {
    #[error("\"{path}\" is neither a .txrc nor a .txt file")]
    #[diagnostic(code(txrc_cli::unsupported_extension))]
    UnsupportedExtension { path: String },
}

pub fn main() -> Result<()> {
    let stdout = console::Term::stdout();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { files, force } => command_convert(stdout, files, force)?,
        Commands::Ls { file } => command_ls(stdout, file)?,
    }

    Ok(())
}

fn command_convert(stdout: console::Term, files: Vec<String>, force: bool) -> Result<()> {
    let bar = indicatif::ProgressBar::new(files.len() as u64);
    bar.set_style(get_bar_style()?);

    let mut failed: u32 = 0;
    for file in files {
        bar.set_message(file.clone());

        // one bad file must not stop the rest of the batch
        match convert_file(Path::new(&file), force) {
            Ok(Some(output)) => {
                bar.println(format!("Done: {} -> {}", file, output.display()));
            }
            Ok(None) => {
                bar.println(format!("Skipped: {file}"));
            }
            Err(error) => {
                failed += 1;
                bar.println(format!("ERROR: {file}: {error}"));
            }
        }

        bar.inc(1);
    }

    bar.finish();

    if failed > 0 {
        stdout
            .write_line(&format!("{failed} file(s) failed"))
            .into_diagnostic()?;
    }

    Ok(())
}

fn command_ls(stdout: console::Term, file: String) -> Result<()> {
    let bytes = std::fs::read(&file).into_diagnostic()?;
    let container = libtxrc::decode_container(&bytes).into_diagnostic()?;

    for string in &container.catalog.strings {
        stdout.write_line(string).into_diagnostic()?;
    }

    Ok(())
}

/// Transcode a single file, returning the output path, or `None` when the
/// user declined to overwrite an existing file.
fn convert_file(path: &Path, force: bool) -> Result<Option<PathBuf>> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("txrc") => {
            let bytes = std::fs::read(path).into_diagnostic()?;
            let text = libtxrc::decode(&bytes).into_diagnostic()?;

            let output = sibling_path(path, "txt");
            if !confirm_overwrite(&output, force)? {
                return Ok(None);
            }
            std::fs::write(&output, text).into_diagnostic()?;
            Ok(Some(output))
        }
        Some("txt") => {
            let text = std::fs::read_to_string(path).into_diagnostic()?;
            let lines: Vec<&str> = text.lines().collect();
            let bytes = libtxrc::encode(&lines).into_diagnostic()?;

            let output = sibling_path(path, "txrc");
            if !confirm_overwrite(&output, force)? {
                return Ok(None);
            }
            std::fs::write(&output, bytes).into_diagnostic()?;
            Ok(Some(output))
        }
        _ => Err(CliError::UnsupportedExtension {
            path: path.display().to_string(),
        }
        .into()),
    }
}

/// Output lands next to the input: "menu.txrc" becomes "menu.txrc.txt".
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{name}.{suffix}"))
}

fn confirm_overwrite(path: &Path, force: bool) -> Result<bool> {
    if force || !path.exists() {
        return Ok(true);
    }

    let message = format!("File \"{}\" exists. Overwrite it?", path.display());
    dialoguer::Confirm::new()
        .with_prompt(message)
        .interact()
        .into_diagnostic()
}

fn get_bar_style() -> Result<indicatif::ProgressStyle> {
    Ok(
        indicatif::ProgressStyle::with_template("[{bar:32}] {pos:>7}/{len:7} {msg}")
            .into_diagnostic()?
            .progress_chars("=>-"),
    )
}
