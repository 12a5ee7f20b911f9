use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use string_array::cli::Cli;
use string_array::logger::{initialize_logger, level_from_verbosity};
use string_array::script::{self, REFERENCE_SCENARIO};
use string_array::DynamicArray;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    initialize_logger(Some(level_from_verbosity(cli.verbose)))?;

    let mut array = DynamicArray::with_capacity(cli.capacity)
        .with_context(|| format!("Failed to create array with capacity {}", cli.capacity))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(file_path) = cli.file {
        run_file(&file_path, &mut array, &mut out)
            .with_context(|| format!("Failed to run script: {:?}", file_path))?;
    } else {
        info!("no script given, running the reference scenario");
        script::run_script(REFERENCE_SCENARIO, &mut array, &mut out)
            .context("Reference scenario failed")?;
    }

    out.flush()?;
    info!(len = array.len(), capacity = array.capacity(), "done");
    array.destroy();
    Ok(())
}

fn run_file<W: Write>(path: &Path, array: &mut DynamicArray, out: &mut W) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("File not found: {:?}", path));
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    info!(path = %path.display(), "running script");
    script::run_script(&source, array, out)?;
    Ok(())
}
