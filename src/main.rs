use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use cutkit::{init_logging, run_job_file, BUILD_DATE, VERSION};

#[derive(Parser)]
#[command(name = "cutkit")]
#[command(about = "Plan CNC toolpaths from a job file and write G-code")]
struct Args {
    /// Job file (.json or .toml)
    job: PathBuf,

    /// Write the program here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;
    info!("CutKit {} (built {})", VERSION, BUILD_DATE);

    // Diagnostics are logged as they are recorded.
    let output = run_job_file(&args.job)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output.gcode)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} operations to {}", output.operations.len(), path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(output.gcode.as_bytes())
                .context("Failed to write program to stdout")?;
        }
    }

    Ok(())
}
