use crate::cli::args::{Cli, Commands};
use crate::config::ConverterConfig;
use crate::error::{ProcessingError, Result};
use crate::models::BatchResult;
use crate::namelist::NamelistParser;
use crate::processors::convert_files;
use crate::utils::filename::generate_default_little_r_filename;
use crate::utils::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.quiet)?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Convert {
            input,
            stations,
            output_file,
            config,
            report,
        } => {
            let output_file = output_file.unwrap_or_else(generate_default_little_r_filename);
            let config = ConverterConfig::load(config.as_deref())?;

            info!("Input observations: {}", input.display());
            info!("Station elevations: {}", stations.display());
            info!("Output file: {}", output_file.display());

            let result = convert_blocking(input, stations, output_file, config, quiet).await?;

            println!("{}", result.summary());

            if let Some(report_path) = report {
                write_report(&result, &report_path)?;
                info!("Batch report written to {}", report_path.display());
            }
        }

        Commands::Namelist { file, domain_index } => {
            let params = NamelistParser::new()?.parse_file(&file)?;
            println!("{}", params.to_shell(domain_index));
        }
    }

    Ok(())
}

/// The conversion is sequential blocking I/O; keep it off the async workers
async fn convert_blocking(
    input: PathBuf,
    stations: PathBuf,
    output_file: PathBuf,
    config: ConverterConfig,
    quiet: bool,
) -> Result<BatchResult> {
    tokio::task::spawn_blocking(move || -> Result<BatchResult> {
        let progress = ProgressReporter::new_spinner("Converting observations...", quiet);
        let result = convert_files(&input, &stations, &output_file, &config, Some(&progress))?;
        progress.finish_with_message(&format!(
            "Converted {} rows into {} records",
            result.processed, result.emitted
        ));
        Ok(result)
    })
    .await?
}

fn write_report(result: &BatchResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(result)?)?;
    Ok(())
}

/// Set up structured logging on stderr; `RUST_LOG` overrides the level
pub fn setup_logging(verbose: bool, quiet: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("little_r_converter={}", log_level)));

    let init_result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    init_result.map_err(|e| ProcessingError::Config(format!("Logging setup failed: {}", e)))?;
    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_report_creates_json() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("reports").join("batch.json");

        let mut result = BatchResult::default();
        result.record_emitted();
        write_report(&result, &path)?;

        let parsed: BatchResult = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(parsed, result);
        Ok(())
    }
}
