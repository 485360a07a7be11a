use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "little-r-converter")]
#[command(about = "Convert tabular surface observations to the little_r format")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Only log warnings and errors, no progress display"
    )]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an observation CSV into a little_r file
    Convert {
        #[arg(short, long, help = "Observation CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Station CSV with station id and elevation columns")]
        stations: PathBuf,

        #[arg(
            short,
            long,
            help = "Output little_r file path [default: output/little_r-{YYMMDD}.txt]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Converter settings file (TOML, YAML or JSON)")]
        config: Option<PathBuf>,

        #[arg(long, help = "Write the batch summary as JSON to this path")]
        report: Option<PathBuf>,
    },

    /// Print WPS domain parameters as shell variable assignments
    Namelist {
        #[arg(short, long, help = "namelist.wps-style domain file")]
        file: PathBuf,

        #[arg(short, long, help = "0-based domain index to extract single values for")]
        domain_index: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::parse_from([
            "little-r-converter",
            "-q",
            "convert",
            "-i",
            "obs.csv",
            "-s",
            "stations.csv",
            "--report",
            "summary.json",
        ]);

        assert!(cli.quiet);
        match cli.command {
            Commands::Convert {
                input,
                stations,
                output_file,
                report,
                ..
            } => {
                assert_eq!(input, PathBuf::from("obs.csv"));
                assert_eq!(stations, PathBuf::from("stations.csv"));
                assert_eq!(output_file, None);
                assert_eq!(report, Some(PathBuf::from("summary.json")));
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_parse_namelist() {
        let cli = Cli::parse_from(["little-r-converter", "namelist", "-f", "domain.txt", "-d", "1"]);
        match cli.command {
            Commands::Namelist { file, domain_index } => {
                assert_eq!(file, PathBuf::from("domain.txt"));
                assert_eq!(domain_index, Some(1));
            }
            _ => panic!("expected namelist command"),
        }
    }
}
