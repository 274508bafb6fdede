//! Command-line entry point.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use contact_normalizer::pipeline::{
    run_pipeline, PipelineObserver, PipelineOptions, StdErrObserver,
};
use contact_normalizer::profile::{SourceFamily, SourceProfile};
use contact_normalizer::source::infer_family;
use contact_normalizer::PipelineError;

#[derive(Parser)]
#[command(
    name = "contact-normalizer",
    version,
    about = "Normalize person-record exports into validated contact CSVs",
    long_about = "Normalize person-record exports into validated contact CSVs.\n\n\
                  Reads spreadsheet workbooks, PDF table extracts (field,data CSVs)\n\
                  and SQL dumps, and writes <destination>.csv plus\n\
                  <destination>_bad.csv for rows that fail format validation."
)]
struct Cli {
    /// Path to the source file (.xlsx family, .sql, or a PDF table extract .csv).
    #[arg(short, long, value_name = "SRC")]
    source: PathBuf,

    /// Output path stem; `<stem>.csv` and `<stem>_bad.csv` are written.
    /// Defaults to `<source stem>_result` in the current directory.
    #[arg(short, long, value_name = "DST")]
    destination: Option<PathBuf>,

    /// Source family override (otherwise inferred from the file extension).
    #[arg(long, value_enum)]
    family: Option<FamilyArg>,

    /// Load a custom source profile from a JSON file instead of a built-in one.
    #[arg(long, value_name = "PROFILE")]
    profile: Option<PathBuf>,

    /// Process rows on a thread pool (output order is unchanged).
    #[arg(long)]
    parallel: bool,

    /// Print run feedback (row counts, time spent).
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FamilyArg {
    Spreadsheet,
    PdfTable,
    SqlDump,
}

impl From<FamilyArg> for SourceFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Spreadsheet => Self::Spreadsheet,
            FamilyArg::PdfTable => Self::PdfTable,
            FamilyArg::SqlDump => Self::SqlDump,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let start = Instant::now();

    let profile = match resolve_profile(cli) {
        Ok(profile) => profile,
        Err(error) => {
            eprintln!("error: {error}");
            return 1;
        }
    };

    let destination = cli
        .destination
        .clone()
        .map(strip_extension)
        .unwrap_or_else(|| derive_destination(&cli.source));

    let options = PipelineOptions {
        parallel: cli.parallel,
        observer: cli
            .debug
            .then(|| Arc::new(StdErrObserver) as Arc<dyn PipelineObserver>),
        ..Default::default()
    };

    match run_pipeline(&cli.source, &destination, &profile, &options) {
        Ok(stats) => {
            println!("CSV is ready. Path: {}.csv", destination.display());
            if cli.debug {
                println!(
                    "Rows: {} total, {} valid, {} invalid.",
                    stats.rows, stats.valid, stats.invalid
                );
                println!("Time spent to execution: {:.3} sec.", start.elapsed().as_secs_f64());
            }
            0
        }
        Err(PipelineError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("Src file not found");
            1
        }
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    }
}

fn resolve_profile(cli: &Cli) -> Result<SourceProfile, PipelineError> {
    if let Some(path) = &cli.profile {
        return SourceProfile::from_json_path(path);
    }
    let family = match cli.family {
        Some(arg) => arg.into(),
        None => infer_family(&cli.source)?,
    };
    Ok(SourceProfile::for_family(family))
}

/// Default destination: `<source basename without extension>_result`, in the
/// current directory.
fn derive_destination(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("{stem}_result"))
}

/// Drop a trailing extension from a user-supplied destination so the sinks
/// can append `.csv`/`_bad.csv` themselves.
fn strip_extension(destination: PathBuf) -> PathBuf {
    match destination.extension() {
        Some(_) => destination.with_extension(""),
        None => destination,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{derive_destination, strip_extension};

    #[test]
    fn default_destination_uses_the_source_stem() {
        assert_eq!(
            derive_destination("exports/roster.xlsx".as_ref()),
            PathBuf::from("roster_result")
        );
    }

    #[test]
    fn user_destinations_lose_their_extension() {
        assert_eq!(
            strip_extension(PathBuf::from("out/result.csv")),
            PathBuf::from("out/result")
        );
        assert_eq!(
            strip_extension(PathBuf::from("out/result")),
            PathBuf::from("out/result")
        );
    }
}
