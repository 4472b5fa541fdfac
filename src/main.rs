//! `distribute` - assign submission groups to graders from a roster file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use grade_distribute::logging;
use grade_distribute::{
    Decision, DistributionConfig, DistributionReport, DistributionSession, JsonFileCommitter, Outcome,
    Reviewer, Roster, SessionError,
};

const DEFAULT_OUTPUT: &str = "distribution.json";

#[derive(Debug, Parser)]
#[command(name = "distribute", version, about = "Distribute submission groups among graders")]
struct Cli {
    /// Roster file (TOML) listing graders and groups
    roster: PathBuf,

    /// Run configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible distribution
    #[arg(long)]
    seed: Option<u64>,

    /// Commit even when some groups need manual assignment
    #[arg(long)]
    accept_partial: bool,

    /// Replace an existing distribution
    #[arg(long)]
    overwrite: bool,

    /// Where to write the accepted distribution
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,

    /// Log filter, e.g. `debug` or `grade_distribute::session=trace`
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<DistributionConfig, SessionError> {
        let mut config = match &self.config {
            Some(path) => DistributionConfig::load(path)?,
            None => DistributionConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.accept_partial |= self.accept_partial;
        config.overwrite |= self.overwrite;
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        Ok(config)
    }
}

/// Prints the report and decides from the configured flags.
struct PrintingReviewer {
    accept_partial: bool,
    overwrite: bool,
    json: bool,
}

impl Reviewer for PrintingReviewer {
    fn confirm_overwrite(&mut self) -> bool {
        if !self.overwrite {
            eprintln!("a distribution already exists; pass --overwrite to replace it");
        }
        self.overwrite
    }

    fn review(&mut self, report: &DistributionReport) -> Decision {
        if self.json {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{json}"),
                Err(err) => error!(error = %err, "could not render report"),
            }
        } else {
            print!("{report}");
        }
        if report.has_problems() && !self.accept_partial {
            eprintln!("distribution discarded; pass --accept-partial to keep it");
            Decision::Discard
        } else {
            Decision::Accept
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, SessionError> {
    let config = cli.resolve_config()?;
    let roster = Roster::load(&cli.roster)?;
    let output = config.output.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let reviewer = PrintingReviewer {
        accept_partial: config.accept_partial,
        overwrite: config.overwrite,
        json: cli.json,
    };
    let mut session = DistributionSession::new(config.engine(), JsonFileCommitter::new(&output), reviewer);

    match session.run(&roster)? {
        Outcome::Committed(_) => {
            eprintln!("distribution written to {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Discarded(_) => Ok(ExitCode::from(2)),
        Outcome::Kept => Ok(ExitCode::from(3)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "distribution failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
