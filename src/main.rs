use std::env::VarError;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

mod display;
mod export;
mod generator;
mod models;
mod random;
mod report;
mod roster;

use display::SortOrder;
use export::ExportFormat;
use models::{MilestonePlan, Roster};

#[derive(Parser)]
#[command(name = "time-to-productivity")]
#[command(about = "Synthetic onboarding progress for a developer roster", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GenerateArgs {
    /// Seed for reproducible data; falls back to TTP_SEED
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = SortOrder::Elapsed)]
    sort: SortOrder,
    /// CSV with `name,target` columns
    #[arg(long)]
    milestones: Option<PathBuf>,
    /// CSV with a `name` column
    #[arg(long)]
    roster: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate once and print the progress table
    Show {
        #[command(flatten)]
        args: GenerateArgs,
        #[arg(long, default_value_t = 10)]
        width: usize,
    },
    /// Print the table and regenerate on demand
    Dashboard {
        #[command(flatten)]
        args: GenerateArgs,
        #[arg(long, default_value_t = 10)]
        width: usize,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        args: GenerateArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export a snapshot as CSV or JSON
    Export {
        #[command(flatten)]
        args: GenerateArgs,
        #[arg(long, value_enum)]
        format: ExportFormat,
        /// Defaults to stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

struct Setup {
    roster: Roster,
    plan: MilestonePlan,
    seed: Option<u64>,
    sort: SortOrder,
}

impl GenerateArgs {
    fn resolve(self) -> anyhow::Result<Setup> {
        let plan = match &self.milestones {
            Some(path) => roster::load_milestones_csv(path)?,
            None => roster::default_plan()?,
        };
        let roster = match &self.roster {
            Some(path) => roster::load_roster_csv(path)?,
            None => roster::default_roster()?,
        };
        let seed = resolve_seed(self.seed, || std::env::var("TTP_SEED"))?;
        debug!(?seed, sort = self.sort.as_str(), "resolved generation settings");

        Ok(Setup {
            roster,
            plan,
            seed,
            sort: self.sort,
        })
    }
}

/// `--seed` wins; otherwise `TTP_SEED` if set. The env lookup only runs
/// when no flag was given.
fn resolve_seed(
    flag: Option<u64>,
    env: impl FnOnce() -> Result<String, VarError>,
) -> anyhow::Result<Option<u64>> {
    if flag.is_some() {
        return Ok(flag);
    }
    match env() {
        Ok(value) => Ok(Some(parse_seed(&value)?)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).context("TTP_SEED is set but unreadable"),
    }
}

fn parse_seed(value: &str) -> anyhow::Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("TTP_SEED must be an unsigned integer, got `{value}`"))
}

fn print_table(setup: &Setup, snapshot: &models::Snapshot, width: usize) {
    let developers = display::sort_developers(&snapshot.developers, setup.sort);
    println!("Time to Productivity ({})", snapshot.generated_at.format("%Y-%m-%d %H:%M UTC"));
    print!("{}", report::render_table(&developers, &setup.plan, width));
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { args, width } => {
            let setup = args.resolve()?;
            let mut rng = random::seeded(setup.seed);
            let snapshot = generator::snapshot(&setup.roster, &setup.plan, &mut rng);
            print_table(&setup, &snapshot, width);
        }
        Commands::Dashboard { args, width } => {
            let setup = args.resolve()?;
            let mut rng = random::seeded(setup.seed);
            let stdin = std::io::stdin();

            loop {
                let snapshot = generator::snapshot(&setup.roster, &setup.plan, &mut rng);
                print_table(&setup, &snapshot, width);
                print!("[Enter/r] refresh, [q] quit: ");
                std::io::stdout().flush()?;

                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                match line.trim() {
                    "q" | "quit" => break,
                    "" | "r" | "refresh" => continue,
                    other => {
                        println!("Unknown command `{other}`, refreshing.");
                    }
                }
            }
        }
        Commands::Report { args, out } => {
            let setup = args.resolve()?;
            let mut rng = random::seeded(setup.seed);
            let snapshot = generator::snapshot(&setup.roster, &setup.plan, &mut rng);
            let report = report::build_report(&snapshot, &setup.plan, setup.sort);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { args, format, out } => {
            let setup = args.resolve()?;
            let mut rng = random::seeded(setup.seed);
            let snapshot = generator::snapshot(&setup.roster, &setup.plan, &mut rng);

            match out {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    export::write_snapshot(std::io::BufWriter::new(file), format, &snapshot, &setup.plan)?;
                    println!("Exported {} developers to {}.", snapshot.developers.len(), path.display());
                }
                None => {
                    export::write_snapshot(std::io::stdout().lock(), format, &snapshot, &setup.plan)?;
                }
            }
        }
    }

    Ok(())
}
