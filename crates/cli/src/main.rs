//! GhostStack planner CLI

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use ghoststack::pallet::{Pallet, PalletStandard};
use ghoststack::{Config, CorrectionStrategy, PlanningSession};
use ghoststack_cli::{replay_events, InputParser, SessionReport};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghoststack")]
#[command(about = "Pallet placement planner with adaptive replanning")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List standard pallet sizes
    Pallets,

    /// Pack a manifest and print the plan summary
    Plan {
        /// Path to the manifest JSON (an array of boxes)
        manifest: PathBuf,

        #[command(flatten)]
        pallet: PalletArgs,

        /// Output file for the plan report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pack a manifest, then replay recorded placement events against it
    Replay {
        /// Path to the manifest JSON (an array of boxes)
        manifest: PathBuf,

        /// Path to the events JSON (an array of placement events)
        events: PathBuf,

        #[command(flatten)]
        pallet: PalletArgs,

        /// Correction policy applied after each confirmation
        #[arg(short, long, value_enum, default_value = "disabled")]
        strategy: StrategyArg,

        /// Output file for the session report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct PalletArgs {
    /// Standard pallet footprint
    #[arg(short, long, value_enum, default_value = "gma")]
    pallet: PalletArg,

    /// Custom pallet width (overrides --pallet)
    #[arg(long, requires = "depth")]
    width: Option<f64>,

    /// Custom pallet depth (overrides --pallet)
    #[arg(long, requires = "width")]
    depth: Option<f64>,
}

impl PalletArgs {
    fn resolve(&self) -> Pallet {
        match (self.width, self.depth) {
            (Some(width), Some(depth)) => Pallet::new(width, depth),
            _ => Pallet::standard(self.pallet.into()),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PalletArg {
    /// 48 x 40 in (North America)
    Gma,
    /// 47.2 x 31.5 in (EUR 1)
    Euro,
    /// 43.3 x 43.3 in (Japan)
    Jis,
    /// 45.9 x 45.9 in (Australia)
    Au,
}

impl From<PalletArg> for PalletStandard {
    fn from(arg: PalletArg) -> Self {
        match arg {
            PalletArg::Gma => PalletStandard::Gma,
            PalletArg::Euro => PalletStandard::Euro,
            PalletArg::Jis => PalletStandard::Jis,
            PalletArg::Au => PalletStandard::Au,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// No correction
    Disabled,
    /// Shift later boxes by a damped share of each sensed error
    ErrorPropagation,
    /// Offset the next box against center-of-mass drift
    StabilityOffset,
}

impl From<StrategyArg> for CorrectionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Disabled => CorrectionStrategy::Disabled,
            StrategyArg::ErrorPropagation => CorrectionStrategy::ErrorPropagation,
            StrategyArg::StabilityOffset => CorrectionStrategy::StabilityOffset,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let parser = InputParser::new();

    match cli.command {
        Commands::Pallets => {
            println!("Standard Pallets:");
            println!("=================");
            for standard in PalletStandard::ALL {
                let (width, depth) = standard.dimensions();
                println!("  {:<6} {:>5.1} x {:<5.1}", standard.name(), width, depth);
            }
            println!("\nUse 'ghoststack plan <MANIFEST> --pallet <NAME>' to plan a stack");
        }

        Commands::Plan {
            manifest,
            pallet,
            output,
        } => {
            let boxes = parser
                .parse_manifest_file(&manifest)
                .with_context(|| format!("loading {}", manifest.display()))?;

            let session = PlanningSession::new(boxes, pallet.resolve(), Config::default())?;
            let report = SessionReport::from_session(&session);
            report.print_summary();

            if let Some(path) = output {
                report.save_json(&path)?;
                println!("\nPlan saved to: {}", path.display());
            }
        }

        Commands::Replay {
            manifest,
            events,
            pallet,
            strategy,
            output,
        } => {
            let boxes = parser
                .parse_manifest_file(&manifest)
                .with_context(|| format!("loading {}", manifest.display()))?;
            let recorded = parser
                .parse_events_file(&events)
                .with_context(|| format!("loading {}", events.display()))?;

            let config = Config::new().with_correction(strategy.into());
            let mut session = PlanningSession::new(boxes, pallet.resolve(), config)?;
            let applied = replay_events(&mut session, &recorded)?;
            println!("Replayed {} of {} events\n", applied, recorded.len());

            let report = SessionReport::from_session(&session);
            report.print_summary();

            if let Some(path) = output {
                report.save_json(&path)?;
                println!("\nReport saved to: {}", path.display());
            }
        }
    }

    Ok(())
}
