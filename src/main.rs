//! Wealthscape command line driver
//!
//! `run` simulates one world and reports periodic statistics, `compare` runs
//! several policy variants side by side from the same seed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use wealthscape::core::config::RunConfig;
use wealthscape::core::error::Result;
use wealthscape::policy::{HarvestPolicy, RebirthPolicy, RedistributionPolicy};
use wealthscape::simulation::{Comparison, CsvLayout, CsvSink, Row, RowSink, World};

#[derive(Parser, Debug)]
#[command(name = "wealthscape")]
#[command(about = "Agent-based wealth distribution on a renewable grain torus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate one world
    Run {
        #[command(flatten)]
        common: CommonArgs,

        /// Rebirth policy: fresh, inheritance or retain_wealth
        #[arg(long)]
        rebirth: Option<RebirthPolicy>,

        /// Harvest policy: even or spreading
        #[arg(long)]
        harvest: Option<HarvestPolicy>,

        /// Redistribution policy: disabled or tax
        #[arg(long)]
        redistribution: Option<RedistributionPolicy>,

        /// Write per-report wealth classes to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write per-report wealth lists (one line per turtle) to this CSV file
        #[arg(long)]
        wealth_csv: Option<PathBuf>,

        /// Write the final snapshot as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Run the configured policy variants side by side
    Compare {
        #[command(flatten)]
        common: CommonArgs,

        /// Write per-report comparison rows to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the comparison summary as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print the default run configuration as TOML
    DefaultConfig,
}

/// Options shared by every simulating subcommand
#[derive(Args, Debug)]
struct CommonArgs {
    /// Run configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Report every N ticks (0 disables periodic reports)
    #[arg(long)]
    report_every: Option<u64>,

    /// Number of turtles
    #[arg(long)]
    population: Option<u32>,
}

impl CommonArgs {
    /// Load the configuration file (or defaults) and apply command line overrides
    fn resolve(&self) -> Result<RunConfig> {
        let mut run = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if let Some(seed) = self.seed {
            run.seed = seed;
        }
        if let Some(ticks) = self.ticks {
            run.ticks = ticks;
        }
        if let Some(report_every) = self.report_every {
            run.report_every = report_every;
        }
        if let Some(population) = self.population {
            run.world.population = population;
        }
        run.world.validate()?;
        Ok(run)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Run {
            common,
            rebirth,
            harvest,
            redistribution,
            csv,
            wealth_csv,
            json,
        } => run_single(
            &common,
            (rebirth, harvest, redistribution),
            csv.as_deref(),
            wealth_csv.as_deref(),
            json.as_deref(),
        ),
        Commands::Compare { common, csv, json } => {
            run_comparison(&common, csv.as_deref(), json.as_deref())
        }
        Commands::DefaultConfig => print_default_config(),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn open_csv(path: &Path, layout: CsvLayout) -> Result<CsvSink<BufWriter<File>>> {
    let file = File::create(path)?;
    CsvSink::new(BufWriter::new(file), layout)
}

fn run_single(
    common: &CommonArgs,
    overrides: (
        Option<RebirthPolicy>,
        Option<HarvestPolicy>,
        Option<RedistributionPolicy>,
    ),
    csv: Option<&Path>,
    wealth_csv: Option<&Path>,
    json: Option<&Path>,
) -> Result<()> {
    let run = common.resolve()?;
    let mut policies = run.policies;
    let (rebirth, harvest, redistribution) = overrides;
    if let Some(rebirth) = rebirth {
        policies.rebirth = rebirth;
    }
    if let Some(harvest) = harvest {
        policies.harvest = harvest;
    }
    if let Some(redistribution) = redistribution {
        policies.redistribution = redistribution;
    }

    let mut world = World::initialize(run.world.clone(), policies, run.seed)?;
    let mut class_sink = csv.map(|p| open_csv(p, CsvLayout::Classes)).transpose()?;
    let mut wealth_sink = wealth_csv
        .map(|p| open_csv(p, CsvLayout::Wealths))
        .transpose()?;

    tracing::info!(
        rebirth = %policies.rebirth,
        harvest = %policies.harvest,
        redistribution = %policies.redistribution,
        ticks = run.ticks,
        "Starting run"
    );

    for _ in 0..run.ticks {
        world.step();
        if run.report_every == 0 || world.tick() % run.report_every != 0 {
            continue;
        }

        let snapshot = world.snapshot();
        println!("{}", snapshot.summary());
        if let Some(sink) = class_sink.as_mut() {
            sink.accept(&Row::Classes(&snapshot))?;
        }
        if let Some(sink) = wealth_sink.as_mut() {
            let wealths = world.wealths();
            sink.accept(&Row::Wealths {
                tick: world.tick(),
                wealths: &wealths,
            })?;
        }
    }

    let snapshot = world.snapshot();
    println!("Final: {}", snapshot.summary());
    print_vision_analysis(&world);

    if let Some(sink) = class_sink {
        let rows = sink.rows_written();
        sink.into_inner()?;
        tracing::info!(rows, "Class CSV written");
    }
    if let Some(sink) = wealth_sink {
        sink.into_inner()?;
    }
    if let Some(path) = json {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush()?;
    }
    Ok(())
}

fn print_vision_analysis(world: &World) {
    println!("Vision analysis:");
    for band in world.vision_breakdown() {
        println!(
            "  vision {}: {} turtles, mean wealth {:.2} (min {}, max {})",
            band.vision, band.count, band.mean_wealth, band.min_wealth, band.max_wealth
        );
    }
    println!(
        "  vision/wealth correlation: {:.4}",
        world.vision_wealth_correlation()
    );
}

fn run_comparison(common: &CommonArgs, csv: Option<&Path>, json: Option<&Path>) -> Result<()> {
    let run = common.resolve()?;
    let mut comparison = Comparison::from_run_config(&run)?;
    let mut sink = csv.map(|p| open_csv(p, CsvLayout::Comparison)).transpose()?;

    let summary = comparison.run(
        run.ticks,
        run.report_every,
        sink.as_mut().map(|s| s as &mut dyn RowSink),
    )?;

    println!("Comparison after {} ticks:", summary.ticks);
    for variant in &summary.variants {
        let gini_change = variant
            .gini_change_percent
            .map(|c| format!(" ({:+.2}%)", c))
            .unwrap_or_default();
        let wealth_change = variant
            .wealth_change_percent
            .map(|c| format!(" ({:+.2}%)", c))
            .unwrap_or_default();
        println!(
            "  {:<12} average gini {:.4}{}, average wealth {:.2}{}, final gini {:.4}",
            variant.name,
            variant.average_gini,
            gini_change,
            variant.average_mean_wealth,
            wealth_change,
            variant.final_gini
        );
    }

    if let Some(sink) = sink {
        sink.into_inner()?;
    }
    if let Some(path) = json {
        std::fs::write(path, summary.to_json()?)?;
    }
    Ok(())
}

fn print_default_config() -> Result<()> {
    let text = toml::to_string_pretty(&RunConfig::default())?;
    print!("{}", text);
    Ok(())
}
