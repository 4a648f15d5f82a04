use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use revpref_axioms::{
    build_relations, fixed_point, one_modification, report_to_json, ConsistencyChecker,
    ModifiedPricesReport, RelationsReport,
};
use revpref_core::config::CheckConfig;
use revpref_core::dataset::Dataset;
use revpref_core::io::{load_dataset, save_dataset};
use revpref_core::synthetic::{cobb_douglas_panel, uniform_panel};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "revpref", about = "Revealed-preference consistency checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate the configured axioms and emit a consistency report.
    Check(CheckArgs),
    /// Emit the expenditure matrix and revealed-preference relations.
    Relations(RelationsArgs),
    /// Emit prices after the indifference-class modification.
    Modify(ModifyArgs),
    /// Rescale prices so every observed budget equals one.
    Normalize(NormalizeArgs),
    /// Write a seeded synthetic panel.
    Generate(GenerateArgs),
}

#[derive(ClapArgs, Debug)]
struct DataArgs {
    /// Dataset file (`.json`, or `.csv` with a `p1..pK,x1..xK` header).
    #[arg(long)]
    data: PathBuf,
    /// Rescale prices to unit budgets before running.
    #[arg(long)]
    normalize: bool,
}

#[derive(ClapArgs, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input: DataArgs,
    /// YAML check configuration; defaults run every axiom.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct RelationsArgs {
    #[command(flatten)]
    input: DataArgs,
    /// Write the relations here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct ModifyArgs {
    #[command(flatten)]
    input: DataArgs,
    /// Apply a single modification instead of iterating to the fixed point.
    #[arg(long)]
    single_step: bool,
    /// Abort when the fixed point is not reached within this many modifications.
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Write the modified prices here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct NormalizeArgs {
    /// Dataset to rescale.
    #[arg(long)]
    data: PathBuf,
    /// Destination; the format follows the extension.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PanelKind {
    /// Single Cobb-Douglas consumer; satisfies GARP, SARP and HARP.
    CobbDouglas,
    /// Independent uniform draws rescaled to unit budgets.
    Uniform,
}

#[derive(ClapArgs, Debug)]
struct GenerateArgs {
    /// Panel family to sample.
    #[arg(long, value_enum, default_value_t = PanelKind::CobbDouglas)]
    kind: PanelKind,
    /// Master seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of observations.
    #[arg(long, default_value_t = 10)]
    observations: usize,
    /// Number of goods.
    #[arg(long, default_value_t = 3)]
    goods: usize,
    /// Destination; the format follows the extension.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => run_check(&args),
        Command::Relations(args) => run_relations(&args),
        Command::Modify(args) => run_modify(&args),
        Command::Normalize(args) => run_normalize(&args),
        Command::Generate(args) => run_generate(&args),
    }
}

fn run_check(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => CheckConfig::load(path)?,
        None => CheckConfig::default(),
    };
    let dataset = load_input(&args.input)?;
    let report = ConsistencyChecker::new(config)?.check(&dataset)?;
    info!(
        observations = report.observations,
        goods = report.goods,
        consistent = report.consistent(),
        hash = %report.analysis_hash,
        "consistency check finished"
    );
    emit(args.out.as_deref(), report_to_json(&report)?)
}

fn run_relations(args: &RelationsArgs) -> Result<(), Box<dyn Error>> {
    let dataset = load_input(&args.input)?;
    let relations = build_relations(dataset.prices(), dataset.bundles())?;
    let report = RelationsReport::from(&relations);
    emit(args.out.as_deref(), serde_json::to_string_pretty(&report)?)
}

fn run_modify(args: &ModifyArgs) -> Result<(), Box<dyn Error>> {
    let dataset = load_input(&args.input)?;
    let report = if args.single_step {
        ModifiedPricesReport::new(&one_modification(dataset.prices(), dataset.bundles())?, 1)
    } else {
        let fixed = fixed_point(dataset.prices(), dataset.bundles(), args.max_iterations)?;
        info!(iterations = fixed.iterations, "fixed point reached");
        ModifiedPricesReport::new(&fixed.prices, fixed.iterations)
    };
    emit(args.out.as_deref(), serde_json::to_string_pretty(&report)?)
}

fn run_normalize(args: &NormalizeArgs) -> Result<(), Box<dyn Error>> {
    let dataset = load_dataset(&args.data)?.normalized()?;
    save_dataset(&dataset, &args.out)?;
    info!(path = %args.out.display(), "normalized dataset written");
    Ok(())
}

fn run_generate(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let dataset = match args.kind {
        PanelKind::CobbDouglas => cobb_douglas_panel(args.seed, args.observations, args.goods)?,
        PanelKind::Uniform => uniform_panel(args.seed, args.observations, args.goods)?,
    };
    save_dataset(&dataset, &args.out)?;
    info!(path = %args.out.display(), seed = args.seed, "synthetic panel written");
    Ok(())
}

fn load_input(args: &DataArgs) -> Result<Dataset, Box<dyn Error>> {
    let dataset = load_dataset(&args.data)?;
    info!(
        path = %args.data.display(),
        observations = dataset.observations(),
        goods = dataset.goods(),
        "dataset loaded"
    );
    if args.normalize {
        Ok(dataset.normalized()?)
    } else {
        Ok(dataset)
    }
}

fn emit(out: Option<&Path>, json: String) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
