use anyhow::Context;
use clap::Parser;
use generator::profile::MissionConfig;
use input::decoded::write_records;
use sbfcore::{MetricValue, QualityReport};
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::report::ReportWriter;
use workflow::runner::Runner;

mod generator;
mod input;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Signal-quality reports from decoded receiver logs")]
struct Args {
    /// Decoded record file or directory to scan
    input: Option<PathBuf>,
    /// Load a workflow config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Append one CSV row per loaded file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Number of best satellites averaged into the top mean
    #[arg(long)]
    top_n: Option<usize>,
    /// Run a generated mission instead of reading input files
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write the generated mission as decoded records
    #[arg(long)]
    export: Option<PathBuf>,
}

fn describe(value: Option<&MetricValue>) -> String {
    value
        .map(ToString::to_string)
        .unwrap_or_else(|| "N/A".to_string())
}

fn summary_line(report: &QualityReport) -> String {
    format!(
        "{} -> band 1 best {} top {} mean {} | band 2 best {} top {} mean {} | events {} | mission {} min",
        report.source,
        describe(report.get("Band 1 best")),
        describe(report.get("Band 1 top n")),
        describe(report.get("Band 1 top mean")),
        describe(report.get("Band 2 best")),
        describe(report.get("Band 2 top n")),
        describe(report.get("Band 2 top mean")),
        describe(report.get("Events")),
        describe(report.get("Mission duration [min]")),
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = &args.config {
        let mut config = WorkflowConfig::load(path)?;
        config.apply_overrides(args.top_n, args.report.clone());
        config
    } else {
        WorkflowConfig::from_args(args.top_n, args.report.clone())
    };

    let mut runner = Runner::new(config.clone())?;
    let reports = if args.synthetic {
        let mission = MissionConfig {
            seed: args.seed,
            ..Default::default()
        };
        if let Some(path) = &args.export {
            write_records(path, &generator::profile::build_mission(&mission))?;
        }
        vec![runner.execute_synthetic(&mission)?]
    } else {
        let input = args
            .input
            .as_ref()
            .context("an input path is required unless --synthetic is given")?;
        runner.execute_path(input)?
    };

    let mut writer = match &config.report {
        Some(path) => Some(ReportWriter::open(path)?),
        None => None,
    };
    for report in &reports {
        println!("{}", summary_line(report));
        if let Some(writer) = writer.as_mut() {
            writer.append(report)?;
        }
    }

    let snapshot = runner.metrics();
    println!(
        "Loaded {} files ({} without data), {} samples accepted, {} dropped",
        snapshot.loads, snapshot.failed_loads, snapshot.accepted, snapshot.dropped
    );

    Ok(())
}
