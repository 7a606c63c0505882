// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for the Mako optimization dashboard.
//!
//! Every invocation starts from the seeded model registry; nothing is
//! persisted between runs apart from report exports.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mako_adapters::upstream::deploy::deploy_entry;
use mako_adapters::{
    generate_report, run_benchmark, CostAdapter, DashboardConfig, MockDeployer, TcoSummary,
};
use mako_benchmarks::{export_all, ExportFormat};
use mako_core::catalog::{self, GPU_COUNTS};
use mako_core::{
    Dashboard, EngineChoice, Error as CoreError, GpuType, HardwareGoal, MetricsGenerator, ModelId,
    ModelRecord, OptimizationMode, OptimizationTarget, TcoReport, Transition,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Mako optimization dashboard CLI.
#[derive(Parser, Debug)]
#[command(name = "mako")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Seed for the mock metrics generator.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Configuration file (defaults to an optional `mako.toml`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the registered models.
    Models {
        /// Show monthly throughput and optimization details.
        #[arg(short, long)]
        detailed: bool,
    },

    /// Add a model through the new-model wizard.
    AddModel {
        /// Hugging Face model link or repository name.
        #[arg(long)]
        link: String,

        /// GPU type: auto, a100, v100 or t4.
        #[arg(long)]
        gpu: Option<GpuType>,

        /// Number of GPUs: 1, 2, 4 or 8 (default 1). Needs a concrete `--gpu`.
        #[arg(long)]
        count: Option<u32>,

        /// Fill in the advanced settings step.
        #[arg(long)]
        advanced: bool,

        /// Optimization target: throughput or latency.
        #[arg(long, requires = "advanced")]
        target: Option<OptimizationTarget>,

        /// Optimize for a dataset instead of a target.
        #[arg(long, requires = "advanced")]
        dataset: Option<String>,

        /// Inference engine: auto, vllm, sglang, trt-llm or tgi.
        #[arg(long, requires = "advanced")]
        engine: Option<EngineChoice>,

        /// Hardware goal: performance or cost-efficiency.
        #[arg(long, requires = "advanced")]
        hardware_goal: Option<HardwareGoal>,
    },

    /// Run a simulated benchmark against a model.
    Benchmark {
        /// Model id.
        #[arg(long)]
        model: u32,

        /// Dataset id.
        #[arg(long)]
        dataset: String,

        /// File for the custom dataset.
        #[arg(long)]
        custom_file: Option<PathBuf>,

        /// Comma-separated hardware ids.
        #[arg(long, value_delimiter = ',', required = true)]
        hardware: Vec<String>,
    },

    /// Generate a standard vs. Mako-Optimized benchmark report.
    Report {
        /// Hugging Face model link or repository name.
        #[arg(long)]
        link: String,

        /// Comma-separated hardware ids (default: all).
        #[arg(long, value_delimiter = ',')]
        hardware: Vec<String>,

        /// Output directory override.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = FormatArg::Both)]
        format: FormatArg,

        /// Deploy a report row after generation.
        #[arg(long)]
        deploy: Option<String>,
    },

    /// Show configuration and catalogs.
    Status {
        /// Show detailed status information.
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Report export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// report.json
    Json,
    /// report.md
    Markdown,
    /// Both files
    Both,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Markdown => ExportFormat::Markdown,
            FormatArg::Both => ExportFormat::Both,
        }
    }
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = DashboardConfig::load_from(cli.config.as_deref(), None)
        .context("Failed to load configuration")?;
    init_tracing(&config.log_level, cli.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;
    runtime.block_on(execute(cli, config))
}

fn init_tracing(level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { level }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute a parsed command.
pub async fn execute(cli: Cli, config: DashboardConfig) -> Result<()> {
    let seed = cli.seed.or(config.seed);
    let mut dashboard =
        Dashboard::new(MetricsGenerator::from_seed(seed)).with_progress_step(config.progress_step);

    match cli.command {
        Commands::Models { detailed } => {
            for model in dashboard.registry().list() {
                print_model(model, detailed);
            }
            Ok(())
        }
        Commands::AddModel {
            link,
            gpu,
            count,
            advanced,
            target,
            dataset,
            engine,
            hardware_goal,
        } => {
            let request = NewModelRequest {
                link,
                gpu,
                count,
                advanced,
                target,
                dataset,
                engine,
                hardware_goal,
            };
            let id = add_model(&mut dashboard, &request)?;
            let model = dashboard
                .registry()
                .get(id)
                .ok_or(CoreError::UnknownModel(id))?;
            println!("{} {}", "Added".green().bold(), model.name.bold());
            print_model(model, true);
            Ok(())
        }
        Commands::Benchmark {
            model,
            dataset,
            custom_file,
            hardware,
        } => {
            let id = ModelId(model);
            prepare_benchmark(&mut dashboard, id, &dataset, custom_file, &hardware)?;

            let bar = ProgressBar::new(100);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}%")?
                    .progress_chars("#>-"),
            );
            run_benchmark(&mut dashboard, config.progress_interval(), |p| {
                bar.set_position(u64::from(p))
            })
            .await
            .ok_or_else(|| anyhow!("Benchmark did not start"))?;
            bar.finish_with_message("Benchmark complete");

            let result = dashboard
                .advance_benchmark_dialog()
                .completed()
                .ok_or_else(|| anyhow!("Benchmark result was not submitted"))?;
            println!(
                "{} {} on {}",
                "Benchmark complete:".green().bold(),
                result.dataset.name,
                result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            );

            let model = dashboard
                .registry()
                .get(id)
                .ok_or(CoreError::UnknownModel(id))?;
            print_history(model);
            Ok(())
        }
        Commands::Report {
            link,
            hardware,
            output,
            format,
            deploy,
        } => {
            start_report(&mut dashboard, &link, &hardware)?;

            let generating = new_spinner("Generating report...")?;
            let generated = generate_report(&mut dashboard, config.report_delay()).await;
            generating.finish_and_clear();
            let generated = generated.ok_or_else(|| anyhow!("Report generation was not started"))?;

            let cost = CostAdapter::with_hours_per_month(config.hours_per_month);
            let summary = cost.summarize(&generated).ok();
            print_report(&generated, summary.as_ref());

            if let Some(entry_id) = deploy {
                let deployer = MockDeployer::new(config.deploy_delay());
                let deploying = new_spinner(&format!("Deploying {}...", entry_id))?;
                let receipt = deploy_entry(&deployer, dashboard.report_panel(), &entry_id).await;
                deploying.finish_and_clear();
                println!("{}", receipt?.message.green().bold());
            }

            let report = dashboard
                .advance_report()
                .completed()
                .ok_or_else(|| anyhow!("Report was not emitted"))?;
            let dir = output.unwrap_or_else(|| config.output_dir.clone());
            let written = export_all(&dir, &report, dashboard.registry().list(), format.into(), &cost)
                .with_context(|| format!("Failed to export report to {}", dir.display()))?;
            for path in written {
                println!("  - {}", path.display());
            }
            Ok(())
        }
        Commands::Status { detailed } => {
            println!("{}", "Mako Optimization Dashboard".bold());
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("\nConfiguration:");
            for (key, value) in config.entries() {
                println!("  {:<22} {}", key, value);
            }

            if detailed {
                println!("\nDatasets:");
                for dataset in catalog::benchmark_datasets() {
                    println!("  {:<16} {} ({})", dataset.id, dataset.name, dataset.description);
                }
                println!("\nReport hardware:");
                for hw in catalog::REPORT_HARDWARE {
                    println!("  {:<16} {} ${:.2}/hr", hw.id, hw.name, hw.hourly_cost);
                }
                println!("\nOutput files:");
                for file in ["report.json", "report.md", "models.md"] {
                    println!("  - {}", config.output_dir.join(file).display());
                }
            }
            Ok(())
        }
    }
}

/// Answers for the new-model wizard.
#[derive(Debug, Clone, Default)]
pub struct NewModelRequest {
    /// Model link.
    pub link: String,
    /// GPU type; auto-select when absent.
    pub gpu: Option<GpuType>,
    /// GPU count for a concrete GPU type; 1 when absent.
    pub count: Option<u32>,
    /// Whether to visit the advanced settings step.
    pub advanced: bool,
    /// Optimization target.
    pub target: Option<OptimizationTarget>,
    /// Dataset id for dataset-specific optimization.
    pub dataset: Option<String>,
    /// Inference engine.
    pub engine: Option<EngineChoice>,
    /// Hardware goal.
    pub hardware_goal: Option<HardwareGoal>,
}

/// Drive the new-model wizard to completion.
pub fn add_model(dashboard: &mut Dashboard, request: &NewModelRequest) -> Result<ModelId> {
    let manual_gpu = request.gpu.filter(|gpu| *gpu != GpuType::Auto);
    let count = match (manual_gpu, request.count) {
        (None, Some(_)) => {
            return Err(CoreError::invalid_input("GPU count requires a concrete GPU type").into())
        }
        (_, count) => count.unwrap_or(1),
    };
    if !GPU_COUNTS.contains(&count) {
        return Err(CoreError::invalid_input(format!(
            "GPU count must be one of {:?}",
            GPU_COUNTS
        ))
        .into());
    }
    let optimization_dataset = request
        .dataset
        .as_deref()
        .map(catalog::dataset)
        .transpose()?;

    let form = dashboard.open_new_model_dialog().form_mut();
    form.set_model_link(request.link.as_str());
    match manual_gpu {
        None => form.set_auto_select_hardware(true),
        Some(gpu) => {
            form.set_auto_select_hardware(false);
            form.set_gpu_type(gpu);
            form.set_gpu_count(count);
        }
    }
    form.set_show_advanced(request.advanced);
    if let Some(target) = request.target {
        form.set_optimization_target(target);
    }
    if let Some(dataset) = optimization_dataset {
        form.set_optimization_mode(OptimizationMode::Dataset);
        form.set_optimization_dataset(dataset);
    }
    if let Some(engine) = request.engine {
        form.set_inference_engine(engine);
    }
    if let Some(goal) = request.hardware_goal {
        form.set_hardware_goal(goal);
    }

    loop {
        let label = dashboard
            .new_model_dialog()
            .map(|w| w.machine().step_label())
            .unwrap_or_default();
        match dashboard.advance_new_model_dialog() {
            Transition::Completed(id) => return Ok(id),
            Transition::Moved { from, to } => debug!(from, to, "New model wizard advanced"),
            Transition::Started => {}
            Transition::Blocked => {
                dashboard.close_new_model_dialog();
                bail!("Step '{}' is incomplete", label);
            }
        }
    }
}

fn prepare_benchmark(
    dashboard: &mut Dashboard,
    id: ModelId,
    dataset: &str,
    custom_file: Option<PathBuf>,
    hardware: &[String],
) -> Result<()> {
    dashboard.select_model(id)?;
    let dataset = catalog::benchmark_dataset(dataset)?;
    let hardware = hardware
        .iter()
        .map(|hw| catalog::benchmark_hardware(hw.trim()))
        .collect::<mako_core::Result<Vec<_>>>()?;

    let wizard = dashboard.open_benchmark_dialog(id)?;
    let form = wizard.form_mut();
    form.select_dataset(dataset);
    if let Some(path) = custom_file {
        form.choose_custom_file(path);
    }
    for hw in hardware {
        if !form.hardware().iter().any(|selected| selected.id == hw.id) {
            form.toggle_hardware(hw);
        }
    }

    loop {
        let label = wizard.machine().step_label();
        match wizard.next() {
            Transition::Started => return Ok(()),
            Transition::Moved { from, to } => debug!(from, to, "Benchmark wizard advanced"),
            Transition::Completed(_) => bail!("Benchmark finished before it started"),
            Transition::Blocked => bail!("Step '{}' is incomplete", label),
        }
    }
}

fn start_report(dashboard: &mut Dashboard, link: &str, hardware: &[String]) -> Result<()> {
    let form = dashboard.report_panel().form_mut();
    form.set_model_link(link);
    if !hardware.is_empty() {
        form.clear_hardware();
        for id in hardware {
            let hw = catalog::report_hardware(id.trim())?;
            form.set_hardware(hw.id, true);
        }
    }

    loop {
        let label = dashboard.report_panel().machine().step_label();
        match dashboard.advance_report() {
            Transition::Started => return Ok(()),
            Transition::Moved { from, to } => debug!(from, to, "Report wizard advanced"),
            Transition::Completed(_) => bail!("Report emitted before generation"),
            Transition::Blocked => bail!("Step '{}' is incomplete", label),
        }
    }
}

fn new_spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn print_model(model: &ModelRecord, detailed: bool) {
    println!("{} {}", format!("#{}", model.id).dimmed(), model.name.bold());
    println!(
        "  {} · {} · {} · {}",
        model.hardware,
        model.throughput.cyan(),
        model.latency,
        model.improvement.green()
    );
    if !detailed {
        return;
    }
    println!(
        "  Engine: {}  Target: {}  Goal: {}",
        model.inference_engine,
        model.optimization_target,
        model.hardware_goal.name()
    );
    if let Some(dataset) = &model.optimization_dataset {
        println!("  Dataset: {} ({})", dataset.name, dataset.description);
    }
    if let Some(link) = &model.model_link {
        println!("  Link: {}", link);
    }
    let series: Vec<String> = model
        .performance
        .labeled()
        .map(|(month, value)| format!("{} {}", month, value))
        .collect();
    println!("  Throughput: {}", series.join(", "));
    println!("  Benchmarks: {}", model.benchmarks.len());
}

fn print_history(model: &ModelRecord) {
    println!("\n{} benchmark history", model.name.bold());
    for result in &model.benchmarks {
        println!(
            "  {} {}",
            result.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            result.dataset.name
        );
        for sample in &result.hardware {
            println!(
                "    {:<14} {:>5} q/s {:>5} ms",
                sample.name, sample.throughput, sample.latency
            );
        }
    }
}

fn print_report(report: &TcoReport, summary: Option<&TcoSummary>) {
    println!("{} {}", "Benchmark Results for".bold(), report.model.bold());
    println!(
        "{}",
        format!(
            "{:<32} {:>10} {:>10} {:>12} {:>10}",
            "Hardware", "q/s", "ms", "q/s per $", "$/hr"
        )
        .dimmed()
    );
    for entry in &report.entries {
        let name = format!("{:<32}", entry.name);
        let name = if entry.is_optimized { name.magenta() } else { name.normal() };
        let mut marks = Vec::new();
        if entry.is_best_performance {
            marks.push("Best Performance".yellow().bold().to_string());
        }
        if entry.is_best_value {
            marks.push("Best Value".green().bold().to_string());
        }
        println!(
            "{} {:>10.1} {:>10.1} {:>12.2} {:>10.2} {}",
            name,
            entry.throughput,
            entry.latency_ms,
            entry.throughput_per_dollar,
            entry.hourly_cost,
            marks.join(" ")
        );
    }

    if let Some(summary) = summary {
        println!(
            "\nCheapest per million queries: {} (${:.2})",
            summary.cheapest.name.green(),
            summary.cheapest.cost_per_million_queries
        );
        println!(
            "Selected hardware: ${:.2}/hr, ${:.2}/month",
            summary.total_hourly_usd, summary.total_monthly_usd
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn dashboard() -> Dashboard {
        Dashboard::new(MetricsGenerator::seeded(5))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_benchmark_hardware_list() {
        let cli = Cli::try_parse_from([
            "mako", "benchmark", "--model", "2", "--dataset", "sharegpt", "--hardware", "a100,t4",
            "--seed", "9",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(9));
        match cli.command {
            Commands::Benchmark { model, hardware, .. } => {
                assert_eq!(model, 2);
                assert_eq!(hardware, vec!["a100", "t4"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_typed_options() {
        let cli = Cli::try_parse_from([
            "mako", "add-model", "--link", "gpt2", "--gpu", "a100", "--count", "4", "--advanced",
            "--engine", "trt-llm",
        ])
        .unwrap();
        match cli.command {
            Commands::AddModel { gpu, engine, .. } => {
                assert_eq!(gpu, Some(GpuType::A100));
                assert_eq!(engine, Some(EngineChoice::Engine(mako_core::InferenceEngine::TrtLlm)));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Cli::try_parse_from(["mako", "add-model", "--link", "x", "--gpu", "tpu"]).is_err());
        assert!(Cli::try_parse_from(["mako", "add-model", "--link", "x", "--engine", "tgi"]).is_err());
    }

    #[test]
    fn test_add_model_manual_gpu() {
        let mut dash = dashboard();
        let request = NewModelRequest {
            link: "meta-llama/Llama-2-7b-chat-hf".to_string(),
            gpu: Some(GpuType::A100),
            count: Some(2),
            ..Default::default()
        };
        let id = add_model(&mut dash, &request).unwrap();
        assert_eq!(id, ModelId(4));
        assert_eq!(dash.registry().get(id).unwrap().hardware, "NVIDIA A100 × 2");
    }

    #[test]
    fn test_add_model_dataset_optimization() {
        let mut dash = dashboard();
        let request = NewModelRequest {
            link: "gpt2".to_string(),
            advanced: true,
            dataset: Some("reasoning".to_string()),
            ..Default::default()
        };
        let id = add_model(&mut dash, &request).unwrap();
        let record = dash.registry().get(id).unwrap();
        assert_eq!(record.optimization_target, OptimizationTarget::Dataset);
        assert_eq!(record.optimization_dataset.as_ref().unwrap().name, "Reasoning");
    }

    #[test]
    fn test_add_model_rejects_bad_input() {
        let mut dash = dashboard();
        let blank = NewModelRequest {
            link: "   ".to_string(),
            ..Default::default()
        };
        assert!(add_model(&mut dash, &blank).is_err());
        assert!(dash.new_model_dialog().is_none());

        let odd_count = NewModelRequest {
            link: "gpt2".to_string(),
            gpu: Some(GpuType::T4),
            count: Some(3),
            ..Default::default()
        };
        assert!(add_model(&mut dash, &odd_count).is_err());
        assert_eq!(dash.registry().len(), 3);
    }

    #[test]
    fn test_add_model_count_needs_concrete_gpu() {
        let mut dash = dashboard();
        for gpu in [None, Some(GpuType::Auto)] {
            let request = NewModelRequest {
                link: "gpt2".to_string(),
                gpu,
                count: Some(4),
                ..Default::default()
            };
            let err = add_model(&mut dash, &request).unwrap_err();
            assert_eq!(err.to_string(), "Invalid input: GPU count requires a concrete GPU type");
        }
        assert_eq!(dash.registry().len(), 3);

        let auto = NewModelRequest {
            link: "gpt2".to_string(),
            gpu: Some(GpuType::Auto),
            ..Default::default()
        };
        let id = add_model(&mut dash, &auto).unwrap();
        assert_eq!(dash.registry().get(id).unwrap().hardware, "Auto-selected hardware × 1");
    }

    #[test]
    fn test_prepare_benchmark_starts_run() {
        let mut dash = dashboard();
        prepare_benchmark(&mut dash, ModelId(1), "sharegpt", None, &["a100".to_string()]).unwrap();
        assert!(dash.benchmark_dialog().unwrap().is_running());
    }

    #[test]
    fn test_prepare_benchmark_custom_needs_file() {
        let mut dash = dashboard();
        let err = prepare_benchmark(&mut dash, ModelId(1), "custom", None, &["t4".to_string()])
            .unwrap_err();
        assert_eq!(err.to_string(), "Step 'Select Dataset' is incomplete");
    }

    #[test]
    fn test_start_report_with_subset() {
        let mut dash = dashboard();
        start_report(&mut dash, "org/model", &["h100".to_string(), "l4".to_string()]).unwrap();
        assert!(dash.report_panel().is_generating());
        assert_eq!(dash.report_panel().form().selected_hardware().len(), 2);
        assert!(start_report(&mut dashboard(), "org/model", &["tpu".to_string()]).is_err());
    }

    fn quick_config(output_dir: &std::path::Path) -> DashboardConfig {
        DashboardConfig {
            progress_interval_ms: 5,
            report_delay_ms: 20,
            deploy_delay_ms: 20,
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_report_with_deploy_exports_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let cli = Cli::try_parse_from([
            "mako", "report", "--link", "org/m", "--hardware", "t4,h100", "--deploy",
            "t4-optimized", "--output", out.to_str().unwrap(), "--seed", "3",
        ])
        .unwrap();

        execute(cli, quick_config(dir.path())).await.unwrap();

        for file in ["report.json", "report.md", "models.md"] {
            assert!(out.join(file).exists(), "missing {}", file);
        }
        let markdown = std::fs::read_to_string(out.join("report.md")).unwrap();
        assert!(markdown.starts_with("# Benchmark Results for m"));
        assert!(markdown.contains("NVIDIA T4 (Mako-Optimized)"));
        assert!(!markdown.contains("NVIDIA A100"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_report_unknown_deploy_entry_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "mako", "report", "--link", "org/m", "--hardware", "t4", "--deploy", "h100",
        ])
        .unwrap();

        assert!(execute(cli, quick_config(dir.path())).await.is_err());
        assert!(!dir.path().join("report.json").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_benchmark() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "mako", "benchmark", "--model", "2", "--dataset", "sharegpt", "--hardware", "a100",
        ])
        .unwrap();
        execute(cli, quick_config(dir.path())).await.unwrap();

        let unknown = Cli::try_parse_from([
            "mako", "benchmark", "--model", "9", "--dataset", "sharegpt", "--hardware", "a100",
        ])
        .unwrap();
        let err = execute(unknown, quick_config(dir.path())).await.unwrap_err();
        assert_eq!(err.to_string(), "Model 9 not found");
    }

    #[tokio::test]
    async fn test_execute_status_and_models() {
        let dir = tempfile::tempdir().unwrap();
        for args in [
            vec!["mako", "status", "--detailed"],
            vec!["mako", "models", "--detailed"],
            vec!["mako", "add-model", "--link", "org/new", "--gpu", "v100", "--count", "8"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            execute(cli, quick_config(dir.path())).await.unwrap();
        }
    }
}
