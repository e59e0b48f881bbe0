//! # insight
//!
//! Command-line interface for the business insight pipeline.
//!
//! `insight` (or `insight analyze`) runs the batch: load, aggregate,
//! forecast, write the report tables. `insight serve` starts the dashboard
//! over the tables the last batch wrote.

use clap::{Args, Parser, Subcommand};
use insight_facade::{run_analysis, AnalysisReport, AppConfig, AppConfigBuilder};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Business insight analysis and dashboard", long_about = None)]
struct Cli {
    /// Configuration file (default: ./insight.toml when present)
    #[arg(short, long, global = true, env = "INSIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding sales.csv, customers.csv and competitors.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory the report tables are written to and read from
    #[arg(long, global = true)]
    report_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the batch analysis and write the report tables (default)
    Analyze(AnalyzeArgs),

    /// Start the local dashboard
    Serve {
        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Fail instead of showing embedded sample data when inputs are missing
        #[arg(long)]
        no_fallback: bool,
    },
}

#[derive(Args, Default)]
struct AnalyzeArgs {
    /// Seasonal forecast horizon in months
    #[arg(long)]
    horizon: Option<usize>,

    /// Skip the seasonal model and write the placeholder table
    #[arg(long)]
    no_seasonal: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfigBuilder> {
    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let mut builder = AppConfigBuilder::from_config(config);
    if let Some(dir) = &cli.data_dir {
        builder = builder.data_dir(dir);
    }
    if let Some(dir) = &cli.report_dir {
        builder = builder.report_dir(dir);
    }
    Ok(builder)
}

fn run_analyze(mut builder: AppConfigBuilder, args: AnalyzeArgs) -> anyhow::Result<()> {
    if let Some(horizon) = args.horizon {
        builder = builder.seasonal_horizon(horizon);
    }
    if args.no_seasonal {
        builder = builder.seasonal_enabled(false);
    }
    let config = builder.build()?;

    println!(
        "Analyzing {} -> {}",
        config.data.dir.display(),
        config.report.dir.display()
    );
    let report = run_analysis(&config, &mut |line: &str| println!("  {line}"))?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!();
    match (report.first_month, report.last_month) {
        (Some(first), Some(last)) => println!(
            "Analysis complete: {} sales records over {} month(s), {} to {}",
            report.sales_records, report.months, first, last
        ),
        _ => println!("Analysis complete: {} sales records", report.sales_records),
    }
    println!(
        "Latest month revenue: {:.2}  profit: {:.2}  churn rate: {:.1}%",
        report.kpis.latest_month_revenue,
        report.kpis.latest_month_profit,
        report.kpis.churn_rate * 100.0
    );
    for path in &report.written {
        println!("  wrote {}", path.display());
    }
    if !report.warnings.is_empty() {
        println!("\n{} warning(s):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }
}

fn run_serve(
    mut builder: AppConfigBuilder,
    host: Option<String>,
    port: Option<u16>,
    no_fallback: bool,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        builder = builder.host(host);
    }
    if let Some(port) = port {
        builder = builder.port(port);
    }
    let config = builder.fallback_to_embedded(!no_fallback).build()?;

    println!(
        "Starting dashboard on http://{}:{}",
        config.server.host, config.server.port
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(insight_server::serve(config))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "insight=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let builder = load_config(&cli)?;

    match cli.command {
        None => run_analyze(builder, AnalyzeArgs::default()),
        Some(Commands::Analyze(args)) => run_analyze(builder, args),
        Some(Commands::Serve {
            host,
            port,
            no_fallback,
        }) => run_serve(builder, host, port, no_fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_analyze() {
        let cli = Cli::try_parse_from(["insight"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_analyze_overrides() {
        let cli = Cli::try_parse_from([
            "insight",
            "analyze",
            "--horizon",
            "12",
            "--no-seasonal",
            "--report-dir",
            "out",
        ])
        .unwrap();

        assert_eq!(cli.report_dir, Some(PathBuf::from("out")));
        match cli.command {
            Some(Commands::Analyze(args)) => {
                assert_eq!(args.horizon, Some(12));
                assert!(args.no_seasonal);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_analyze_writes_reports() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::write(
            data.path().join("sales.csv"),
            "date,product,revenue,profit,quantity\n2024-01-03,A,10,2,1\n2024-02-03,A,20,4,2\n",
        )
        .unwrap();
        std::fs::write(
            data.path().join("customers.csv"),
            "customer_id,segment,clv,churn_flag,join_date\nC1,SMB,10,0,2023-01-01\n",
        )
        .unwrap();
        std::fs::write(data.path().join("competitors.csv"), "date,competitor_sales\n").unwrap();

        let builder = AppConfigBuilder::new()
            .data_dir(data.path())
            .report_dir(out.path());
        run_analyze(builder, AnalyzeArgs::default()).unwrap();

        assert!(out.path().join("summary_kpis.csv").exists());
        assert!(out.path().join("trend_forecast.csv").exists());
        assert!(out.path().join("seasonal_forecast.csv").exists());
    }

    #[test]
    fn test_analyze_missing_inputs_fails() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let builder = AppConfigBuilder::new()
            .data_dir(data.path())
            .report_dir(out.path());

        assert!(run_analyze(builder, AnalyzeArgs::default()).is_err());
    }
}
