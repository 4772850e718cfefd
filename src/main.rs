use basketlens::cli::commands::{Cli, Commands};
use basketlens::config::{AnalyticsConfig, LoadOptions, LogFormat, LoggingConfig};
use basketlens::domain::error::PipelineError;
use basketlens::domain::values::segment::Segment;
use basketlens::infrastructure::csv_export::{CsvFunnelSource, CsvOrderSource};
use basketlens::BasketLens;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match AnalyticsConfig::load(LoadOptions {
        config_path: cli.config.clone(),
        overrides: cli.command.tuning().into(),
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };
    init_logging(&config.logging);

    if let Err(e) = run_command(&config, cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(config: &AnalyticsConfig, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let lens = BasketLens::new(config);

    match cmd {
        Commands::Report { inputs, .. } => {
            let report = lens.report(
                &CsvFunnelSource::new(inputs.funnel),
                &CsvOrderSource::new(inputs.orders),
            )?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Affinity { orders, .. } => {
            let pairs = lens.affinity(&CsvOrderSource::new(orders))?;
            println!("{}", serde_json::to_string_pretty(&pairs)?);
        }
        Commands::Segments {
            funnel, segment, ..
        } => {
            let wanted = segment
                .map(|s| s.parse::<Segment>().map_err(PipelineError::InvalidInput))
                .transpose()?;
            let mut table = lens.segments(&CsvFunnelSource::new(funnel))?;
            if let Some(wanted) = wanted {
                table.pages.retain(|p| p.segment == wanted);
            }
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        Commands::Keys { inputs, .. } => {
            let diagnostics = lens.match_keys(
                &CsvFunnelSource::new(inputs.funnel),
                &CsvOrderSource::new(inputs.orders),
            )?;
            if diagnostics.is_zero_match() {
                eprintln!(
                    "0 matches: product title keys and landing page keys below do not line up"
                );
            }
            println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        }
    }
    Ok(())
}
