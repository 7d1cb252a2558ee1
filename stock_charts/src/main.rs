use std::io;

use anyhow::Context;
use clap::Parser;
use shared_utils::logging::init_tracing;
use stock_charts::{
    cli::commands::{Cli, Commands, ComparisonArgs, OutputFormat},
    config::AppConfig,
    controller::{ComparisonController, DashboardController},
    frontend::{run_event_feed, run_prompt_session},
    providers::{DataProvider, build_provider},
    render::{JsonLinesSurface, RenderSurface, TextSurface},
    store,
};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Dashboard { data, symbol } => {
            if let Some(data) = data {
                config.dataset.path = data;
            }
            if let Some(symbol) = symbol {
                config.dataset.default_symbol = Some(symbol);
            }

            let (store, report) = store::load_path(&config.dataset.path)
                .with_context(|| format!("Failed to load dataset {}", config.dataset.path.display()))?;
            info!(?report, "Dataset ready");

            let mut controller = DashboardController::new(store, config.dataset.default_symbol.as_deref());
            let mut surface = JsonLinesSurface::new(io::stdout());
            run_event_feed(&mut controller, io::stdin().lock(), &mut surface).await?;
        }
        Commands::Watch(args) => {
            let mut controller = comparison_controller(&mut config, &args)?;
            let mut surface = JsonLinesSurface::new(io::stdout());
            run_event_feed(&mut controller, io::stdin().lock(), &mut surface).await?;
        }
        Commands::Compare { args, format } => {
            let mut controller = comparison_controller(&mut config, &args)?;
            let mut surface: Box<dyn RenderSurface> = match format {
                OutputFormat::Text => Box::new(TextSurface::new(io::stdout())),
                OutputFormat::Json => Box::new(JsonLinesSurface::new(io::stdout())),
            };
            run_prompt_session(&mut controller, io::stdin().lock(), io::stdout(), surface.as_mut()).await?;
        }
    }

    Ok(())
}

fn comparison_controller(
    config: &mut AppConfig,
    args: &ComparisonArgs,
) -> anyhow::Result<ComparisonController<Box<dyn DataProvider>>> {
    args.apply(config);
    config.validate().context("Invalid comparison settings")?;

    let provider = build_provider(config).context("Failed to initialize data provider")?;
    let window = config.comparison_window()?;
    Ok(
        ComparisonController::new(provider, window, config.comparison.title.clone())
            .with_fetch_timeout(config.fetch_timeout()),
    )
}
