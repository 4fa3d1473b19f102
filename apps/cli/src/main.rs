//! One-shot ticker autocomplete from the command line.
//!
//! Loads the NASDAQ symbol directory (from cache when fresh) and prints
//! completions for each prompt given on the command line.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tickerscout_core::{
    Completer, CompletionService, ProviderIndexBuilder, RefreshConfig, RefreshingSource,
};
use tickerscout_nasdaq::NasdaqRecordProvider;

#[derive(Parser)]
#[command(
    name = "tickerscout",
    version,
    about = "Prefix autocomplete over the NASDAQ symbol directory"
)]
struct Cli {
    /// Prompts to complete, one suggestion list per prompt.
    #[arg(required = true)]
    prompts: Vec<String>,

    /// Maximum number of suggestions per prompt.
    #[arg(short, long, default_value_t = 5)]
    limit: usize,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let provider = Arc::new(NasdaqRecordProvider::new()?);
    let builder = Arc::new(ProviderIndexBuilder::new(provider));
    let source = RefreshingSource::new(builder, RefreshConfig::default());

    if let Err(err) = source.refresh().await {
        anyhow::bail!("unable to load the symbol directory: {err}");
    }
    if let Some(index) = source.current() {
        tracing::info!("symbol catalog loaded ({} records)", index.len());
    }

    let completer = CompletionService::new(source);
    for prompt in &cli.prompts {
        for completion in completer.get_completions(prompt, Some(cli.limit)) {
            let market = completion.market.as_deref().unwrap_or("-");
            println!("{market}:{}   {}", completion.ticker, completion.name);
        }
    }
    Ok(())
}
