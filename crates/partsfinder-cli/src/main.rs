use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod render;
mod search;

#[derive(Debug, Parser)]
#[command(name = "partsfinder")]
#[command(about = "Search security, door hardware and electrical suppliers in one go")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every store for products whose title contains QUERY
    Search {
        /// Words are joined with single spaces before searching
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Show this store's tab instead of the first one with results
        #[arg(long)]
        store: Option<String>,
        /// Print the results view as JSON
        #[arg(long)]
        json: bool,
        /// Override `PARTSFINDER_API_URL` for this run
        #[arg(long)]
        api_url: Option<String>,
    },
    /// List the stores results are grouped under
    Stores {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let api_url = match &cli.command {
        Some(Commands::Search { api_url, .. }) => api_url.as_deref(),
        _ => None,
    };
    let config = partsfinder_core::load_app_config_with_api_url(api_url)?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Search {
            query,
            store,
            json,
            ..
        }) => {
            search::run_search(&config, &query.join(" "), store.as_deref(), json).await?;
        }
        Some(Commands::Stores { json }) => {
            let registry = config.store_registry()?;
            if json {
                println!("{}", serde_json::to_string_pretty(registry.stores())?);
            } else {
                print!("{}", render::render_stores(&registry));
            }
        }
        None => println!("partsfinder: try `partsfinder search <QUERY>` or `partsfinder --help`"),
    }

    Ok(())
}
