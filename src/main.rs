use anyhow::Result;
use clap::{Parser, Subcommand};
use foodgram::{
    config::Config,
    users::{NewUser, create_user},
};
use foodgram_recipe::ledger::{self, NewIngredient};

/// foodgram - recipe catalog backend
#[derive(Parser)]
#[command(name = "foodgram")]
#[command(about = "Recipes, tags, favorites and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Import ingredients from a JSON file of `{name, measurement_unit}` objects
    LoadIngredients {
        file: std::path::PathBuf,
    },
    /// Create a user and print an API token for it
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodgram::observability::init_observability(
        "foodgram",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.to_owned());
            let port = port.unwrap_or(config.server.port);
            foodgram::server::serve(config, host, port).await
        }
        Commands::Migrate => foodgram::migrate::migrate(&config.database.url).await,
        Commands::Reset => foodgram::migrate::reset(&config.database.url).await,
        Commands::LoadIngredients { file } => load_ingredients_command(config, file).await,
        Commands::CreateUser {
            email,
            username,
            first_name,
            last_name,
        } => {
            let input = NewUser {
                email,
                username,
                first_name,
                last_name,
            };
            create_user_command(config, input).await
        }
    }
}

#[tracing::instrument(skip(config))]
async fn load_ingredients_command(config: Config, file: std::path::PathBuf) -> Result<()> {
    let content = tokio::fs::read_to_string(&file).await?;
    let ingredients: Vec<NewIngredient> = serde_json::from_str(&content)?;

    let pool = foodgram::create_pool(&config.database.url, 1).await?;
    let inserted = ledger::load_ingredients(&pool, ingredients).await?;

    println!("{inserted} ingredients loaded");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn create_user_command(config: Config, input: NewUser) -> Result<()> {
    let pool = foodgram::create_pool(&config.database.url, 1).await?;
    let id = create_user(&pool, input).await?;
    let token = foodgram::auth::generate_token(&config.jwt, id)?;

    println!("{token}");

    Ok(())
}
