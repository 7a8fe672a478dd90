/// Watchplan Server - Multi-user playlist watch-schedule server
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use watchplan_extractor::YtDlpExtractor;
use watchplan_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};

#[derive(Parser)]
#[command(name = "watchplan-server")]
#[command(about = "Watchplan multi-user playlist scheduling server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchplan_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser { username, password } => {
            add_user(&username, &password).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Watchplan Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = watchplan_storage::create_pool(&config.storage.database_url).await?;
    watchplan_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ));
    tracing::info!("Auth service initialized");

    // Initialize playlist extractor
    let extractor = Arc::new(YtDlpExtractor::new(config.extractor.to_extractor_config()));
    tracing::info!("Extractor initialized ({})", config.extractor.ytdlp_path.display());

    // Build application state and router
    let app_state = AppState::new(pool, Arc::clone(&auth_service), extractor);
    let app = create_router(app_state, auth_service);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(username: &str, password: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = watchplan_storage::create_pool(&config.storage.database_url).await?;
    watchplan_storage::run_migrations(&pool).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );

    let password_hash = auth_service.hash_password(password)?;
    let user = watchplan_storage::users::create(&pool, username, &password_hash).await?;

    println!("Created user {} ({})", user.name, user.id);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = watchplan_storage::create_pool(&config.storage.database_url).await?;
    watchplan_storage::run_migrations(&pool).await?;

    let users = watchplan_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.id, user.name);
    }

    Ok(())
}
