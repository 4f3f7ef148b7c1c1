use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use leveltalk_backend::controllers::dialog::DialogController;
use leveltalk_backend::domain::dialog::DialogService;
use leveltalk_backend::domain::generation::DialogGenerator;
use leveltalk_backend::domain::tts::DialogSynthesizer;
use leveltalk_backend::infrastructure::config::{Config, LlmProvider, LogFormat, TtsProvider};
use leveltalk_backend::infrastructure::db::{create_pool, run_migrations, wait_for_database};
use leveltalk_backend::infrastructure::http::{build_router, start_http_server};
use leveltalk_backend::infrastructure::repositories::{
    ElevenLabsTtsRepository, LlmRepository, OpenAiLlmRepository, OpenAiTtsRepository,
    PgDialogRepository, StubLlmRepository, StubTtsRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting LevelTalk Backend on {}:{}",
        config.host,
        config.port
    );
    if config.is_development() {
        tracing::debug!("Running in development mode");
    }

    // Create database connection pool and wait for the database to come up
    let pool = create_pool(&config.database_url).await?;
    wait_for_database(&pool, config.db_connect_attempts).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories and provider clients
    tracing::info!("Instantiating repositories...");
    let dialog_repo = Arc::new(PgDialogRepository::new(pool.clone()));

    let llm_repo: Arc<dyn LlmRepository> = match config.llm_provider {
        LlmProvider::OpenAi => Arc::new(OpenAiLlmRepository::new(config.openai_llm())?),
        LlmProvider::Stub => Arc::new(StubLlmRepository::new()),
    };
    tracing::info!(provider = ?config.llm_provider, model = %config.llm_model, "Dialog generator configured");

    let tts_repo: Arc<dyn TtsRepository> = match config.tts_provider {
        TtsProvider::ElevenLabs => Arc::new(ElevenLabsTtsRepository::new(config.elevenlabs())?),
        TtsProvider::OpenAi => Arc::new(OpenAiTtsRepository::new(config.openai_tts())),
        TtsProvider::Stub => Arc::new(StubTtsRepository::new()),
    };
    tracing::info!(provider = ?config.tts_provider, "Speech synthesizer configured");

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let generator = Arc::new(DialogGenerator::new(llm_repo));
    let synthesizer = Arc::new(DialogSynthesizer::new(tts_repo));
    let dialog_service = Arc::new(DialogService::new(dialog_repo, generator, synthesizer));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let dialog_controller = Arc::new(DialogController::new(dialog_service));

    let app = build_router(pool, dialog_controller);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "leveltalk_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "leveltalk_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
