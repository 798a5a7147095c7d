use actix_web::{web, App, HttpServer};
use memory_matcher::config::avatar::AvatarConfig;
use memory_matcher::config::db::{storage_from_env, RuntimeEnv};
use memory_matcher::config::game::GameConfig;
use memory_matcher::infra::state::build_state;
use memory_matcher::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use memory_matcher::routes;

mod telemetry;

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("❌ {message}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| exit_with("BACKEND_PORT must be a valid port number"));

    let storage = storage_from_env().unwrap_or_else(|e| exit_with(e));
    let game = GameConfig::from_env().unwrap_or_else(|e| exit_with(e));
    let avatars = AvatarConfig::from_env().unwrap_or_else(|e| exit_with(e));

    println!("🚀 Starting Memory Matcher backend on http://{host}:{port}");

    let mut builder = build_state()
        .with_env(RuntimeEnv::Prod)
        .with_game_config(game)
        .with_avatar_config(avatars);
    if let Some(kind) = storage {
        builder = builder.with_db(kind);
    }
    let app_state = builder
        .build()
        .await
        .unwrap_or_else(|e| exit_with(format!("Failed to build application state: {e}")));

    match storage {
        Some(kind) => println!("✅ Player store: {kind:?}"),
        None => println!("⚠️  Player store: in memory, scores are lost on restart"),
    }

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
