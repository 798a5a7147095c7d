use actix_web::web;

pub mod health;
pub mod players;
pub mod sessions;

/// Mount every route. Shared by `main` and the integration tests so both
/// exercise the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Game sessions: /api/sessions/**
    cfg.service(web::scope("/api/sessions").configure(sessions::configure_routes));

    // Leaderboard and players: /api/leaderboard, /api/players
    cfg.service(web::scope("/api").configure(players::configure_routes));
}
