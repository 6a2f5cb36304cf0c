// region:    --- Imports
use crate::database::DatabaseManager;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod accounts;
mod auctions;
mod database;
mod handlers;
mod query;

// endregion: --- Modules

// 시드 계정 공통 비밀번호
const SEED_PASSWORD: &str = "testpass";

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 데모 데이터 시드
    let seed_password_hash = bcrypt::hash(SEED_PASSWORD, bcrypt::DEFAULT_COST)?;
    if let Err(e) = db_manager.seed_demo_data(&seed_password_hash).await {
        error!("{:<12} --> 데모 데이터 시드 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데모 데이터 시드 성공", "Main");

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route(
            "/listings",
            get(handlers::handle_get_active_listings).post(handlers::handle_create_listing),
        )
        .route("/listings/:id", get(handlers::handle_get_listing))
        .route("/listings/:id/bids", get(handlers::handle_get_listing_bids))
        .route(
            "/listings/:id/comments",
            get(handlers::handle_get_listing_comments),
        )
        .route("/bid", post(handlers::handle_bid))
        .route("/close", post(handlers::handle_close_listing))
        .route("/comment", post(handlers::handle_comment))
        .route(
            "/categories",
            get(handlers::handle_get_categories).post(handlers::handle_create_category),
        )
        .route("/categories/:id", get(handlers::handle_get_category))
        .route("/register", post(handlers::handle_register))
        .route("/login", post(handlers::handle_login))
        .route("/watchlist", post(handlers::handle_toggle_watchlist))
        .route("/accounts/:id/watchlist", get(handlers::handle_get_watchlist))
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(db_manager);

    // 리스너 생성(로컬 호스트의 3000번 포트를 사용)
    let listener = TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr().unwrap()
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
