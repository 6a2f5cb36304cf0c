// region:    --- Imports
use crate::accounts::commands::{
    handle_login as command_handle_login, handle_register as command_handle_register,
    handle_toggle_watchlist as command_handle_toggle_watchlist, LoginCommand, RegisterCommand,
    ToggleWatchlistCommand,
};
use crate::auctions::commands::{
    handle_close_listing as command_handle_close_listing,
    handle_create_category as command_handle_create_category,
    handle_create_listing as command_handle_create_listing, handle_place_bid,
    handle_post_comment as command_handle_post_comment, CloseListingCommand, CreateCategoryCommand,
    CreateListingCommand, PlaceBidCommand, PostCommentCommand,
};
use crate::database::DatabaseManager;
use crate::query;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use sqlx::Error as SqlxError;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Error Mapping

/// 커맨드 오류 응답 (code에 따라 상태 코드 결정)
fn command_error(err: serde_json::Value) -> Response {
    let status = match err["code"].as_str() {
        Some("NOT_FOUND") => StatusCode::NOT_FOUND,
        Some("NOT_OWNER") => StatusCode::FORBIDDEN,
        Some("INVALID_CREDENTIALS") => StatusCode::UNAUTHORIZED,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(err)).into_response()
}

/// 조회 오류 응답
fn query_error(err: SqlxError) -> Response {
    match err {
        SqlxError::RowNotFound => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "찾을 수 없습니다.", "code": "NOT_FOUND"})),
        )
            .into_response(),
        e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// endregion: --- Error Mapping

// region:    --- Command Handlers

/// 입찰 요청 처리
pub async fn handle_bid(
    State(db_manager): State<Arc<DatabaseManager>>,
    Form(cmd): Form<PlaceBidCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);

    let listing_id = cmd.listing_id;

    // 입찰 처리
    match handle_place_bid(cmd, &db_manager).await {
        Ok(bid) => {
            // 갱신된 현재 가격 조회
            let updated_listing = match query::handlers::get_listing(&db_manager, listing_id).await
            {
                Ok(listing) => listing,
                Err(e) => return query_error(e),
            };
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": "입찰이 성공적으로 처리되었습니다.",
                    "current_price": updated_listing.current_price,
                    "bid": bid
                })),
            )
                .into_response()
        }
        Err(e) => command_error(e),
    }
}

/// 리스팅 생성 요청 처리
pub async fn handle_create_listing(
    State(db_manager): State<Arc<DatabaseManager>>,
    Form(cmd): Form<CreateListingCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 리스팅 생성 요청 처리 시작: {:?}", "Command", cmd);

    match command_handle_create_listing(cmd, &db_manager).await {
        Ok(listing_id) => match query::handlers::get_listing(&db_manager, listing_id).await {
            Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
            Err(e) => query_error(e),
        },
        Err(e) => command_error(e),
    }
}

/// 리스팅 종료 요청 처리
pub async fn handle_close_listing(
    State(db_manager): State<Arc<DatabaseManager>>,
    Form(cmd): Form<CloseListingCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 리스팅 종료 요청 처리 시작: {:?}", "Command", cmd);

    let listing_id = cmd.listing_id;

    match command_handle_close_listing(cmd, &db_manager).await {
        Ok(_) => match query::handlers::get_listing(&db_manager, listing_id).await {
            Ok(listing) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": "리스팅이 종료되었습니다.",
                    "listing": listing
                })),
            )
                .into_response(),
            Err(e) => query_error(e),
        },
        Err(e) => command_error(e),
    }
}

/// 댓글 작성 요청 처리
pub async fn handle_comment(
    State(db_manager): State<Arc<DatabaseManager>>,
    Form(cmd): Form<PostCommentCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 댓글 작성 요청 처리 시작: {:?}", "Command", cmd);

    match command_handle_post_comment(cmd, &db_manager).await {
        Ok(comment_id) => match query::handlers::get_comment(&db_manager, comment_id).await {
            Ok(comment) => (StatusCode::OK, Json(comment)).into_response(),
            Err(e) => query_error(e),
        },
        Err(e) => command_error(e),
    }
}

/// 카테고리 생성 요청 처리
pub async fn handle_create_category(
    State(db_manager): State<Arc<DatabaseManager>>,
    Form(cmd): Form<CreateCategoryCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 카테고리 생성 요청 처리 시작: {:?}",
        "Command", cmd
    );

    match command_handle_create_category(cmd, &db_manager).await {
        Ok(category_id) => match query::handlers::get_category(&db_manager, category_id).await {
            Ok(category) => (StatusCode::OK, Json(category)).into_response(),
            Err(e) => query_error(e),
        },
        Err(e) => command_error(e),
    }
}

/// 회원 가입 요청 처리
pub async fn handle_register(
    State(db_manager): State<Arc<DatabaseManager>>,
    Form(cmd): Form<RegisterCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 회원 가입 요청 처리 시작: {}",
        "Command", cmd.username
    );

    match command_handle_register(cmd, &db_manager).await {
        Ok(account) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "회원 가입이 완료되었습니다.",
                "account": account
            })),
        )
            .into_response(),
        Err(e) => command_error(e),
    }
}

/// 로그인 요청 처리
pub async fn handle_login(
    State(db_manager): State<Arc<DatabaseManager>>,
    Form(cmd): Form<LoginCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 로그인 요청 처리 시작: {}",
        "Command", cmd.username
    );

    match command_handle_login(cmd, &db_manager).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => command_error(e),
    }
}

/// 관심 목록 토글 요청 처리
pub async fn handle_toggle_watchlist(
    State(db_manager): State<Arc<DatabaseManager>>,
    Form(cmd): Form<ToggleWatchlistCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 관심 목록 토글 요청 처리 시작: {:?}",
        "Command", cmd
    );

    match command_handle_toggle_watchlist(cmd, &db_manager).await {
        Ok(watching) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "관심 목록이 갱신되었습니다.",
                "watching": watching
            })),
        )
            .into_response(),
        Err(e) => command_error(e),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 활성 리스팅 조회
pub async fn handle_get_active_listings(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 활성 리스팅 조회", "HandlerQuery");
    match query::handlers::get_active_listings(&db_manager).await {
        Ok(listings) => Json(listings).into_response(),
        Err(e) => query_error(e),
    }
}

/// 리스팅 조회
pub async fn handle_get_listing(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(listing_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 리스팅 조회 id: {}", "HandlerQuery", listing_id);
    match query::handlers::get_listing(&db_manager, listing_id).await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => query_error(e),
    }
}

/// 리스팅 입찰 이력 조회
pub async fn handle_get_listing_bids(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(listing_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 리스팅 입찰 이력 조회 id: {}",
        "HandlerQuery", listing_id
    );
    match query::handlers::get_listing_bids(&db_manager, listing_id).await {
        Ok(bids) => Json(bids).into_response(),
        Err(e) => query_error(e),
    }
}

/// 리스팅 댓글 조회
pub async fn handle_get_listing_comments(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(listing_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 리스팅 댓글 조회 id: {}",
        "HandlerQuery", listing_id
    );
    match query::handlers::get_listing_comments(&db_manager, listing_id).await {
        Ok(comments) => Json(comments).into_response(),
        Err(e) => query_error(e),
    }
}

/// 모든 카테고리 조회
pub async fn handle_get_categories(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 모든 카테고리 조회", "HandlerQuery");
    match query::handlers::get_categories(&db_manager).await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => query_error(e),
    }
}

/// 카테고리 조회 (활성 리스팅 포함)
pub async fn handle_get_category(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 카테고리 조회 id: {}", "HandlerQuery", category_id);
    let category = match query::handlers::get_category(&db_manager, category_id).await {
        Ok(category) => category,
        Err(e) => return query_error(e),
    };
    match query::handlers::get_category_listings(&db_manager, category_id).await {
        Ok(listings) => Json(serde_json::json!({
            "category": category,
            "listings": listings
        }))
        .into_response(),
        Err(e) => query_error(e),
    }
}

/// 계정 관심 목록 조회
pub async fn handle_get_watchlist(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(account_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 관심 목록 조회 account_id: {}",
        "HandlerQuery", account_id
    );
    // 계정 존재 확인
    if let Err(e) = query::handlers::get_account(&db_manager, account_id).await {
        return query_error(e);
    }
    match query::handlers::get_watchlist(&db_manager, account_id).await {
        Ok(listings) => Json(listings).into_response(),
        Err(e) => query_error(e),
    }
}

// endregion: --- Query Handlers
