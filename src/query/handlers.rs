// region:    --- Imports
use super::queries;
use crate::accounts::model::Account;
use crate::auctions::model::{Bid, Category, Comment, Listing};
use crate::database::DatabaseManager;
use sqlx::Error as SqlxError;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 활성 리스팅 조회
pub async fn get_active_listings(db_manager: &DatabaseManager) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> 활성 리스팅 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_ACTIVE_LISTINGS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 리스팅 조회
pub async fn get_listing(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Listing, SqlxError> {
    info!("{:<12} --> 리스팅 조회 id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                    .bind(listing_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 리스팅 입찰 이력 조회
pub async fn get_listing_bids(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Vec<Bid>, SqlxError> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Bid>(queries::GET_LISTING_BIDS)
                    .bind(listing_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 리스팅 댓글 조회
pub async fn get_listing_comments(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Vec<Comment>, SqlxError> {
    info!("{:<12} --> 댓글 조회 id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Comment>(queries::GET_LISTING_COMMENTS)
                    .bind(listing_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 댓글 조회
pub async fn get_comment(
    db_manager: &DatabaseManager,
    comment_id: i64,
) -> Result<Comment, SqlxError> {
    info!("{:<12} --> 댓글 조회 comment_id: {}", "Query", comment_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Comment>(queries::GET_COMMENT)
                    .bind(comment_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 모든 카테고리 조회
pub async fn get_categories(db_manager: &DatabaseManager) -> Result<Vec<Category>, SqlxError> {
    info!("{:<12} --> 모든 카테고리 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(queries::GET_CATEGORIES)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 카테고리 조회
pub async fn get_category(
    db_manager: &DatabaseManager,
    category_id: i64,
) -> Result<Category, SqlxError> {
    info!("{:<12} --> 카테고리 조회 id: {}", "Query", category_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(queries::GET_CATEGORY)
                    .bind(category_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 카테고리의 활성 리스팅 조회
pub async fn get_category_listings(
    db_manager: &DatabaseManager,
    category_id: i64,
) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> 카테고리 리스팅 조회 id: {}", "Query", category_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_CATEGORY_LISTINGS)
                    .bind(category_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 계정 관심 목록 조회
pub async fn get_watchlist(
    db_manager: &DatabaseManager,
    account_id: i64,
) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> 관심 목록 조회 account_id: {}", "Query", account_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_WATCHLIST)
                    .bind(account_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 계정 조회
pub async fn get_account(
    db_manager: &DatabaseManager,
    account_id: i64,
) -> Result<Account, SqlxError> {
    info!("{:<12} --> 계정 조회 id: {}", "Query", account_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Account>(queries::GET_ACCOUNT)
                    .bind(account_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Query Handlers
