/// 리스팅 관련 커맨드 처리
/// 1. 입찰
/// 2. 리스팅 생성 및 종료
/// 3. 카테고리 생성
/// 4. 댓글 작성
// region:    --- Imports
use crate::auctions::model::Bid;
use crate::database::DatabaseManager;
use crate::query::queries;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub listing_id: i64,
    pub account_id: i64,
    pub price: i64,
}

/// 리스팅 생성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateListingCommand {
    pub account_id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub starting_price: i64,
    pub image_url: Option<String>,
}

/// 리스팅 종료 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CloseListingCommand {
    pub listing_id: i64,
    pub account_id: i64,
}

/// 카테고리 생성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub image_url: Option<String>,
}

/// 댓글 작성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostCommentCommand {
    pub listing_id: i64,
    pub account_id: i64,
    pub text: String,
}
// endregion: --- Commands

// region:    --- Bid Rule

/// 입찰 수락 규칙
/// 이전 입찰이 없으면 시작가 이상, 있으면 최고 입찰가 초과여야 한다.
/// 거부 시 충족하지 못한 임계값(current_price)을 포함한 오류를 반환한다.
pub fn validate_bid_price(
    starting_price: i64,
    highest_bid: Option<i64>,
    price: i64,
) -> Result<(), serde_json::Value> {
    match highest_bid {
        Some(highest) if price <= highest => Err(serde_json::json!({
            "error": "입찰 가격은 현재 최고 입찰가보다 높아야 합니다.",
            "code": "LOW_BID",
            "current_price": highest,
        })),
        None if price < starting_price => Err(serde_json::json!({
            "error": "입찰 가격은 시작가 이상이어야 합니다.",
            "code": "LOW_BID",
            "current_price": starting_price,
        })),
        _ => Ok(()),
    }
}

// endregion: --- Bid Rule

// region:    --- Command Handlers

/// 1. 입찰
/// 리스팅 조회, 최고 입찰가 조회, 입찰 기록 추가를 하나의 트랜잭션으로 처리
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    db_manager: &DatabaseManager,
) -> Result<Bid, serde_json::Value> {
    info!("{:<12} --> 입찰 처리 시작: {:?}", "Command", cmd);

    let mut tx = db_manager
        .pool()
        .begin()
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    // 리스팅 조회
    let listing = sqlx::query("SELECT starting_price, active FROM listings WHERE id = $1")
        .bind(cmd.listing_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?
        .ok_or_else(|| {
            serde_json::json!({"error": "리스팅을 찾을 수 없습니다.", "code": "NOT_FOUND"})
        })?;

    if !listing.get::<bool, _>("active") {
        return Err(serde_json::json!({
            "error": "이미 종료된 리스팅입니다.",
            "code": "ALREADY_CLOSED"
        }));
    }

    // 최고 입찰가 조회
    let highest_bid: Option<i64> = sqlx::query(queries::GET_HIGHEST_BID)
        .bind(cmd.listing_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?
        .get("highest_bid");

    // 입찰 수락 규칙 검증 (거부 시 트랜잭션은 그대로 롤백)
    validate_bid_price(
        listing.get::<i64, _>("starting_price"),
        highest_bid,
        cmd.price,
    )?;

    // 입찰 기록 추가
    let bid = sqlx::query_as::<_, Bid>(
        "INSERT INTO bids (listing_id, account_id, price)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(cmd.listing_id)
    .bind(cmd.account_id)
    .bind(cmd.price)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    tx.commit()
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    info!("{:<12} --> 입찰 성공: 입찰가 {}", "Command", bid.price);
    Ok(bid)
}

/// 2-1. 리스팅 생성
pub async fn handle_create_listing(
    cmd: CreateListingCommand,
    db_manager: &DatabaseManager,
) -> Result<i64, serde_json::Value> {
    info!("{:<12} --> 리스팅 생성 시작: {:?}", "Command", cmd);

    let listing_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO listings (account_id, category_id, title, description, starting_price, image_url)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(cmd.account_id)
    .bind(cmd.category_id)
    .bind(&cmd.title)
    .bind(cmd.description.unwrap_or_default())
    .bind(cmd.starting_price)
    .bind(cmd.image_url)
    .fetch_one(db_manager.pool())
    .await
    .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    Ok(listing_id)
}

/// 2-2. 리스팅 종료
/// 소유자만 종료할 수 있으며, 종료는 되돌릴 수 없다.
pub async fn handle_close_listing(
    cmd: CloseListingCommand,
    db_manager: &DatabaseManager,
) -> Result<(), serde_json::Value> {
    info!("{:<12} --> 리스팅 종료 시작: {:?}", "Command", cmd);

    let mut tx = db_manager
        .pool()
        .begin()
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    // 리스팅 조회
    let listing = sqlx::query("SELECT account_id, active FROM listings WHERE id = $1")
        .bind(cmd.listing_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?
        .ok_or_else(|| {
            serde_json::json!({"error": "리스팅을 찾을 수 없습니다.", "code": "NOT_FOUND"})
        })?;

    // 소유자 검증
    if listing.get::<i64, _>("account_id") != cmd.account_id {
        return Err(serde_json::json!({
            "error": "리스팅 소유자만 종료할 수 있습니다.",
            "code": "NOT_OWNER"
        }));
    }

    if !listing.get::<bool, _>("active") {
        return Err(serde_json::json!({
            "error": "이미 종료된 리스팅입니다.",
            "code": "ALREADY_CLOSED"
        }));
    }

    sqlx::query("UPDATE listings SET active = FALSE WHERE id = $1")
        .bind(cmd.listing_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    tx.commit()
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    Ok(())
}

/// 3. 카테고리 생성
/// 동일한 이름의 카테고리는 허용하지 않는다.
pub async fn handle_create_category(
    cmd: CreateCategoryCommand,
    db_manager: &DatabaseManager,
) -> Result<i64, serde_json::Value> {
    info!("{:<12} --> 카테고리 생성 시작: {:?}", "Command", cmd);

    sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (name, image_url)
         VALUES ($1, $2)
         ON CONFLICT (name) DO NOTHING
         RETURNING id",
    )
    .bind(&cmd.name)
    .bind(cmd.image_url)
    .fetch_optional(db_manager.pool())
    .await
    .map_err(|e| serde_json::json!({"error": e.to_string()}))?
    .ok_or_else(|| {
        serde_json::json!({
            "error": format!("이미 존재하는 카테고리 이름입니다 ({}).", cmd.name),
            "code": "DUPLICATE_CATEGORY"
        })
    })
}

/// 4. 댓글 작성
pub async fn handle_post_comment(
    cmd: PostCommentCommand,
    db_manager: &DatabaseManager,
) -> Result<i64, serde_json::Value> {
    info!("{:<12} --> 댓글 작성 시작: {:?}", "Command", cmd);

    sqlx::query_scalar::<_, i64>(
        "INSERT INTO comments (listing_id, account_id, text)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind(cmd.listing_id)
    .bind(cmd.account_id)
    .bind(&cmd.text)
    .fetch_one(db_manager.pool())
    .await
    .map_err(|e| serde_json::json!({"error": e.to_string()}))
}

// endregion: --- Command Handlers

// region:    --- Tests


// endregion: --- Tests
