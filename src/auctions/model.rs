use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 카테고리 모델 (active_count는 조회 시 집계)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub active_count: i64,
    pub created_at: DateTime<Utc>,
}

// 리스팅 모델 (current_price와 num_bids는 조회 시 집계)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub account_id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub starting_price: i64,
    pub current_price: i64,
    pub num_bids: i64,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

// 입찰 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub listing_id: i64,
    pub account_id: i64,
    pub price: i64,
    pub placed_at: DateTime<Utc>,
}

// 댓글 모델 (작성자 username 포함 조회)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub listing_id: i64,
    pub account_id: i64,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
