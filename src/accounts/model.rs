use chrono::{DateTime, Utc};
use serde::Serialize;

// 계정 모델 (비밀번호 해시는 직렬화 제외)
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
