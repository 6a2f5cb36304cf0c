/// 계정 관련 커맨드 처리
/// 1. 회원 가입
/// 2. 로그인 (자격 증명 검증)
/// 3. 관심 목록 토글
// region:    --- Imports
use crate::accounts::model::Account;
use crate::database::DatabaseManager;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 회원 가입 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

/// 로그인 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// 관심 목록 토글 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToggleWatchlistCommand {
    pub account_id: i64,
    pub listing_id: i64,
}
// endregion: --- Commands

// region:    --- Command Handlers

/// 1. 회원 가입
/// 비밀번호 확인이 일치해야 하며, username은 중복될 수 없다.
pub async fn handle_register(
    cmd: RegisterCommand,
    db_manager: &DatabaseManager,
) -> Result<Account, serde_json::Value> {
    info!("{:<12} --> 회원 가입 시작: {}", "Command", cmd.username);

    if cmd.password != cmd.confirmation {
        return Err(serde_json::json!({
            "error": "비밀번호와 비밀번호 확인이 일치하지 않습니다.",
            "code": "PASSWORD_MISMATCH"
        }));
    }

    // 비밀번호 해싱
    let password_hash = bcrypt::hash(&cmd.password, bcrypt::DEFAULT_COST)
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    // 계정 생성 (username 중복이면 RETURNING 없이 끝난다)
    sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (username, email, password_hash)
         VALUES ($1, $2, $3)
         ON CONFLICT (username) DO NOTHING
         RETURNING *",
    )
    .bind(&cmd.username)
    .bind(&cmd.email)
    .bind(&password_hash)
    .fetch_optional(db_manager.pool())
    .await
    .map_err(|e| serde_json::json!({"error": e.to_string()}))?
    .ok_or_else(|| {
        serde_json::json!({
            "error": format!("이미 사용 중인 username입니다 ({}).", cmd.username),
            "code": "USERNAME_TAKEN"
        })
    })
}

/// 2. 로그인
/// 자격 증명만 검증한다. 세션 관리는 호출자의 몫이다.
pub async fn handle_login(
    cmd: LoginCommand,
    db_manager: &DatabaseManager,
) -> Result<Account, serde_json::Value> {
    info!("{:<12} --> 로그인 시작: {}", "Command", cmd.username);

    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
        .bind(&cmd.username)
        .fetch_optional(db_manager.pool())
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    // username 존재 여부를 드러내지 않도록 동일한 오류로 응답
    match account {
        Some(account) if bcrypt::verify(&cmd.password, &account.password_hash).unwrap_or(false) => {
            Ok(account)
        }
        _ => Err(serde_json::json!({
            "error": "username 또는 비밀번호가 올바르지 않습니다.",
            "code": "INVALID_CREDENTIALS"
        })),
    }
}

/// 3. 관심 목록 토글
/// 이미 관심 목록에 있으면 제거, 없으면 추가. 두 번 토글하면 원래 상태로 돌아온다.
pub async fn handle_toggle_watchlist(
    cmd: ToggleWatchlistCommand,
    db_manager: &DatabaseManager,
) -> Result<bool, serde_json::Value> {
    info!("{:<12} --> 관심 목록 토글 시작: {:?}", "Command", cmd);

    let mut tx = db_manager
        .pool()
        .begin()
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    // 이미 있으면 제거
    let removed = sqlx::query(
        "DELETE FROM watchlist WHERE account_id = $1 AND listing_id = $2 RETURNING listing_id",
    )
    .bind(cmd.account_id)
    .bind(cmd.listing_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    let watching = if removed.is_some() {
        false
    } else {
        // 없으면 추가 (계정이나 리스팅이 없으면 FK 위반으로 끝난다)
        sqlx::query("INSERT INTO watchlist (account_id, listing_id) VALUES ($1, $2)")
            .bind(cmd.account_id)
            .bind(cmd.listing_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
        true
    };

    tx.commit()
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    info!("{:<12} --> 관심 목록 토글 완료: watching={}", "Command", watching);
    Ok(watching)
}

// endregion: --- Command Handlers
