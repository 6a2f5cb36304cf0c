use auction_listings::database::DatabaseManager;
use auction_listings::query;
use axum::http::StatusCode;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:3000";

/// 데이터베이스 매니저 설정
async fn setup() -> Arc<DatabaseManager> {
    Arc::new(DatabaseManager::new().await)
}

/// 테스트 간 충돌을 피하기 위한 고유 이름 생성
fn unique_name(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("시간 역행")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// 시드 계정 id 조회
async fn get_account_id(db_manager: &DatabaseManager, username: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT id FROM accounts WHERE username = $1")
        .bind(username)
        .fetch_one(db_manager.pool())
        .await
        .expect("시드 계정이 없습니다")
}

/// 테스트용 리스팅 생성
async fn create_test_listing(
    db_manager: &DatabaseManager,
    account_id: i64,
    title: String,
    starting_price: i64,
) -> i64 {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_scalar::<_, i64>(
                    "INSERT INTO listings (account_id, title, description, starting_price)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id",
                )
                .bind(account_id)
                .bind(&title)
                .bind("통합 테스트를 위한 리스팅입니다.")
                .bind(starting_price)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .unwrap()
}

/// 입찰 테스트
#[tokio::test]
async fn test_place_bid() {
    let db_manager = setup().await;
    let client = Client::new();

    let alice = get_account_id(&db_manager, "alice").await;
    let bob = get_account_id(&db_manager, "bob").await;
    let listing_id =
        create_test_listing(&db_manager, alice, unique_name("입찰 테스트"), 10000).await;

    // 시작가 이상의 첫 입찰은 수락
    let response = client
        .post(format!("{}/bid", BASE_URL))
        .form(&[
            ("listing_id", listing_id.to_string()),
            ("account_id", bob.to_string()),
            ("price", "10000".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["current_price"], 10000);

    // 데이터베이스에서 갱신된 리스팅 조회
    let listing = query::handlers::get_listing(&db_manager, listing_id)
        .await
        .unwrap();
    assert_eq!(listing.current_price, 10000);
    assert_eq!(listing.num_bids, 1);
}

/// 시작가 미만 입찰 거부 테스트
#[tokio::test]
async fn test_reject_bid_below_starting_price() {
    let db_manager = setup().await;
    let client = Client::new();

    let alice = get_account_id(&db_manager, "alice").await;
    let bob = get_account_id(&db_manager, "bob").await;
    let listing_id =
        create_test_listing(&db_manager, alice, unique_name("최소가 테스트"), 10000).await;

    // 시작가보다 1센트 낮은 입찰은 거부
    let response = client
        .post(format!("{}/bid", BASE_URL))
        .form(&[
            ("listing_id", listing_id.to_string()),
            ("account_id", bob.to_string()),
            ("price", "9999".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "LOW_BID");
    assert_eq!(body["current_price"], 10000);

    // 거부된 입찰은 어떤 기록도 남기지 않는다
    let bids = query::handlers::get_listing_bids(&db_manager, listing_id)
        .await
        .unwrap();
    assert!(bids.is_empty());
}

/// 최고 입찰가 이하 입찰 거부 테스트
#[tokio::test]
async fn test_reject_bid_not_above_highest() {
    let db_manager = setup().await;
    let client = Client::new();

    let alice = get_account_id(&db_manager, "alice").await;
    let bob = get_account_id(&db_manager, "bob").await;
    let charlie = get_account_id(&db_manager, "charlie").await;
    let listing_id =
        create_test_listing(&db_manager, alice, unique_name("최고가 테스트"), 10000).await;

    // 첫 입찰
    let response = client
        .post(format!("{}/bid", BASE_URL))
        .form(&[
            ("listing_id", listing_id.to_string()),
            ("account_id", bob.to_string()),
            ("price", "15000".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // 최고 입찰가와 같은 금액은 거부
    let response = client
        .post(format!("{}/bid", BASE_URL))
        .form(&[
            ("listing_id", listing_id.to_string()),
            ("account_id", charlie.to_string()),
            ("price", "15000".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "LOW_BID");
    assert_eq!(body["current_price"], 15000);

    // 최고 입찰가 초과는 수락
    let response = client
        .post(format!("{}/bid", BASE_URL))
        .form(&[
            ("listing_id", listing_id.to_string()),
            ("account_id", charlie.to_string()),
            ("price", "15001".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let listing = query::handlers::get_listing(&db_manager, listing_id)
        .await
        .unwrap();
    assert_eq!(listing.current_price, 15001);
    assert_eq!(listing.num_bids, 2);
}

/// 리스팅 종료 테스트
#[tokio::test]
async fn test_close_listing() {
    let db_manager = setup().await;
    let client = Client::new();

    let alice = get_account_id(&db_manager, "alice").await;
    let listing_id =
        create_test_listing(&db_manager, alice, unique_name("종료 테스트"), 5000).await;

    // 소유자의 종료 요청
    let response = client
        .post(format!("{}/close", BASE_URL))
        .form(&[
            ("listing_id", listing_id.to_string()),
            ("account_id", alice.to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // 활성 리스팅 목록에서는 제외
    let response = client
        .get(format!("{}/listings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let listings: Value = response.json().await.unwrap();
    assert!(listings
        .as_array()
        .unwrap()
        .iter()
        .all(|l| l["id"] != listing_id));

    // 직접 조회는 여전히 가능하고 입찰/댓글 이력도 유지
    let response = client
        .get(format!("{}/listings/{}", BASE_URL, listing_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let listing: Value = response.json().await.unwrap();
    assert_eq!(listing["active"], false);

    // 종료는 되돌릴 수 없고, 종료된 리스팅에는 입찰할 수 없다
    let response = client
        .post(format!("{}/bid", BASE_URL))
        .form(&[
            ("listing_id", listing_id.to_string()),
            ("account_id", alice.to_string()),
            ("price", "9000".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "ALREADY_CLOSED");
}

/// 소유자가 아닌 계정의 종료 요청 거부 테스트
#[tokio::test]
async fn test_close_listing_requires_owner() {
    let db_manager = setup().await;
    let client = Client::new();

    let alice = get_account_id(&db_manager, "alice").await;
    let bob = get_account_id(&db_manager, "bob").await;
    let listing_id =
        create_test_listing(&db_manager, alice, unique_name("소유자 테스트"), 5000).await;

    let response = client
        .post(format!("{}/close", BASE_URL))
        .form(&[
            ("listing_id", listing_id.to_string()),
            ("account_id", bob.to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let listing = query::handlers::get_listing(&db_manager, listing_id)
        .await
        .unwrap();
    assert!(listing.active);
}

/// 관심 목록 토글 테스트
#[tokio::test]
async fn test_toggle_watchlist() {
    let db_manager = setup().await;
    let client = Client::new();

    let alice = get_account_id(&db_manager, "alice").await;
    let charlie = get_account_id(&db_manager, "charlie").await;
    let listing_id =
        create_test_listing(&db_manager, alice, unique_name("관심 목록 테스트"), 5000).await;

    // 첫 토글은 추가
    let response = client
        .post(format!("{}/watchlist", BASE_URL))
        .form(&[
            ("account_id", charlie.to_string()),
            ("listing_id", listing_id.to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["watching"], true);

    let watchlist = query::handlers::get_watchlist(&db_manager, charlie)
        .await
        .unwrap();
    assert!(watchlist.iter().any(|l| l.id == listing_id));

    // 두 번째 토글은 제거 (원래 상태로 복귀)
    let response = client
        .post(format!("{}/watchlist", BASE_URL))
        .form(&[
            ("account_id", charlie.to_string()),
            ("listing_id", listing_id.to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["watching"], false);

    let watchlist = query::handlers::get_watchlist(&db_manager, charlie)
        .await
        .unwrap();
    assert!(watchlist.iter().all(|l| l.id != listing_id));
}

/// 회원 가입 및 로그인 테스트
#[tokio::test]
async fn test_register_and_login() {
    let client = Client::new();
    let username = unique_name("user");

    // 회원 가입
    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[
            ("username", username.clone()),
            ("email", format!("{}@example.com", username)),
            ("password", "secret1".to_string()),
            ("confirmation", "secret1".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["account"]["username"], username.as_str());
    // 비밀번호 해시는 응답에 노출되지 않는다
    assert!(body["account"]["password_hash"].is_null());

    // 동일한 username으로는 가입 불가
    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[
            ("username", username.clone()),
            ("email", format!("{}@example.com", username)),
            ("password", "secret2".to_string()),
            ("confirmation", "secret2".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "USERNAME_TAKEN");

    // 올바른 자격 증명으로 로그인
    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[
            ("username", username.clone()),
            ("password", "secret1".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // 잘못된 비밀번호는 거부
    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[
            ("username", username.clone()),
            ("password", "wrong".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// 비밀번호 확인 불일치 테스트
#[tokio::test]
async fn test_register_password_mismatch() {
    let db_manager = setup().await;
    let client = Client::new();
    let username = unique_name("mismatch");

    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[
            ("username", username.clone()),
            ("email", format!("{}@example.com", username)),
            ("password", "secret1".to_string()),
            ("confirmation", "secret2".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "PASSWORD_MISMATCH");

    // 계정은 생성되지 않는다
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE username = $1")
        .bind(&username)
        .fetch_one(db_manager.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

/// 카테고리 이름 중복 거부 테스트
#[tokio::test]
async fn test_duplicate_category_rejected() {
    let client = Client::new();
    let name = unique_name("카테고리");

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .form(&[("name", name.clone())])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // 같은 이름은 거부
    let response = client
        .post(format!("{}/categories", BASE_URL))
        .form(&[("name", name.clone())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "DUPLICATE_CATEGORY");
}

/// 댓글 작성 테스트
#[tokio::test]
async fn test_post_comment() {
    let db_manager = setup().await;
    let client = Client::new();

    let alice = get_account_id(&db_manager, "alice").await;
    let charlie = get_account_id(&db_manager, "charlie").await;
    let listing_id =
        create_test_listing(&db_manager, alice, unique_name("댓글 테스트"), 5000).await;

    let response = client
        .post(format!("{}/comment", BASE_URL))
        .form(&[
            ("listing_id", listing_id.to_string()),
            ("account_id", charlie.to_string()),
            ("text", "직거래 가능한가요?".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["username"], "charlie");

    let comments = query::handlers::get_listing_comments(&db_manager, listing_id)
        .await
        .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "직거래 가능한가요?");
}
