/// 활성 리스팅 조회 (최신순, 파생 현재가 포함)
pub const GET_ACTIVE_LISTINGS: &str = r#"
    SELECT l.id, l.account_id, l.category_id, l.title, l.description,
           l.starting_price,
           COALESCE(MAX(b.price), l.starting_price) AS current_price,
           COUNT(b.id) AS num_bids,
           l.image_url, l.active, l.created_at
    FROM listings l
    LEFT JOIN bids b ON b.listing_id = l.id
    WHERE l.active
    GROUP BY l.id
    ORDER BY l.created_at DESC
"#;

/// 리스팅 조회 (종료된 리스팅도 직접 조회는 가능)
pub const GET_LISTING: &str = r#"
    SELECT l.id, l.account_id, l.category_id, l.title, l.description,
           l.starting_price,
           COALESCE(MAX(b.price), l.starting_price) AS current_price,
           COUNT(b.id) AS num_bids,
           l.image_url, l.active, l.created_at
    FROM listings l
    LEFT JOIN bids b ON b.listing_id = l.id
    WHERE l.id = $1
    GROUP BY l.id
"#;

/// 최고 입찰가 조회
pub const GET_HIGHEST_BID: &str =
    "SELECT MAX(price) as highest_bid FROM bids WHERE listing_id = $1";

/// 리스팅 입찰 이력 조회
pub const GET_LISTING_BIDS: &str = r#"
    SELECT id, listing_id, account_id, price, placed_at
    FROM bids
    WHERE listing_id = $1
    ORDER BY placed_at DESC
"#;

/// 리스팅 댓글 조회 (입력 순서 유지)
pub const GET_LISTING_COMMENTS: &str = r#"
    SELECT c.id, c.listing_id, c.account_id, a.username, c.text, c.created_at
    FROM comments c
    JOIN accounts a ON a.id = c.account_id
    WHERE c.listing_id = $1
    ORDER BY c.created_at, c.id
"#;

/// 댓글 조회
pub const GET_COMMENT: &str = r#"
    SELECT c.id, c.listing_id, c.account_id, a.username, c.text, c.created_at
    FROM comments c
    JOIN accounts a ON a.id = c.account_id
    WHERE c.id = $1
"#;

/// 모든 카테고리 조회 (활성 리스팅 수 포함)
pub const GET_CATEGORIES: &str = r#"
    SELECT c.id, c.name, c.image_url,
           COUNT(l.id) FILTER (WHERE l.active) AS active_count,
           c.created_at
    FROM categories c
    LEFT JOIN listings l ON l.category_id = c.id
    GROUP BY c.id
    ORDER BY c.name
"#;

/// 카테고리 조회
pub const GET_CATEGORY: &str = r#"
    SELECT c.id, c.name, c.image_url,
           COUNT(l.id) FILTER (WHERE l.active) AS active_count,
           c.created_at
    FROM categories c
    LEFT JOIN listings l ON l.category_id = c.id
    WHERE c.id = $1
    GROUP BY c.id
"#;

/// 카테고리의 활성 리스팅 조회
pub const GET_CATEGORY_LISTINGS: &str = r#"
    SELECT l.id, l.account_id, l.category_id, l.title, l.description,
           l.starting_price,
           COALESCE(MAX(b.price), l.starting_price) AS current_price,
           COUNT(b.id) AS num_bids,
           l.image_url, l.active, l.created_at
    FROM listings l
    LEFT JOIN bids b ON b.listing_id = l.id
    WHERE l.active AND l.category_id = $1
    GROUP BY l.id
    ORDER BY l.created_at DESC
"#;

/// 계정 관심 목록 조회 (종료된 리스팅 포함)
pub const GET_WATCHLIST: &str = r#"
    SELECT l.id, l.account_id, l.category_id, l.title, l.description,
           l.starting_price,
           COALESCE(MAX(b.price), l.starting_price) AS current_price,
           COUNT(b.id) AS num_bids,
           l.image_url, l.active, l.created_at
    FROM watchlist w
    JOIN listings l ON l.id = w.listing_id
    LEFT JOIN bids b ON b.listing_id = l.id
    WHERE w.account_id = $1
    GROUP BY l.id
    ORDER BY l.created_at DESC
"#;

/// 계정 조회
pub const GET_ACCOUNT: &str =
    "SELECT id, username, email, password_hash, created_at FROM accounts WHERE id = $1";
