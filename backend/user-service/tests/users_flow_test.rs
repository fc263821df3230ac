//! Integration tests for user profile, friendship, and complaint flows.
//!
//! These run against the database configured via DATABASE_URL and skip
//! silently when none is available.

use sqlx::PgPool;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use user_service::db::{complaint_repo, friend_repo, user_repo};

static SEQ: AtomicU32 = AtomicU32::new(0);

/// Pool against DATABASE_URL with the schema ensured, or None to skip.
async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        }
    };

    let pool = waggle_common::db::connect_pool(&url, 5).await.ok()?;
    user_service::db::ensure_schema(&pool).await.ok()?;
    Some(pool)
}

/// Insert a user with unique email/username for this run
async fn seed_user(pool: &PgPool, tag: &str) -> i64 {
    let nonce = format!(
        "{}-{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    );

    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (email, username, name, password_hash)
        VALUES ($1, $2, $3, 'x')
        RETURNING id
        "#,
    )
    .bind(format!("{tag}-{nonce}@example.com"))
    .bind(format!("{tag}-{nonce}"))
    .bind(format!("Test {tag}"))
    .fetch_one(pool)
    .await
    .expect("seed user")
}

#[tokio::test]
async fn block_is_reversible_and_records_reason() {
    let Some(pool) = test_pool().await else { return };
    let user_id = seed_user(&pool, "block").await;

    assert!(user_repo::block(&pool, user_id, "spam").await.unwrap());
    let blocked = user_repo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert!(blocked.is_blocked);
    assert_eq!(blocked.blocked_reason.as_deref(), Some("spam"));

    assert!(user_repo::unblock(&pool, user_id).await.unwrap());
    let unblocked = user_repo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert!(!unblocked.is_blocked);
    assert!(unblocked.blocked_reason.is_none());
}

#[tokio::test]
async fn blocking_missing_user_reports_failure() {
    let Some(pool) = test_pool().await else { return };
    assert!(!user_repo::block(&pool, 888_888_888, "no such user").await.unwrap());
    assert!(!user_repo::unblock(&pool, 888_888_888).await.unwrap());
}

#[tokio::test]
async fn search_matches_username_and_name() {
    let Some(pool) = test_pool().await else { return };
    let user_id = seed_user(&pool, "searchable").await;

    let by_username = user_repo::search(&pool, "SEARCHABLE").await.unwrap();
    assert!(by_username.iter().any(|u| u.id == user_id));

    let by_name = user_repo::search(&pool, "test search").await.unwrap();
    assert!(by_name.iter().any(|u| u.id == user_id));
}

#[tokio::test]
async fn friendship_is_symmetric_and_idempotent() {
    let Some(pool) = test_pool().await else { return };
    let alpha = seed_user(&pool, "friend-a").await;
    let beta = seed_user(&pool, "friend-b").await;

    friend_repo::add(&pool, alpha, beta).await.unwrap();
    friend_repo::add(&pool, alpha, beta).await.unwrap();

    assert_eq!(friend_repo::friend_ids(&pool, alpha).await.unwrap(), vec![beta]);
    assert_eq!(friend_repo::friend_ids(&pool, beta).await.unwrap(), vec![alpha]);

    assert!(friend_repo::remove(&pool, beta, alpha).await.unwrap());
    assert!(friend_repo::friend_ids(&pool, alpha).await.unwrap().is_empty());
    assert!(!friend_repo::remove(&pool, beta, alpha).await.unwrap());
}

#[tokio::test]
async fn profile_update_returns_updated_row() {
    let Some(pool) = test_pool().await else { return };
    let user_id = seed_user(&pool, "update").await;

    let updated = user_repo::update_profile(
        &pool,
        user_id,
        &format!("renamed-{user_id}@example.com"),
        &format!("renamed-{user_id}"),
        "Renamed",
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, format!("renamed-{user_id}@example.com"));

    let missing = user_repo::update_profile(&pool, 888_888_888, "x@example.com", "x", "X")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn uniqueness_probes_see_other_users_only() {
    let Some(pool) = test_pool().await else { return };
    let user_id = seed_user(&pool, "unique").await;
    let user = user_repo::find_by_id(&pool, user_id).await.unwrap().unwrap();

    // A user's own email is not "taken by another".
    assert!(!user_repo::email_taken_by_other(&pool, &user.email, user_id)
        .await
        .unwrap());

    let other = seed_user(&pool, "unique-other").await;
    assert!(user_repo::email_taken_by_other(&pool, &user.email, other)
        .await
        .unwrap());
}

#[tokio::test]
async fn complaints_page_newest_first() {
    let Some(pool) = test_pool().await else { return };
    let reporter = seed_user(&pool, "reporter").await;
    let reported = seed_user(&pool, "reported").await;

    let first = complaint_repo::create(&pool, reporter, reported, "rude words")
        .await
        .unwrap();
    let second = complaint_repo::create(&pool, reporter, reported, "still rude")
        .await
        .unwrap();

    let page = complaint_repo::list_page(&pool, 50, 0).await.unwrap();
    let pos_first = page.iter().position(|c| c.id == first.id);
    let pos_second = page.iter().position(|c| c.id == second.id);

    if let (Some(a), Some(b)) = (pos_first, pos_second) {
        assert!(b < a, "newer complaint must come first");
    }
    assert!(complaint_repo::count(&pool).await.unwrap() >= 2);
}
