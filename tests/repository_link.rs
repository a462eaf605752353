//! PostgreSQL link store tests.
//!
//! Each test gets a fresh database with migrations applied. Run with
//! `DATABASE_URL` pointing at a server and `cargo test -- --ignored`.

use sqlx::PgPool;
use std::sync::Arc;
use tinylink::domain::entities::{InsertOutcome, NewLink};
use tinylink::domain::repositories::{LinkRepository, LinkTotals};
use tinylink::infrastructure::persistence::PgLinkRepository;

fn new_link(code: &str, target_url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        target_url: target_url.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let outcome = repo
        .create_or_get(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    let InsertOutcome::Created(link) = outcome else {
        panic!("expected a new link, got {outcome:?}");
    };
    assert_eq!(link.code, "test123");
    assert_eq!(link.target_url, "https://example.com");
    assert_eq!(link.clicks, 0);
    assert!(link.last_clicked.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_create_same_url_returns_existing(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let first = repo
        .create_or_get(new_link("first01", "https://example.com"))
        .await
        .unwrap();
    let second = repo
        .create_or_get(new_link("second1", "https://example.com"))
        .await
        .unwrap();

    let (InsertOutcome::Created(first), InsertOutcome::Existing(second)) = (first, second) else {
        panic!("expected Created then Existing");
    };
    assert_eq!(first.id, second.id);
    assert_eq!(second.code, "first01");
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_create_taken_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create_or_get(new_link("taken01", "https://a.example.com"))
        .await
        .unwrap();
    let outcome = repo
        .create_or_get(new_link("taken01", "https://b.example.com"))
        .await
        .unwrap();

    assert!(matches!(outcome, InsertOutcome::CodeTaken));
    assert!(
        repo.find_by_target_url("https://b.example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_find_by_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_or_get(new_link("abc123", "https://example.com"))
        .await
        .unwrap();

    let link = repo.find_by_code("abc123").await.unwrap();
    assert_eq!(link.unwrap().target_url, "https://example.com");

    assert!(repo.find_by_code("notfound").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    for (code, url) in [
        ("listAAA", "https://a.example.com"),
        ("listBBB", "https://b.example.com"),
        ("listCCC", "https://c.example.com"),
    ] {
        repo.create_or_get(new_link(code, url)).await.unwrap();
    }

    let codes: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|link| link.code)
        .collect();

    assert_eq!(codes, vec!["listCCC", "listBBB", "listAAA"]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_or_get(new_link("del0001", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.delete("del0001").await.unwrap());
    assert!(!repo.delete("del0001").await.unwrap());
    assert!(repo.find_by_code("del0001").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_increment_and_touch(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_or_get(new_link("clk0001", "https://example.com"))
        .await
        .unwrap();

    let link = repo.increment_and_touch("clk0001").await.unwrap().unwrap();
    assert_eq!(link.clicks, 1);
    assert!(link.last_clicked.is_some());

    assert!(repo.increment_and_touch("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_concurrent_increments(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.create_or_get(new_link("hot0001", "https://example.com"))
        .await
        .unwrap();

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_and_touch("hot0001").await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let link = repo.find_by_code("hot0001").await.unwrap().unwrap();
    assert_eq!(link.clicks, 50);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_totals_and_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert_eq!(repo.totals().await.unwrap(), LinkTotals::default());

    repo.create_or_get(new_link("tot0001", "https://a.example.com"))
        .await
        .unwrap();
    repo.create_or_get(new_link("tot0002", "https://b.example.com"))
        .await
        .unwrap();
    repo.increment_and_touch("tot0001").await.unwrap();

    assert_eq!(
        repo.totals().await.unwrap(),
        LinkTotals {
            links: 2,
            clicks: 1
        }
    );
    assert!(repo.ping().await.is_ok());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_long_target_url(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let long_url = format!("https://example.com/?q={}", "a1B2c3".repeat(1000));

    let outcome = repo
        .create_or_get(new_link("long001", &long_url))
        .await
        .unwrap();
    assert!(matches!(outcome, InsertOutcome::Created(_)));

    let again = repo
        .create_or_get(new_link("long002", &long_url))
        .await
        .unwrap();
    let InsertOutcome::Existing(link) = again else {
        panic!("expected the stored link, got {again:?}");
    };
    assert_eq!(link.code, "long001");
    assert_eq!(link.target_url, long_url);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_concurrent_creates_same_code(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.create_or_get(new_link("race123", &format!("https://example.com/{i}")))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut taken = 0;
    for task in tasks {
        match task.await.unwrap().unwrap() {
            InsertOutcome::Created(_) => created += 1,
            InsertOutcome::CodeTaken => taken += 1,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(taken, 19);
    assert_eq!(repo.totals().await.unwrap().links, 1);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_concurrent_creates_same_url(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.create_or_get(new_link(&format!("same{i:03}"), "https://example.com/same"))
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    let mut created = 0;
    for task in tasks {
        match task.await.unwrap().unwrap() {
            InsertOutcome::Created(link) => {
                created += 1;
                ids.push(link.id);
            }
            InsertOutcome::Existing(link) => ids.push(link.id),
            InsertOutcome::CodeTaken => panic!("codes are distinct"),
        }
    }
    ids.dedup();

    assert_eq!(created, 1);
    assert_eq!(ids.len(), 1);
    assert_eq!(repo.totals().await.unwrap().links, 1);
}
