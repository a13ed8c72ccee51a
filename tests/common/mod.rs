//! Helpers for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use myblog::db::{DbPool, establish_connection_pool};
use myblog::models::category::NewCategory;
use myblog::models::page::NewPage;
use myblog::models::post::{Post, PostCategory, PostTag};
use myblog::schema::{categories, pages, post_categories, post_tags, posts};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn insert_page(
    conn: &mut SqliteConnection,
    parent_id: Option<i32>,
    kind: &str,
    slug: &str,
    live: bool,
) -> i32 {
    diesel::insert_into(pages::table)
        .values(&NewPage {
            parent_id,
            kind,
            title: slug,
            slug,
            body: "",
            live,
            first_published_at: None,
        })
        .returning(pages::id)
        .get_result(conn)
        .expect("should insert page")
}

pub fn insert_post(
    conn: &mut SqliteConnection,
    parent_id: i32,
    slug: &str,
    date: (i32, u32, u32),
    tags: &[&str],
    live: bool,
) -> i32 {
    let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date");
    let id = diesel::insert_into(pages::table)
        .values(&NewPage {
            parent_id: Some(parent_id),
            kind: "post",
            title: slug,
            slug,
            body: "<p>Body</p>",
            live,
            first_published_at: date.and_hms_opt(12, 0, 0),
        })
        .returning(pages::id)
        .get_result(conn)
        .expect("should insert post page");

    diesel::insert_into(posts::table)
        .values(&Post {
            page_id: id,
            date,
            intro: format!("About {slug}"),
        })
        .execute(conn)
        .expect("should insert post");

    if tags.is_empty() {
        return id;
    }
    let tags: Vec<PostTag> = tags
        .iter()
        .map(|tag| PostTag {
            post_id: id,
            tag: tag.to_string(),
        })
        .collect();
    diesel::insert_into(post_tags::table)
        .values(&tags)
        .execute(conn)
        .expect("should insert tags");

    id
}

pub fn insert_category(conn: &mut SqliteConnection, name: &str, slug: &str) -> i32 {
    diesel::insert_into(categories::table)
        .values(&NewCategory { name, slug })
        .returning(categories::id)
        .get_result(conn)
        .expect("should insert category")
}

pub fn assign_category(conn: &mut SqliteConnection, post_id: i32, category_id: i32) {
    diesel::insert_into(post_categories::table)
        .values(&PostCategory {
            post_id,
            category_id,
        })
        .execute(conn)
        .expect("should assign category");
}
