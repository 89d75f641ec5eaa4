//! Record types and seed data shared by the integration tests.
//!
//! 4 users and 100 posts. Post `n` belongs to user `(n - 1) % 4 + 1` and
//! every tenth post mentions "rust" in its content.

use model::{
    core::data_type::DataType,
    schema::{Entity, EntitySchema, FieldDef},
};
use serde::Deserialize;
use std::sync::OnceLock;

pub const POST_COUNT: i64 = 100;
pub const USER_NAMES: [&str; 4] = ["alice", "bob", "carol", "dave"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

impl Entity for User {
    fn schema() -> &'static EntitySchema {
        static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            EntitySchema::builder("users")
                .field(FieldDef::new("id").sort("id").data_type(DataType::Int))
                .field(FieldDef::new("name").search("name").filter("name").sort("name"))
                .build()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub user_id: i64,
}

impl Entity for Post {
    fn schema() -> &'static EntitySchema {
        static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            EntitySchema::builder("posts")
                .field(
                    FieldDef::new("id")
                        .filter("id")
                        .sort("id")
                        .data_type(DataType::Int),
                )
                .field(
                    FieldDef::new("title")
                        .search("title")
                        .filter("title")
                        .sort("title"),
                )
                .field(FieldDef::new("content").search("content"))
                .field(
                    FieldDef::new("user_id")
                        .filter("author")
                        .column("user_id")
                        .data_type(DataType::Int),
                )
                .field(
                    FieldDef::relation("user", User::schema)
                        .filter("User")
                        .sort("User")
                        .join_on("user_id", "id"),
                )
                .build()
        })
    }
}

/// The `posts` table again, declared without type hints so filter values
/// reach the backend as raw strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlainPost {
    pub id: i64,
    pub user_id: i64,
}

impl Entity for PlainPost {
    fn schema() -> &'static EntitySchema {
        static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            EntitySchema::builder("posts")
                .field(FieldDef::new("id").filter("id").sort("id"))
                .field(FieldDef::new("user_id").filter("author"))
                .build()
        })
    }
}

/// Posts whose author links back to a post: user `n` features post `n`.
/// The searchable cycle never ends, so only the depth limit stops it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkedPost {
    pub id: i64,
    pub title: String,
}

impl Entity for LinkedPost {
    fn schema() -> &'static EntitySchema {
        static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            EntitySchema::builder("posts")
                .field(FieldDef::new("id").sort("id"))
                .field(FieldDef::new("title").search("title"))
                .field(
                    FieldDef::relation("user", linked_user_schema)
                        .search("User")
                        .join_on("user_id", "id"),
                )
                .build()
        })
    }
}

fn linked_user_schema() -> &'static EntitySchema {
    static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        EntitySchema::builder("users")
            .field(FieldDef::new("name").search("name"))
            .field(
                FieldDef::relation("best", LinkedPost::schema)
                    .search("Best")
                    .join_on("id", "id"),
            )
            .build()
    })
}

pub fn user_for_post(id: i64) -> i64 {
    (id - 1) % USER_NAMES.len() as i64 + 1
}

/// Portable DDL and inserts, one statement per entry.
pub fn seed_statements() -> Vec<String> {
    let users = USER_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| format!("({}, '{name}')", i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    let posts = (1..=POST_COUNT)
        .map(|id| {
            let content = if id % 10 == 0 { "rust weekly" } else { "notes" };
            format!(
                "({id}, 'Post {id}', '{content}', {})",
                user_for_post(id)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        "DROP TABLE IF EXISTS posts".to_string(),
        "DROP TABLE IF EXISTS users".to_string(),
        "CREATE TABLE users (id BIGINT PRIMARY KEY, name VARCHAR(64) NOT NULL)".to_string(),
        "CREATE TABLE posts (
            id BIGINT PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            content TEXT,
            user_id BIGINT NOT NULL
        )"
        .to_string(),
        format!("INSERT INTO users (id, name) VALUES {users}"),
        format!("INSERT INTO posts (id, title, content, user_id) VALUES {posts}"),
    ]
}
