use serde::Serialize;
use sqlx::{FromRow, Pool, Postgres, Sqlite};

#[derive(Clone, Debug)]
pub(crate) struct SqliteDataStore {
    pub(super) pool: sqlx::SqlitePool,
}

#[derive(Clone, Debug)]
pub(crate) struct PostgresDataStore {
    pub(super) pool: sqlx::PgPool,
}

pub(crate) trait DataStore: Send + Sync + std::fmt::Debug {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>>;
    fn as_postgres(&self) -> Option<&Pool<Postgres>>;
}

impl DataStore for SqliteDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        Some(&self.pool)
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        None
    }
}

impl DataStore for PostgresDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        None
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        Some(&self.pool)
    }
}

/// Row shape returned by user searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct CredentialRow {
    pub(crate) id: i64,
    pub(crate) password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Profile {
    pub user_id: i64,
    pub email: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Account {
    pub plan: String,
    pub is_admin: bool,
}

/// Demo data inserted when seeding is enabled.
pub(super) struct SeedUser {
    pub(super) id: i64,
    pub(super) username: &'static str,
    pub(super) password: &'static str,
    pub(super) email: &'static str,
    pub(super) bio: &'static str,
    pub(super) plan: &'static str,
    pub(super) is_admin: bool,
}

pub(super) const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        id: 1,
        username: "admin",
        password: "admin123",
        email: "admin@vulnlab.local",
        bio: "Lab administrator",
        plan: "enterprise",
        is_admin: true,
    },
    SeedUser {
        id: 7,
        username: "bob",
        password: "bob123",
        email: "bob@vulnlab.local",
        bio: "Bob's private notes",
        plan: "free",
        is_admin: false,
    },
    SeedUser {
        id: 42,
        username: "alice",
        password: "alice123",
        email: "alice@vulnlab.local",
        bio: "Alice's private notes",
        plan: "free",
        is_admin: false,
    },
];
