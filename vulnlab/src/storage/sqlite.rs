use sqlx::{Pool, Sqlite};

use crate::authz::AccountChanges;
use crate::session::UserId;

use super::errors::StorageError;
use super::types::{Account, CredentialRow, Profile, SEED_USERS, UserRow};

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_profiles (
            user_id INTEGER PRIMARY KEY REFERENCES users(id),
            email TEXT NOT NULL,
            bio TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            user_id INTEGER PRIMARY KEY REFERENCES users(id),
            plan TEXT NOT NULL DEFAULT 'free',
            is_admin BOOLEAN NOT NULL DEFAULT false
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn seed_demo_data_sqlite(pool: &Pool<Sqlite>) -> Result<(), StorageError> {
    for user in SEED_USERS {
        sqlx::query("INSERT INTO users (id, username, password) VALUES (?, ?, ?) ON CONFLICT DO NOTHING")
            .bind(user.id)
            .bind(user.username)
            .bind(user.password)
            .execute(pool)
            .await?;

        sqlx::query(
            "INSERT INTO user_profiles (user_id, email, bio) VALUES (?, ?, ?) ON CONFLICT DO NOTHING",
        )
        .bind(user.id)
        .bind(user.email)
        .bind(user.bio)
        .execute(pool)
        .await?;

        sqlx::query(
            "INSERT INTO accounts (user_id, plan, is_admin) VALUES (?, ?, ?) ON CONFLICT DO NOTHING",
        )
        .bind(user.id)
        .bind(user.plan)
        .bind(user.is_admin)
        .execute(pool)
        .await?;
    }
    Ok(())
}

pub(super) async fn get_credentials_sqlite(
    pool: &Pool<Sqlite>,
    username: &str,
) -> Result<Option<CredentialRow>, StorageError> {
    Ok(
        sqlx::query_as::<_, CredentialRow>("SELECT id, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?,
    )
}

pub(super) async fn get_profile_sqlite(
    pool: &Pool<Sqlite>,
    user_id: UserId,
) -> Result<Option<Profile>, StorageError> {
    Ok(sqlx::query_as::<_, Profile>(
        "SELECT user_id, email, bio FROM user_profiles WHERE user_id = ?",
    )
    .bind(user_id.get())
    .fetch_optional(pool)
    .await?)
}

pub(super) async fn update_email_sqlite(
    pool: &Pool<Sqlite>,
    user_id: UserId,
    email: &str,
) -> Result<u64, StorageError> {
    let result = sqlx::query("UPDATE user_profiles SET email = ? WHERE user_id = ?")
        .bind(email)
        .bind(user_id.get())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub(super) async fn get_account_sqlite(
    pool: &Pool<Sqlite>,
    user_id: UserId,
) -> Result<Option<Account>, StorageError> {
    Ok(
        sqlx::query_as::<_, Account>("SELECT plan, is_admin FROM accounts WHERE user_id = ?")
            .bind(user_id.get())
            .fetch_optional(pool)
            .await?,
    )
}

pub(super) async fn update_account_sqlite(
    pool: &Pool<Sqlite>,
    changes: &AccountChanges,
) -> Result<u64, StorageError> {
    let result = match changes.is_admin {
        Some(is_admin) => {
            sqlx::query("UPDATE accounts SET plan = ?, is_admin = ? WHERE user_id = ?")
                .bind(&changes.plan)
                .bind(is_admin)
                .bind(changes.user_id.get())
                .execute(pool)
                .await?
        }
        None => {
            sqlx::query("UPDATE accounts SET plan = ? WHERE user_id = ?")
                .bind(&changes.plan)
                .bind(changes.user_id.get())
                .execute(pool)
                .await?
        }
    };
    Ok(result.rows_affected())
}

pub(super) async fn search_users_sqlite(
    pool: &Pool<Sqlite>,
    query: &str,
    term: Option<&str>,
) -> Result<Vec<UserRow>, StorageError> {
    let mut statement = sqlx::query_as::<_, UserRow>(query);
    if let Some(term) = term {
        statement = statement.bind(term);
    }
    Ok(statement.fetch_all(pool).await?)
}
