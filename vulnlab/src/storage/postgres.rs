use sqlx::{Pool, Postgres};

use crate::authz::AccountChanges;
use crate::session::UserId;

use super::errors::StorageError;
use super::types::{Account, CredentialRow, Profile, SEED_USERS, UserRow};

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGINT PRIMARY KEY,
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
            user_id BIGINT PRIMARY KEY REFERENCES users(id),
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
            user_id BIGINT PRIMARY KEY REFERENCES users(id),
            plan TEXT NOT NULL DEFAULT 'free',
            is_admin BOOLEAN NOT NULL DEFAULT false
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn seed_demo_data_postgres(pool: &Pool<Postgres>) -> Result<(), StorageError> {
    for user in SEED_USERS {
        sqlx::query(
            "INSERT INTO users (id, username, password) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
        )
        .bind(user.id)
        .bind(user.username)
        .bind(user.password)
        .execute(pool)
        .await?;

        sqlx::query(
            "INSERT INTO user_profiles (user_id, email, bio) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
        )
        .bind(user.id)
        .bind(user.email)
        .bind(user.bio)
        .execute(pool)
        .await?;

        sqlx::query(
            "INSERT INTO accounts (user_id, plan, is_admin) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
        )
        .bind(user.id)
        .bind(user.plan)
        .bind(user.is_admin)
        .execute(pool)
        .await?;
    }
    Ok(())
}

pub(super) async fn get_credentials_postgres(
    pool: &Pool<Postgres>,
    username: &str,
) -> Result<Option<CredentialRow>, StorageError> {
    Ok(
        sqlx::query_as::<_, CredentialRow>("SELECT id, password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?,
    )
}

pub(super) async fn get_profile_postgres(
    pool: &Pool<Postgres>,
    user_id: UserId,
) -> Result<Option<Profile>, StorageError> {
    Ok(sqlx::query_as::<_, Profile>(
        "SELECT user_id, email, bio FROM user_profiles WHERE user_id = $1",
    )
    .bind(user_id.get())
    .fetch_optional(pool)
    .await?)
}

pub(super) async fn update_email_postgres(
    pool: &Pool<Postgres>,
    user_id: UserId,
    email: &str,
) -> Result<u64, StorageError> {
    let result = sqlx::query("UPDATE user_profiles SET email = $1 WHERE user_id = $2")
        .bind(email)
        .bind(user_id.get())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub(super) async fn get_account_postgres(
    pool: &Pool<Postgres>,
    user_id: UserId,
) -> Result<Option<Account>, StorageError> {
    Ok(
        sqlx::query_as::<_, Account>("SELECT plan, is_admin FROM accounts WHERE user_id = $1")
            .bind(user_id.get())
            .fetch_optional(pool)
            .await?,
    )
}

pub(super) async fn update_account_postgres(
    pool: &Pool<Postgres>,
    changes: &AccountChanges,
) -> Result<u64, StorageError> {
    let result = match changes.is_admin {
        Some(is_admin) => {
            sqlx::query("UPDATE accounts SET plan = $1, is_admin = $2 WHERE user_id = $3")
                .bind(&changes.plan)
                .bind(is_admin)
                .bind(changes.user_id.get())
                .execute(pool)
                .await?
        }
        None => {
            sqlx::query("UPDATE accounts SET plan = $1 WHERE user_id = $2")
                .bind(&changes.plan)
                .bind(changes.user_id.get())
                .execute(pool)
                .await?
        }
    };
    Ok(result.rows_affected())
}

pub(super) async fn search_users_postgres(
    pool: &Pool<Postgres>,
    query: &str,
    term: Option<&str>,
) -> Result<Vec<UserRow>, StorageError> {
    let mut statement = sqlx::query_as::<_, UserRow>(query);
    if let Some(term) = term {
        statement = statement.bind(term);
    }
    Ok(statement.fetch_all(pool).await?)
}
