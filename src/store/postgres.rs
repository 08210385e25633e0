//! PostgreSQL implementation of [`Store`], plus database and table bootstrap.

use super::{Store, StoreError};
use crate::model::{Character, Droid, NewCharacter, NewDroid, Page};
use crate::sql::{self, BindValue, QueryBuf, CHARACTERS, DROIDS};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create the database if needed, open a pool, and create the resource tables if absent.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        ensure_database_exists(database_url).await?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        ensure_tables(&pool).await?;
        Ok(PgStore { pool })
    }

    async fn fetch_all<T>(&self, q: &QueryBuf) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_optional<T>(&self, q: &QueryBuf) -> Result<Option<T>, StoreError>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn insert_returning_id(&self, q: &QueryBuf) -> Result<i64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.execute(&self.pool).await?.rows_affected())
    }
}

fn character_values(new: &NewCharacter) -> Vec<BindValue> {
    vec![
        new.name.as_str().into(),
        new.description.as_str().into(),
        new.age.into(),
    ]
}

fn droid_values(new: &NewDroid) -> Vec<BindValue> {
    vec![
        new.name.as_str().into(),
        new.description.as_str().into(),
        new.belongs.as_str().into(),
    ]
}

#[async_trait]
impl Store for PgStore {
    async fn list_characters(&self, page: Option<Page>) -> Result<Vec<Character>, StoreError> {
        let q = match page {
            Some(p) => sql::select_page(&CHARACTERS, p.limit, p.offset),
            None => sql::select_all(&CHARACTERS),
        };
        self.fetch_all(&q).await
    }

    async fn search_characters(&self, needle: &str) -> Result<Vec<Character>, StoreError> {
        self.fetch_all(&sql::select_name_contains(&CHARACTERS, needle)).await
    }

    async fn find_character(&self, id: i64) -> Result<Option<Character>, StoreError> {
        self.fetch_optional(&sql::select_by_id(&CHARACTERS, id)).await
    }

    async fn insert_character(&self, new: &NewCharacter) -> Result<i64, StoreError> {
        self.insert_returning_id(&sql::insert(&CHARACTERS, character_values(new)))
            .await
    }

    async fn update_character(&self, id: i64, new: &NewCharacter) -> Result<u64, StoreError> {
        self.execute(&sql::update(&CHARACTERS, id, character_values(new)))
            .await
    }

    async fn delete_character(&self, id: i64) -> Result<u64, StoreError> {
        self.execute(&sql::delete(&CHARACTERS, id)).await
    }

    async fn list_droids(&self, page: Page) -> Result<Vec<Droid>, StoreError> {
        self.fetch_all(&sql::select_page(&DROIDS, page.limit, page.offset))
            .await
    }

    async fn find_droid(&self, id: i64) -> Result<Option<Droid>, StoreError> {
        self.fetch_optional(&sql::select_by_id(&DROIDS, id)).await
    }

    async fn insert_droid(&self, new: &NewDroid) -> Result<i64, StoreError> {
        self.insert_returning_id(&sql::insert(&DROIDS, droid_values(new)))
            .await
    }

    async fn update_droid(&self, id: i64, new: &NewDroid) -> Result<u64, StoreError> {
        self.execute(&sql::update(&DROIDS, id, droid_values(new))).await
    }

    async fn delete_droid(&self, id: i64) -> Result<u64, StoreError> {
        self.execute(&sql::delete(&DROIDS, id)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create `characters` and `droids` if they do not exist. Idempotent; existing tables are left as-is.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS characters (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            age BIGINT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS droids (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            belongs TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let Some((admin, db_name)) = admin_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database plus the target database name, or `None`
/// when the URL names no database or names `postgres` itself.
fn admin_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
