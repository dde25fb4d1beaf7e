//! Database bootstrap: create the database, tables and optional sample data.

use crate::error::RepositoryError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Returns schema-qualified table name (e.g. "camps.talks").
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), table)
}

/// Create the schema and the speakers / camps / talks tables if missing.
/// Talks cascade with their camp; speakers cannot be deleted while referenced.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), RepositoryError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;

    let speakers = qualified_table(schema, "speakers");
    let camps = qualified_table(schema, "camps");
    let talks = qualified_table(schema, "talks");

    let ddl = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {speakers} (
                speaker_id SERIAL PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                middle_name TEXT,
                company TEXT,
                company_url TEXT,
                blog_url TEXT,
                twitter TEXT,
                github TEXT
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {camps} (
                camp_id SERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                moniker TEXT NOT NULL UNIQUE,
                event_date DATE NOT NULL,
                length INTEGER NOT NULL DEFAULT 1,
                venue_name TEXT,
                address1 TEXT,
                address2 TEXT,
                address3 TEXT,
                city_town TEXT,
                state_province TEXT,
                postal_code TEXT,
                country TEXT
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {talks} (
                talk_id SERIAL PRIMARY KEY,
                camp_id INTEGER NOT NULL REFERENCES {camps} (camp_id) ON DELETE CASCADE,
                speaker_id INTEGER NOT NULL REFERENCES {speakers} (speaker_id),
                title TEXT NOT NULL,
                abstract TEXT NOT NULL,
                level INTEGER NOT NULL DEFAULT 100
            )
            "#
        ),
        format!("CREATE INDEX IF NOT EXISTS talks_camp_id_idx ON {talks} (camp_id)"),
    ];
    for sql in &ddl {
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}

/// Insert the sample camp, speakers and talks when no camp exists yet.
/// Returns whether anything was written.
pub async fn seed_if_empty(pool: &PgPool, schema: &str) -> Result<bool, RepositoryError> {
    let camps = qualified_table(schema, "camps");
    let speakers = qualified_table(schema, "speakers");
    let talks = qualified_table(schema, "talks");

    let mut tx = pool.begin().await?;
    let (existing,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", camps))
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    let (camp_id,): (i32,) = sqlx::query_as(&format!(
        "INSERT INTO {} (name, moniker, event_date, length, venue_name, address1, city_town, state_province, postal_code, country) \
         VALUES ($1, $2, $3, 1, $4, $5, $6, $7, $8, $9) RETURNING camp_id",
        camps
    ))
    .bind("Atlanta Code Camp")
    .bind("ATL2018")
    .bind(chrono::NaiveDate::from_ymd_opt(2018, 10, 18))
    .bind("Atlanta Convention Center")
    .bind("123 Main Street")
    .bind("Atlanta")
    .bind("GA")
    .bind("12345")
    .bind("USA")
    .fetch_one(&mut *tx)
    .await?;

    let mut speaker_ids = Vec::new();
    for (first, last, blog) in [
        ("Shawn", "Wildermuth", "http://wildermuth.com"),
        ("Resa", "Wildermuth", "http://shawnandresa.com"),
    ] {
        let (id,): (i32,) = sqlx::query_as(&format!(
            "INSERT INTO {} (first_name, last_name, company, company_url, blog_url, twitter, github) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING speaker_id",
            speakers
        ))
        .bind(first)
        .bind(last)
        .bind("Wilder Minds LLC")
        .bind("http://wilderminds.com")
        .bind(blog)
        .bind(format!("@{}{}", first.to_lowercase(), last.to_lowercase()))
        .bind(format!("{}{}", first.to_lowercase(), last.to_lowercase()))
        .fetch_one(&mut *tx)
        .await?;
        speaker_ids.push(id);
    }

    for ((title, summary, level), speaker_id) in [
        ("Entity Framework From Scratch", "Working with Entity Framework from the ground up", 100),
        ("Writing Sample Data Made Easy", "Thinking of good sample data examples is tiring.", 200),
    ]
    .into_iter()
    .zip(speaker_ids)
    {
        sqlx::query(&format!(
            "INSERT INTO {} (camp_id, speaker_id, title, abstract, level) VALUES ($1, $2, $3, $4, $5)",
            talks
        ))
        .bind(camp_id)
        .bind(speaker_id)
        .bind(title)
        .bind(summary)
        .bind(level)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(true)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), RepositoryError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
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

fn parse_db_name_from_url(url: &str) -> Result<(String, String), RepositoryError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| RepositoryError::Unavailable("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
