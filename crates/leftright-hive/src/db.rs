use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

const SCHEMA: &str = include_str!("../schema.sql");
const MAX_CONNECTIONS: u32 = 8;
const CONNECT_ATTEMPTS: u32 = 5;

/// Concurrent writers queue on SQLite's write lock for at most this long.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    info!("🔌 Opening SQLite store at {}", db_url);

    let pool = connect_with_retry(db_url).await?;

    if let Err(e) = apply_schema(&pool, SCHEMA).await {
        tracing::error!("❌ Schema migration failed: {}", e);
        return Err(e);
    }

    info!("✅ Database connected and schema applied.");
    Ok(pool)
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

pub async fn connect(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = is_in_memory(db_url);

    let mut options = SqliteConnectOptions::from_str(db_url)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    // Every connection to `:memory:` is its own database, so keep exactly one alive.
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    pool_options.connect_with(options).await
}

async fn connect_with_retry(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let delay = Duration::from_millis(500);
    let mut attempt = 1;

    loop {
        match connect(db_url).await {
            Ok(p) => return Ok(p),
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(
                    "⚠️  DB connection attempt {}/{} failed: {}. Retrying...",
                    attempt, CONNECT_ATTEMPTS, e
                );
                attempt += 1;
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn apply_schema(pool: &SqlitePool, schema: &str) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for (i, sql) in split_sql(schema).iter().enumerate() {
        if let Err(e) = sqlx::query(sql).execute(&mut *tx).await {
            tracing::error!("🚨 Schema error in statement #{}:\n{}", i + 1, sql);
            return Err(e);
        }
    }

    tx.commit().await?;
    Ok(())
}

/// Splits a schema file into statements, dropping `--` comments.
fn split_sql(raw: &str) -> Vec<String> {
    let mut cmds = Vec::new();
    let mut current = String::new();

    for line in raw.lines() {
        let code = match line.find("--") {
            Some(idx) => &line[..idx],
            None => line,
        };
        if code.trim().is_empty() {
            continue;
        }

        current.push_str(code);
        current.push('\n');

        if code.trim_end().ends_with(';') {
            cmds.push(current.trim().to_string());
            current.clear();
        }
    }

    if !current.trim().is_empty() {
        cmds.push(current.trim().to_string());
    }
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sql_drops_comments() {
        let stmts = split_sql("-- header\nCREATE TABLE a (x INT); -- trailing\n\nCREATE TABLE b (\n  y INT\n);\n");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0], "CREATE TABLE a (x INT);");
        assert!(stmts[1].starts_with("CREATE TABLE b ("));
        assert!(!stmts.iter().any(|s| s.contains("--")));
    }

    #[test]
    fn test_split_sql_keeps_unterminated_tail() {
        assert_eq!(split_sql("SELECT 1"), vec!["SELECT 1".to_string()]);
    }

    #[test]
    fn test_schema_is_one_statement() {
        assert_eq!(split_sql(SCHEMA).len(), 1);
    }

    #[tokio::test]
    async fn test_init_in_memory_is_idempotent() {
        let pool = init_db("sqlite::memory:").await.unwrap();
        apply_schema(&pool, SCHEMA).await.unwrap();
        let n: i64 = sqlx::query_scalar("SELECT count(*) FROM layout_stats")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(n, 0);
    }
}
