#![allow(dead_code)]

use leftright_hive::config::HiveConfig;
use leftright_hive::db;
use leftright_hive::state::AppState;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub struct TestHive {
    pub url: String,
    pub pool: SqlitePool,
    pub state: Arc<AppState>,
    // Keeps the database file alive for the duration of the test.
    _dir: TempDir,
}

pub async fn file_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("hive.db").display());
    (db::init_db(&url).await.unwrap(), dir)
}

pub async fn spawn_hive(config: HiveConfig) -> TestHive {
    let (pool, dir) = file_pool().await;
    let state = Arc::new(AppState::new(pool.clone(), &config));
    spawn_with_state(state, pool, dir, config.body_limit).await
}

pub async fn spawn_with_state(
    state: Arc<AppState>,
    pool: SqlitePool,
    dir: TempDir,
    body_limit: usize,
) -> TestHive {
    let app = leftright_hive::app(state.clone(), body_limit);

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestHive {
        url: format!("http://127.0.0.1:{}", port),
        pool,
        state,
        _dir: dir,
    }
}
