use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

/// Persisted aggregate for one layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutStat {
    pub count: u64,
    pub sum: f64,
    pub average: f64,
}

impl LayoutStat {
    fn from_row(r: &SqliteRow) -> Self {
        let count: i64 = r.get("count");
        Self {
            count: count.max(0) as u64,
            sum: r.get("sum"),
            average: r.get("average"),
        }
    }
}

// One statement: SQLite holds the write lock for the whole read-modify-write,
// so concurrent submissions for the same layout are serialized, never lost.
const ADD_SAMPLE_SQL: &str = "
INSERT INTO layout_stats (layout, count, sum, average, updated_at)
VALUES (?, 1, ?, ?, ?)
ON CONFLICT(layout) DO UPDATE SET
    count = layout_stats.count + 1,
    sum = layout_stats.sum + excluded.sum,
    average = (layout_stats.sum + excluded.sum) / (layout_stats.count + 1),
    updated_at = excluded.updated_at
RETURNING count, sum, average
";

#[derive(Clone)]
pub struct Store {
    pub db: SqlitePool,
}

impl Store {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn get(&self, layout: &str) -> Result<Option<LayoutStat>, sqlx::Error> {
        let row = sqlx::query("SELECT count, sum, average FROM layout_stats WHERE layout = ?")
            .bind(layout)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.as_ref().map(LayoutStat::from_row))
    }

    /// Folds one accepted ratio into the layout's running mean.
    pub async fn add_sample(&self, layout: &str, ratio: f64) -> Result<LayoutStat, sqlx::Error> {
        let row = sqlx::query(ADD_SAMPLE_SQL)
            .bind(layout)
            .bind(ratio)
            .bind(ratio)
            .bind(Utc::now().to_rfc3339())
            .fetch_one(&self.db)
            .await?;

        Ok(LayoutStat::from_row(&row))
    }

    pub async fn list(&self) -> Result<Vec<(String, LayoutStat)>, sqlx::Error> {
        let rows = sqlx::query("SELECT layout, count, sum, average FROM layout_stats ORDER BY layout")
            .fetch_all(&self.db)
            .await?;

        Ok(rows
            .iter()
            .map(|r| (r.get::<String, _>("layout"), LayoutStat::from_row(r)))
            .collect())
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}
