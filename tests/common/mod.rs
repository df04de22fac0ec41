// Shared test helpers
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use insights_charts::models::{Counts, Summary};
use insights_charts::summary_repo::SummaryRepo;
use tempfile::TempDir;

pub fn counts(entries: &[(&str, u64)]) -> Counts {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn sample_summary() -> Summary {
    Summary {
        os: counts(&[("linux", 10), ("darwin", 4), ("windows", 2)]),
        music_fs: counts(&[("ext4", 8), ("nfs", 3)]),
        data_fs: counts(&[("btrfs", 5)]),
        player_types: counts(&[("Bassline", 7), ("Feishin", 2)]),
        versions: counts(&[("0.52.0", 9), ("0.53.0", 7)]),
        num_instances: Some(16),
    }
}

/// Fresh repo in a temp dir. Keep the TempDir alive for the test's duration.
pub async fn empty_repo() -> (TempDir, SummaryRepo, String) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("insights.db");
    let path_str = path.to_str().unwrap().to_string();
    let repo = SummaryRepo::connect(&path_str, 2).await.unwrap();
    repo.init().await.unwrap();
    (dir, repo, path_str)
}

/// Insert a row bypassing the repo, e.g. to store a non-BLOB payload.
pub async fn insert_raw_row(db_path: &str, time: &str, data: Option<&str>) {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&format!("sqlite:{}", db_path))
        .await
        .unwrap();
    sqlx::query("INSERT INTO summary (time, data) VALUES ($1, $2)")
        .bind(time)
        .bind(data)
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;
}

/// Insert a row with a BLOB payload and a caller-chosen time string.
pub async fn insert_raw_summary(db_path: &str, time: &str, summary: &Summary) {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&format!("sqlite:{}", db_path))
        .await
        .unwrap();
    sqlx::query("INSERT INTO summary (time, data) VALUES ($1, $2)")
        .bind(time)
        .bind(serde_json::to_vec(summary).unwrap())
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;
}
