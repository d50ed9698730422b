//! Settings Repository
//!
//! Sales channels, keyed system settings (tier thresholds), and grid column
//! preferences. JSON values are validated on write and decoded leniently on
//! read.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{SalesChannel, TierThresholds};
use shared::util::snowflake_id;

/// Setting key holding the tier thresholds JSON
pub const TIER_THRESHOLDS_KEY: &str = "tier_thresholds";

/// Replacement payload for the sales channel set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelUpsert {
    pub name: String,
    pub is_active: bool,
}

pub async fn channels_find_all(pool: &SqlitePool) -> RepoResult<Vec<SalesChannel>> {
    let channels = sqlx::query_as::<_, SalesChannel>(
        "SELECT id, name, is_active FROM sales_channel ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(channels)
}

/// Replace the sales channel set as one transaction.
///
/// A duplicate name in the payload rolls the whole replacement back.
pub async fn channels_replace(
    pool: &SqlitePool,
    channels: &[ChannelUpsert],
) -> RepoResult<Vec<SalesChannel>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM sales_channel").execute(&mut *tx).await?;
    for ch in channels {
        sqlx::query("INSERT INTO sales_channel (id, name, is_active) VALUES (?1, ?2, ?3)")
            .bind(snowflake_id())
            .bind(&ch.name)
            .bind(ch.is_active)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    channels_find_all(pool).await
}

/// Raw setting value by key
pub async fn setting_get(pool: &SqlitePool, key: &str) -> RepoResult<Option<String>> {
    let value: Option<String> =
        sqlx::query_scalar("SELECT value FROM system_setting WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;
    Ok(value)
}

/// Upsert a setting value
pub async fn setting_put(pool: &SqlitePool, key: &str, value: &str) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO system_setting (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

/// Tier thresholds with lenient decode (malformed → defaults)
pub async fn tier_thresholds_get(pool: &SqlitePool) -> RepoResult<TierThresholds> {
    let raw = setting_get(pool, TIER_THRESHOLDS_KEY).await?;
    Ok(TierThresholds::decode_lenient(raw.as_deref()))
}

/// Store tier thresholds; bands must be positive and strictly ordered.
pub async fn tier_thresholds_put(
    pool: &SqlitePool,
    thresholds: &TierThresholds,
) -> RepoResult<TierThresholds> {
    if thresholds.silver <= 0.0
        || thresholds.gold <= thresholds.silver
        || thresholds.platinum <= thresholds.gold
    {
        return Err(RepoError::Validation(
            "Tier thresholds must satisfy 0 < silver < gold < platinum".into(),
        ));
    }
    let value = serde_json::to_string(thresholds)
        .map_err(|e| RepoError::Database(format!("Failed to encode thresholds: {e}")))?;
    setting_put(pool, TIER_THRESHOLDS_KEY, &value).await?;
    tier_thresholds_get(pool).await
}

/// Stored column preference for a (user, grid) pair; `user_id = None` reads
/// the admin default row.
pub async fn grid_pref_get(
    pool: &SqlitePool,
    user_id: Option<i64>,
    grid: &str,
) -> RepoResult<Option<String>> {
    let columns: Option<String> = match user_id {
        Some(uid) => {
            sqlx::query_scalar(
                "SELECT columns FROM grid_preference WHERE user_id = ?1 AND grid = ?2",
            )
            .bind(uid)
            .bind(grid)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_scalar(
                "SELECT columns FROM grid_preference WHERE user_id IS NULL AND grid = ?1",
            )
            .bind(grid)
            .fetch_optional(pool)
            .await?
        }
    };
    Ok(columns)
}

/// Effective columns for a user: their own row, else the admin default,
/// else an empty layout.
pub async fn grid_columns_effective(
    pool: &SqlitePool,
    user_id: i64,
    grid: &str,
) -> RepoResult<String> {
    if let Some(own) = grid_pref_get(pool, Some(user_id), grid).await? {
        return Ok(own);
    }
    if let Some(default) = grid_pref_get(pool, None, grid).await? {
        return Ok(default);
    }
    Ok("[]".to_string())
}

/// Upsert a column preference. The payload must be a JSON array; anything
/// else is rejected before it reaches storage.
pub async fn grid_pref_put(
    pool: &SqlitePool,
    user_id: Option<i64>,
    grid: &str,
    columns: &str,
) -> RepoResult<()> {
    match serde_json::from_str::<serde_json::Value>(columns) {
        Ok(serde_json::Value::Array(_)) => {}
        _ => {
            return Err(RepoError::Validation(
                "Grid columns must be a JSON array".into(),
            ));
        }
    }

    match user_id {
        Some(uid) => {
            sqlx::query(
                "INSERT INTO grid_preference (id, user_id, grid, columns) VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT(user_id, grid) DO UPDATE SET columns = excluded.columns",
            )
            .bind(snowflake_id())
            .bind(uid)
            .bind(grid)
            .bind(columns)
            .execute(pool)
            .await?;
        }
        None => {
            // UNIQUE treats NULLs as distinct, so the default row upserts by hand
            let existing: Option<i64> = sqlx::query_scalar(
                "SELECT id FROM grid_preference WHERE user_id IS NULL AND grid = ?1",
            )
            .bind(grid)
            .fetch_optional(pool)
            .await?;
            match existing {
                Some(id) => {
                    sqlx::query("UPDATE grid_preference SET columns = ?1 WHERE id = ?2")
                        .bind(columns)
                        .bind(id)
                        .execute(pool)
                        .await?;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO grid_preference (id, user_id, grid, columns) \
                         VALUES (?1, NULL, ?2, ?3)",
                    )
                    .bind(snowflake_id())
                    .bind(grid)
                    .bind(columns)
                    .execute(pool)
                    .await?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::test_pool;

    #[tokio::test]
    async fn channels_replace_is_atomic() {
        let pool = test_pool().await;

        let ok = vec![
            ChannelUpsert {
                name: "online".into(),
                is_active: true,
            },
            ChannelUpsert {
                name: "exhibition".into(),
                is_active: false,
            },
        ];
        let stored = channels_replace(&pool, &ok).await.unwrap();
        assert_eq!(stored.len(), 2);

        // duplicate name in the payload rolls back, previous set survives
        let bad = vec![
            ChannelUpsert {
                name: "pop-up".into(),
                is_active: true,
            },
            ChannelUpsert {
                name: "pop-up".into(),
                is_active: true,
            },
        ];
        assert!(channels_replace(&pool, &bad).await.is_err());
        let after = channels_find_all(&pool).await.unwrap();
        let names: Vec<&str> = after.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["exhibition", "online"]);
    }

    #[tokio::test]
    async fn tier_thresholds_roundtrip_and_validation() {
        let pool = test_pool().await;

        // unset → defaults
        assert_eq!(
            tier_thresholds_get(&pool).await.unwrap(),
            TierThresholds::default()
        );

        let custom = TierThresholds {
            platinum: 90_000.0,
            gold: 30_000.0,
            silver: 8_000.0,
        };
        assert_eq!(tier_thresholds_put(&pool, &custom).await.unwrap(), custom);
        assert_eq!(tier_thresholds_get(&pool).await.unwrap(), custom);

        // unordered bands rejected
        let bad = TierThresholds {
            platinum: 10.0,
            gold: 30_000.0,
            silver: 8_000.0,
        };
        assert!(matches!(
            tier_thresholds_put(&pool, &bad).await.unwrap_err(),
            RepoError::Validation(_)
        ));

        // malformed stored JSON degrades to defaults instead of crashing
        setting_put(&pool, TIER_THRESHOLDS_KEY, "{broken").await.unwrap();
        assert_eq!(
            tier_thresholds_get(&pool).await.unwrap(),
            TierThresholds::default()
        );
    }

    #[tokio::test]
    async fn grid_preferences_fall_back_to_admin_default() {
        let pool = test_pool().await;

        assert_eq!(
            grid_columns_effective(&pool, 7, "orders").await.unwrap(),
            "[]"
        );

        grid_pref_put(&pool, None, "orders", r#"["order_number","city"]"#)
            .await
            .unwrap();
        assert_eq!(
            grid_columns_effective(&pool, 7, "orders").await.unwrap(),
            r#"["order_number","city"]"#
        );

        grid_pref_put(&pool, Some(7), "orders", r#"["order_number"]"#)
            .await
            .unwrap();
        assert_eq!(
            grid_columns_effective(&pool, 7, "orders").await.unwrap(),
            r#"["order_number"]"#
        );

        // updating the default twice keeps a single row
        grid_pref_put(&pool, None, "orders", r#"[]"#).await.unwrap();
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM grid_preference WHERE user_id IS NULL AND grid = 'orders'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);

        // non-array payloads are rejected
        assert!(grid_pref_put(&pool, Some(7), "orders", "{\"a\":1}").await.is_err());
        assert!(grid_pref_put(&pool, Some(7), "orders", "not json").await.is_err());
    }
}
