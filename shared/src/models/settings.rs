//! Settings Models
//!
//! Semi-structured configuration rows. JSON values decode leniently: a
//! malformed blob falls back to the typed default, never a crash.

use serde::{Deserialize, Serialize};

/// Sales channel row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SalesChannel {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
}

/// Customer tier spend thresholds (stored as a `system_setting` JSON value)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub platinum: f64,
    pub gold: f64,
    pub silver: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            platinum: 50_000.0,
            gold: 20_000.0,
            silver: 5_000.0,
        }
    }
}

impl TierThresholds {
    /// Decode from a stored JSON string; malformed input yields the default.
    pub fn decode_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }

    /// Tier label for a lifetime spend value
    pub fn tier_for(&self, lifetime_value: f64) -> Option<&'static str> {
        if lifetime_value >= self.platinum {
            Some("platinum")
        } else if lifetime_value >= self.gold {
            Some("gold")
        } else if lifetime_value >= self.silver {
            Some("silver")
        } else {
            None
        }
    }
}

/// Arbitrary keyed setting row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
}

/// Grid column preference row. `user_id = NULL` holds the admin default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GridPreference {
    pub id: i64,
    pub user_id: Option<i64>,
    pub grid: String,
    /// JSON array of column descriptors; decoded leniently by callers
    pub columns: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_decode_lenient() {
        let good = r#"{"platinum": 100000, "gold": 40000, "silver": 10000}"#;
        let t = TierThresholds::decode_lenient(Some(good));
        assert_eq!(t.platinum, 100_000.0);

        // malformed JSON falls back silently
        assert_eq!(
            TierThresholds::decode_lenient(Some("{nope")),
            TierThresholds::default()
        );
        assert_eq!(TierThresholds::decode_lenient(None), TierThresholds::default());
    }

    #[test]
    fn tier_bands() {
        let t = TierThresholds::default();
        assert_eq!(t.tier_for(60_000.0), Some("platinum"));
        assert_eq!(t.tier_for(20_000.0), Some("gold"));
        assert_eq!(t.tier_for(5_000.0), Some("silver"));
        assert_eq!(t.tier_for(100.0), None);
    }
}
