//! Scan payload data model
//!
//! The payload is produced by an external scanner (the scan API or a JSON
//! file) and is read-only for the lifetime of a dashboard session.
//!
//! All default policy lives in [`Payload::from_value`]: missing or
//! wrongly-typed fields fall back to empty/zero values so the dashboard can
//! always render something, even from a partial payload.

use serde::Serialize;
use serde_json::{Map, Value};

/// Delimiter joining concept tags in [`ScanResult::concepts`]
pub const CONCEPT_DELIMITER: &str = " / ";

/// Strategy id used when the payload does not name one
pub const DEFAULT_STRATEGY_NAME: &str = "ma5";

/// Strategy display name used when the payload does not provide one
pub const DEFAULT_STRATEGY_DISPLAY_NAME: &str = "MA5均线支撑策略";

/// One matched security
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Ticker code, unique within a payload
    pub code: String,
    pub name: String,
    /// Display price; not parsed
    pub price: String,
    /// Signed percentage, e.g. "+3.21%"
    pub change: String,
    /// Lifecycle stage label
    pub stage: String,
    /// Concept tags joined by [`CONCEPT_DELIMITER`]
    pub concepts: Option<String>,
    /// Exchange-prefixed code, e.g. "sh600001"
    pub full_code: String,
}

/// Direction of the day's price change, for colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Up,
    Down,
    /// `change` could not be parsed as a number
    Unknown,
}

impl ScanResult {
    /// Split the concept field into its tags (empty tags dropped)
    pub fn concept_tags(&self) -> Vec<&str> {
        self.concepts
            .as_deref()
            .map(|joined| {
                joined
                    .split(CONCEPT_DELIMITER)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Best-effort parse of the textual change percentage
    pub fn change_direction(&self) -> ChangeDirection {
        let trimmed = self.change.trim().trim_end_matches('%').trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_nan() => ChangeDirection::Unknown,
            Ok(value) if value >= 0.0 => ChangeDirection::Up,
            Ok(_) => ChangeDirection::Down,
            Err(_) => ChangeDirection::Unknown,
        }
    }

    /// Quote page for this security on eastmoney
    pub fn quote_url(&self) -> String {
        let market = if self.full_code.starts_with("sh") {
            "sh"
        } else {
            "sz"
        };
        format!(
            "https://quote.eastmoney.com/concept/{}{}.html",
            market, self.code
        )
    }

    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            code: text_field(obj, "code"),
            name: text_field(obj, "name"),
            price: text_field(obj, "price"),
            change: text_field(obj, "change"),
            stage: text_field(obj, "stage"),
            concepts: match obj.get("concepts") {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                _ => None,
            },
            full_code: text_field(obj, "fullCode"),
        })
    }
}

/// The full scan payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub results: Vec<ScanResult>,
    pub strategy_name: String,
    pub strategy_display_name: String,
    pub total_scanned: u64,
    pub total_hit: u64,
}

impl Default for Payload {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            strategy_name: DEFAULT_STRATEGY_NAME.to_string(),
            strategy_display_name: DEFAULT_STRATEGY_DISPLAY_NAME.to_string(),
            total_scanned: 0,
            total_hit: 0,
        }
    }
}

impl Payload {
    /// Build a fully-populated payload from arbitrary JSON
    ///
    /// Never fails: a non-object value yields the default payload, result
    /// entries that are not objects are skipped, and numeric `price`/`change`
    /// values are stringified.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let defaults = Self::default();

        let results = obj
            .get("results")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(ScanResult::from_value).collect())
            .unwrap_or_default();

        Self {
            results,
            strategy_name: non_empty_text(obj, "strategyName").unwrap_or(defaults.strategy_name),
            strategy_display_name: non_empty_text(obj, "strategyDisplayName")
                .unwrap_or(defaults.strategy_display_name),
            total_scanned: count_field(obj, "totalScanned"),
            total_hit: count_field(obj, "totalHit"),
        }
    }

    /// Parse JSON text with defaults; only malformed JSON is an error
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// Percentage of scanned securities that matched (0 when nothing scanned)
    pub fn hit_rate(&self) -> f64 {
        if self.total_scanned == 0 {
            return 0.0;
        }
        self.total_hit as f64 / self.total_scanned as f64 * 100.0
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn non_empty_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let text = text_field(obj, key);
    (!text.is_empty()).then_some(text)
}

fn count_field(obj: &Map<String, Value>, key: &str) -> u64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_payload_uses_defaults() {
        let payload = Payload::from_value(&json!({}));
        assert!(payload.results.is_empty());
        assert_eq!(payload.strategy_name, "ma5");
        assert_eq!(payload.strategy_display_name, "MA5均线支撑策略");
        assert_eq!(payload.total_scanned, 0);
        assert_eq!(payload.total_hit, 0);
    }

    #[test]
    fn test_non_object_payload_is_default() {
        assert_eq!(Payload::from_value(&json!([1, 2, 3])), Payload::default());
        assert_eq!(Payload::from_value(&Value::Null), Payload::default());
    }

    #[test]
    fn test_partial_results_are_filled() {
        let payload = Payload::from_value(&json!({
            "strategyName": "volume_breakout",
            "totalScanned": 5000,
            "totalHit": "12",
            "results": [
                { "code": "600001", "price": 12.5, "stage": "🧪 蓄势中" },
                "not an object",
                { "code": "000002", "concepts": null, "fullCode": "sz000002" }
            ]
        }));

        assert_eq!(payload.strategy_name, "volume_breakout");
        assert_eq!(payload.strategy_display_name, DEFAULT_STRATEGY_DISPLAY_NAME);
        assert_eq!(payload.total_scanned, 5000);
        assert_eq!(payload.total_hit, 12);
        assert_eq!(payload.results.len(), 2);
        assert_eq!(payload.results[0].price, "12.5");
        assert_eq!(payload.results[0].name, "");
        assert_eq!(payload.results[0].concepts, None);
        assert_eq!(payload.results[1].full_code, "sz000002");
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Payload::from_json_str("{ results: ").is_err());
        assert!(Payload::from_json_str("{}").is_ok());
    }

    #[test]
    fn test_concept_tags_split_on_delimiter() {
        let result = ScanResult::from_value(&json!({ "concepts": "AI / 半导体 / 芯片" })).unwrap();
        assert_eq!(result.concept_tags(), vec!["AI", "半导体", "芯片"]);

        let bare = ScanResult::from_value(&json!({ "concepts": "" })).unwrap();
        assert!(bare.concept_tags().is_empty());
    }

    #[test]
    fn test_change_direction() {
        let with = |change: &str| {
            ScanResult::from_value(&json!({ "change": change }))
                .unwrap()
                .change_direction()
        };
        assert_eq!(with("+3.21%"), ChangeDirection::Up);
        assert_eq!(with("0.00%"), ChangeDirection::Up);
        assert_eq!(with("-1.5%"), ChangeDirection::Down);
        assert_eq!(with("停牌"), ChangeDirection::Unknown);
        assert_eq!(with(""), ChangeDirection::Unknown);
    }

    #[test]
    fn test_quote_url_market_prefix() {
        let sh = ScanResult::from_value(&json!({ "code": "600001", "fullCode": "sh600001" })).unwrap();
        let sz = ScanResult::from_value(&json!({ "code": "000002", "fullCode": "" })).unwrap();
        assert_eq!(
            sh.quote_url(),
            "https://quote.eastmoney.com/concept/sh600001.html"
        );
        assert_eq!(
            sz.quote_url(),
            "https://quote.eastmoney.com/concept/sz000002.html"
        );
    }

    #[test]
    fn test_hit_rate() {
        let mut payload = Payload::default();
        assert_eq!(payload.hit_rate(), 0.0);
        payload.total_scanned = 200;
        payload.total_hit = 5;
        assert!((payload.hit_rate() - 2.5).abs() < f64::EPSILON);
    }
}
