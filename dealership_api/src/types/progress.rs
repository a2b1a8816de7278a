use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A progress message pushed by the server while an import runs.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressEvent {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    /// Percent complete, rounded and clamped to `0..=100`.
    #[serde(default, deserialize_with = "percent")]
    pub progress: u8,
}

/// Accepts any JSON number or numeric string; `null` reads as 0.
fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Null => Some(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number.filter(|n| n.is_finite()) {
        Some(n) => Ok(n.round().clamp(0.0, 100.0) as u8),
        None => Err(D::Error::custom(format!("invalid progress value: {}", value))),
    }
}

impl ProgressEvent {
    pub fn is_completed(&self) -> bool {
        self.progress == 100 && self.status == "completed"
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status.as_str(), "failed" | "error")
    }
}
