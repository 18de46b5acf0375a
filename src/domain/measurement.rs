//! Measurement records kept in the pile history

use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp format used for new measurements
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single pile height estimate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Estimated height in centimeters, rounded to 2 decimals
    #[serde(rename = "height", deserialize_with = "height_from_number_or_text")]
    pub height_cm: f64,
    /// Local time the estimate was made
    pub time: String,
}

impl Measurement {
    pub fn new(height_cm: f64, time: impl Into<String>) -> Self {
        Self {
            height_cm,
            time: time.into(),
        }
    }

    /// Create a measurement stamped with the current local time
    pub fn now(height_cm: f64) -> Self {
        Self::new(height_cm, chrono::Local::now().format(TIME_FORMAT).to_string())
    }

    /// Height as shown in tables and messages
    pub fn height_label(&self) -> String {
        format!("{:.2}", self.height_cm)
    }
}

// Older history files stored the height as a pre-formatted string ("42.50")
fn height_from_number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawHeight {
        Number(f64),
        Text(String),
    }

    let value = match RawHeight::deserialize(deserializer)? {
        RawHeight::Number(v) => v,
        RawHeight::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid height {s:?}: {e}")))?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("height must be finite"))
    }
}
