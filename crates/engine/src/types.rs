//! Shared types for markets and outcomes

use serde::{Deserialize, Deserializer, Serialize};

/// One side of a binary market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Yes,
    No,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
        }
    }
}

/// A market as returned by the Gamma markets API.
///
/// Numeric fields arrive as numbers or numeric strings depending on the
/// endpoint, so they go through [`de_opt_f64`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    #[serde(default, deserialize_with = "de_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub question: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub slug: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub volume: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub liquidity: Option<f64>,
    /// Serialized probability pair, e.g. `"[\"0.73\", \"0.27\"]"`
    #[serde(default)]
    pub outcome_prices: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "de_or_default")]
    pub closed: bool,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub volume24hr: Option<f64>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub condition_id: Option<String>,
    /// Serialized token-id pair; the first entry is the YES token
    #[serde(default)]
    pub clob_token_ids: Option<serde_json::Value>,
}

impl Market {
    /// Identifier used for smart-wallet lookups: condition ID when present, else market ID
    pub fn attribution_id(&self) -> &str {
        match self.condition_id.as_deref() {
            Some(cid) if !cid.is_empty() => cid,
            _ => &self.id,
        }
    }

    /// CLOB token id of the YES outcome
    pub fn yes_token_id(&self) -> Option<String> {
        self.clob_token_ids
            .as_ref()
            .and_then(|v| json_list(v).into_iter().next())
            .and_then(|v| match v {
                serde_json::Value::String(s) if !s.is_empty() => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn is_listable(&self) -> bool {
        !self.id.is_empty() && !self.question.is_empty()
    }
}

/// Unpack a value that is either a JSON array or a string holding a JSON array
pub(crate) fn json_list(value: &serde_json::Value) -> Vec<serde_json::Value> {
    match value {
        serde_json::Value::Array(items) => items.clone(),
        serde_json::Value::String(s) if !s.trim().is_empty() => {
            match serde_json::from_str::<serde_json::Value>(s) {
                Ok(serde_json::Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoders
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

pub(crate) fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumberOrString>::deserialize(deserializer)?
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite()))
}

pub(crate) fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64(deserializer)?.unwrap_or(0.0))
}

pub(crate) fn de_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64(deserializer)?.map(|v| v as i64))
}

/// Treat an explicit `null` like a missing key
pub(crate) fn de_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn de_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Text(s)) => s,
        Some(NumberOrString::Number(n)) => n.to_string(),
        None => String::new(),
    })
}
