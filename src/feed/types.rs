use serde::Deserialize;
use serde_json::Value;

/// The JSON document served by the news endpoint.
///
/// Only `daily_news` is read. It is kept as a raw [`Value`] so that a
/// missing, `null`, or non-array field degrades to an empty list instead of
/// failing the whole load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub daily_news: Option<Value>,
}

impl FeedDocument {
    /// Build a document from any decoded JSON value.
    ///
    /// Objects are read normally. Arrays, strings, numbers and bools have no
    /// `daily_news` field and yield an empty document; a bare `null` is
    /// rejected like unparseable input.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(_) => Self::deserialize(value),
            Value::Null => Err(serde::de::Error::custom("feed document is null")),
            other => {
                tracing::warn!(kind = json_kind(&other), "Feed document is not an object");
                Ok(Self::default())
            }
        }
    }

    /// Extract the article sequence.
    ///
    /// - absent / `null` / not an array → empty
    /// - array entries that are not objects are skipped
    pub fn articles(&self) -> Vec<NewsArticle> {
        let Some(Value::Array(items)) = &self.daily_news else {
            if let Some(other) = &self.daily_news {
                if !other.is_null() {
                    tracing::warn!(kind = json_kind(other), "daily_news is not an array, treating as empty");
                }
            }
            return Vec::new();
        };

        let mut articles = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match NewsArticle::deserialize(item) {
                Ok(article) => articles.push(article),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping malformed news entry");
                }
            }
        }
        articles
    }
}

/// One entry of `daily_news`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsArticle {
    /// Identifier used for dedup. `None` when the entry has no `id` key,
    /// `Some(Value::Null)` for an explicit `null`.
    #[serde(default, deserialize_with = "present_value")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub date: Option<String>,
}

impl NewsArticle {
    /// Key used to compare identifiers.
    ///
    /// Numbers compare by value (`1` equals `1.0`), everything else by its
    /// serialized JSON, so `1` and `"1"` stay distinct. A missing id and an
    /// explicit `null` are different keys.
    pub fn id_key(&self) -> String {
        match &self.id {
            None => "undefined".to_string(),
            Some(Value::Number(n)) => match n.as_f64() {
                // -0 and 0 are the same id
                Some(f) if f == 0.0 => "0".to_string(),
                Some(f) => f.to_string(),
                None => n.to_string(),
            },
            Some(other) => other.to_string(),
        }
    }

    /// Footer line built from `source` and `date`, if either is present.
    pub fn footer(&self) -> Option<String> {
        match (non_empty(&self.source), non_empty(&self.date)) {
            (Some(source), Some(date)) => Some(format!("{} · {}", source, date)),
            (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
            (None, None) => None,
        }
    }

    /// Body text, if present and not empty.
    pub fn body(&self) -> Option<&str> {
        non_empty(&self.text)
    }

    /// Image reference, if present and not empty.
    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image_url)
    }

    /// Link to the full article, if present and not empty.
    pub fn link(&self) -> Option<&str> {
        non_empty(&self.url)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Wrap whatever value is present, `null` included. Absent keys fall back to
/// `#[serde(default)]`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Accept strings as-is, render numbers and bools as text, map null to empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected text, found {}",
                json_kind(&other)
            )))
        }
    })
}
