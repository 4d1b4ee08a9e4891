// 上游字段类型不可靠：类型不对时降级为默认值，而不是让整页解析失败

use chrono::{DateTime, Utc};
use serde::{de::IgnoredAny, Deserialize, Deserializer};

use crate::parse_timestamp;

/// Any JSON scalar, with everything else swallowed.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Other(IgnoredAny),
}

/// Either a well-formed `T` or something to skip.
#[derive(Deserialize)]
#[serde(untagged)]
enum OrSkip<T> {
    Valid(T),
    Skip(IgnoredAny),
}

impl<T> OrSkip<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Skip(_) => None,
        }
    }
}

/// Text fields. Numbers are stringified (numeric ids), anything else is empty.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Scalar::Text(text)) => text,
        Some(Scalar::Unsigned(n)) => n.to_string(),
        Some(Scalar::Signed(n)) => n.to_string(),
        Some(Scalar::Float(_) | Scalar::Other(_)) | None => String::new(),
    })
}

/// Optional text: only a JSON string counts.
pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// Whole minutes. Fractions round to the nearest minute; negatives and junk are `None`.
pub(crate) fn minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Scalar::Unsigned(n)) => u32::try_from(n).ok(),
        Some(Scalar::Float(f)) => float_minutes(f),
        Some(Scalar::Text(text)) => text.trim().parse::<f64>().ok().and_then(float_minutes),
        Some(Scalar::Signed(_) | Scalar::Other(_)) | None => None,
    })
}

fn float_minutes(value: f64) -> Option<u32> {
    let rounded = value.round();
    if rounded.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&rounded) {
        Some(rounded as u32)
    } else {
        None
    }
}

/// Timestamps as RFC 3339 or `YYYY-MM-DD` strings; anything else is `None`.
pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_string(deserializer)?.as_deref().and_then(parse_timestamp))
}

/// A nested object that is dropped instead of failing its parent.
pub(crate) fn optional_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<OrSkip<T>>::deserialize(deserializer)?.and_then(OrSkip::into_option))
}

/// A list that keeps its well-formed entries. A non-list value is empty.
pub(crate) fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw = Option::<OrSkip<Vec<OrSkip<T>>>>::deserialize(deserializer)?;
    Ok(raw
        .and_then(OrSkip::into_option)
        .unwrap_or_default()
        .into_iter()
        .filter_map(OrSkip::into_option)
        .collect())
}
