//! Filter values and their text form.
//!
//! Every value written into a filter goes through [`FilterValue`], whose `Display`
//! is the one canonical stringification: natural text, no quoting, no locale.
//! Percent-encoding happens later, on the whole tagged string.

use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "json")]
use crate::errors::FilterError;

/// A scalar filter value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Absent value, written as `null`
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Argument accepted by the list operators: a single scalar or an ordered list.
///
/// `is_in`/`not_in` ignore a [`FilterArg::Scalar`]; `between` rejects anything
/// but a two-element [`FilterArg::List`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterArg {
    Scalar(FilterValue),
    List(Vec<FilterValue>),
}

impl FilterArg {
    /// Number of values when this is a list
    #[must_use]
    pub fn list_len(&self) -> Option<usize> {
        match self {
            Self::Scalar(_) => None,
            Self::List(values) => Some(values.len()),
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Stringify every value in order (a scalar yields one string)
    #[must_use]
    pub fn to_raw_values(&self) -> Vec<String> {
        match self {
            Self::Scalar(value) => vec![value.to_string()],
            Self::List(values) => values.iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Display for FilterArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => value.fmt(f),
            Self::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    value.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! impl_from_lossless {
    ($variant:ident($target:ty): $($t:ty),*) => {
        $(
            impl From<$t> for FilterValue {
                fn from(value: $t) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from_lossless!(Int(i64): i8, i16, i32, i64);
impl_from_lossless!(UInt(u64): u8, u16, u32, u64);
impl_from_lossless!(Float(f64): f64);

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<isize> for FilterValue {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Int)
    }
}

impl From<usize> for FilterValue {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::UInt)
    }
}

// Wider than the backing variants, kept exact through their decimal text
impl From<i128> for FilterValue {
    fn from(value: i128) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Int)
    }
}

impl From<u128> for FilterValue {
    fn from(value: u128) -> Self {
        u64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::UInt)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Cow<'_, str>> for FilterValue {
    fn from(value: Cow<'_, str>) -> Self {
        Self::Text(value.into_owned())
    }
}

impl From<char> for FilterValue {
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for FilterValue {
    fn from(value: uuid::Uuid) -> Self {
        Self::Text(value.hyphenated().to_string())
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for FilterValue {
    fn from(value: chrono::DateTime<Tz>) -> Self {
        Self::Text(
            value
                .with_timezone(&chrono::Utc)
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        )
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for FilterValue {
    fn from(value: chrono::NaiveDate) -> Self {
        Self::Text(value.format("%Y-%m-%d").to_string())
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDateTime> for FilterValue {
    fn from(value: chrono::NaiveDateTime) -> Self {
        Self::Text(value.format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}

#[cfg(feature = "json")]
impl TryFrom<serde_json::Value> for FilterValue {
    type Error = FilterError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(number) => Ok(number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_u64().map(Self::UInt))
                .or_else(|| number.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Text(number.to_string()))),
            serde_json::Value::String(s) => Ok(Self::Text(s)),
            serde_json::Value::Array(_) => Err(FilterError::unsupported_value(
                "nested array where a scalar was expected",
            )),
            serde_json::Value::Object(_) => Err(FilterError::unsupported_value(
                "JSON object has no scalar text form",
            )),
        }
    }
}

impl From<FilterValue> for FilterArg {
    fn from(value: FilterValue) -> Self {
        Self::Scalar(value)
    }
}

macro_rules! impl_scalar_arg {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FilterArg {
                fn from(value: $t) -> Self {
                    Self::Scalar(value.into())
                }
            }
        )*
    };
}

impl_scalar_arg!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f64, &str, String,
    &String, Cow<'_, str>, char
);

#[cfg(feature = "uuid")]
impl_scalar_arg!(uuid::Uuid);

#[cfg(feature = "chrono")]
impl_scalar_arg!(chrono::NaiveDate, chrono::NaiveDateTime);

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for FilterArg {
    fn from(value: chrono::DateTime<Tz>) -> Self {
        Self::Scalar(value.into())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterArg {
    fn from(value: Option<T>) -> Self {
        Self::Scalar(value.into())
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterArg {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>, const N: usize> From<[T; N]> for FilterArg {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<FilterValue>> From<&[T]> for FilterArg {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().cloned().map(Into::into).collect())
    }
}

impl<A: Into<FilterValue>, B: Into<FilterValue>> From<(A, B)> for FilterArg {
    fn from((low, high): (A, B)) -> Self {
        Self::List(vec![low.into(), high.into()])
    }
}

#[cfg(feature = "json")]
impl TryFrom<serde_json::Value> for FilterArg {
    type Error = FilterError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(FilterValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            other => FilterValue::try_from(other).map(Self::Scalar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_text_forms() {
        assert_eq!(FilterValue::from(18).to_string(), "18");
        assert_eq!(FilterValue::from(-7_i64).to_string(), "-7");
        assert_eq!(FilterValue::from(42_u8).to_string(), "42");
        assert_eq!(FilterValue::from(true).to_string(), "true");
        assert_eq!(FilterValue::from(false).to_string(), "false");
        assert_eq!(FilterValue::from("active").to_string(), "active");
        assert_eq!(FilterValue::from('x').to_string(), "x");
        assert_eq!(FilterValue::from(String::from("a b")).to_string(), "a b");
    }

    #[test]
    fn test_float_text_forms() {
        assert_eq!(FilterValue::from(2.5).to_string(), "2.5");
        assert_eq!(FilterValue::from(1.0).to_string(), "1");
        assert_eq!(FilterValue::from(0.1).to_string(), "0.1");
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(FilterValue::from(None::<i32>).to_string(), "null");
        assert_eq!(FilterValue::from(Some(3)).to_string(), "3");
    }

    #[test]
    fn test_wide_integers_stay_exact() {
        assert_eq!(FilterValue::from(u128::MAX).to_string(), u128::MAX.to_string());
        assert_eq!(FilterValue::from(i128::MIN).to_string(), i128::MIN.to_string());
        assert_eq!(FilterValue::from(5_i128), FilterValue::Int(5));
    }

    #[test]
    fn test_arg_shapes() {
        assert_eq!(FilterArg::from("admin").list_len(), None);
        assert_eq!(FilterArg::from(vec!["a", "b", "c"]).list_len(), Some(3));
        assert_eq!(FilterArg::from([10, 100]).list_len(), Some(2));
        assert_eq!(FilterArg::from(&[1, 2][..]).list_len(), Some(2));
        assert_eq!(FilterArg::from((1, "z")).list_len(), Some(2));
        assert!(FilterArg::from(Vec::<i32>::new()).is_list());
    }

    #[test]
    fn test_arg_display_joins_with_comma() {
        assert_eq!(FilterArg::from(["admin", "editor"]).to_string(), "admin,editor");
        assert_eq!(FilterArg::from(7).to_string(), "7");
        assert_eq!(FilterArg::from(Vec::<i32>::new()).to_string(), "");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_conversion() {
        use serde_json::json;

        assert_eq!(FilterValue::try_from(json!(null)).unwrap(), FilterValue::Null);
        assert_eq!(FilterValue::try_from(json!(12)).unwrap(), FilterValue::Int(12));
        assert_eq!(
            FilterValue::try_from(json!(u64::MAX)).unwrap(),
            FilterValue::UInt(u64::MAX)
        );
        assert_eq!(FilterValue::try_from(json!(1.5)).unwrap(), FilterValue::Float(1.5));
        assert_eq!(
            FilterValue::try_from(json!("x")).unwrap(),
            FilterValue::Text("x".to_string())
        );
        assert!(matches!(
            FilterValue::try_from(json!({"a": 1})),
            Err(FilterError::UnsupportedValue(_))
        ));

        let arg = FilterArg::try_from(json!(["a", 1, true])).unwrap();
        assert_eq!(arg.to_string(), "a,1,true");
        assert!(FilterArg::try_from(json!([[1, 2]])).is_err());
        assert_eq!(FilterArg::try_from(json!("solo")).unwrap().list_len(), None);
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn test_uuid_is_hyphenated() {
        let id = uuid::Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        assert_eq!(
            FilterValue::from(id).to_string(),
            "01234567-89ab-cdef-0123-456789abcdef"
        );
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_chrono_forms() {
        use chrono::{FixedOffset, NaiveDate, TimeZone};

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
        assert_eq!(FilterValue::from(local).to_string(), "2024-01-01T00:00:00Z");

        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(FilterValue::from(date).to_string(), "2024-12-31");
        let datetime = date.and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(FilterValue::from(datetime).to_string(), "2024-12-31T23:59:59");
    }
}
