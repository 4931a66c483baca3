//! # Filter Builder
//!
//! [`FilterBuilder`] collects one operator-tagged value per field and renders them as
//! a query string for APIs that read `field=operator:value` parameters.
//!
//! ```rust
//! use urlfilter::FilterBuilder;
//!
//! let query = FilterBuilder::new()
//!     .equals("status", "active")
//!     .greater_than("age", 18)
//!     .is_in("role", ["admin", "editor"])
//!     .render();
//!
//! assert_eq!(query, "status=active&age=%3E%3A18&role=in%3Aadmin%2Ceditor");
//! ```
//!
//! ## Ordering
//!
//! Entries render in the order their keys were first set. Setting a key again
//! replaces the value in place; a key that was [`remove`](FilterBuilder::remove)d and
//! set again moves to the end.
//!
//! ## Failure policy
//!
//! - [`between`](FilterBuilder::between) returns an error unless given exactly two values,
//!   and writes nothing on failure.
//! - [`is_in`](FilterBuilder::is_in) and [`not_in`](FilterBuilder::not_in) given a scalar
//!   do nothing, leaving any earlier value for the key in place.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::encoding::{decode_component, encode_component};
use crate::errors::FilterError;
use crate::operator::FilterOperator;
use crate::tagged::TaggedValue;
use crate::value::{FilterArg, FilterValue};

/// Fluent builder for operator-tagged query filters
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    filters: IndexMap<String, String>,
}

impl FilterBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value` (written bare)
    pub fn equals(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> &mut Self {
        self.scalar(key.into(), FilterOperator::Equals, &value.into())
    }

    /// Set `key` to `>:value`
    pub fn greater_than(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> &mut Self {
        self.scalar(key.into(), FilterOperator::GreaterThan, &value.into())
    }

    /// Set `key` to `>=:value`
    pub fn greater_than_or_equal(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> &mut Self {
        self.scalar(key.into(), FilterOperator::GreaterThanOrEqual, &value.into())
    }

    /// Set `key` to `<:value`
    pub fn less_than(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> &mut Self {
        self.scalar(key.into(), FilterOperator::LessThan, &value.into())
    }

    /// Set `key` to `<=:value`
    pub fn less_than_or_equal(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> &mut Self {
        self.scalar(key.into(), FilterOperator::LessThanOrEqual, &value.into())
    }

    /// Set `key` to `!=:value`
    pub fn not_equals(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> &mut Self {
        self.scalar(key.into(), FilterOperator::NotEquals, &value.into())
    }

    /// Set `key` to `~:value`
    pub fn like(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> &mut Self {
        self.scalar(key.into(), FilterOperator::Like, &value.into())
    }

    /// Set `key` to `!~:value`
    pub fn not_like(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> &mut Self {
        self.scalar(key.into(), FilterOperator::NotLike, &value.into())
    }

    /// Set `key` to `in:v1,v2,...`
    ///
    /// A scalar argument is ignored and the key keeps whatever it held before.
    pub fn is_in(&mut self, key: impl Into<String>, values: impl Into<FilterArg>) -> &mut Self {
        self.list(key.into(), FilterOperator::In, values.into())
    }

    /// Set `key` to `!in:v1,v2,...`
    ///
    /// A scalar argument is ignored and the key keeps whatever it held before.
    pub fn not_in(&mut self, key: impl Into<String>, values: impl Into<FilterArg>) -> &mut Self {
        self.list(key.into(), FilterOperator::NotIn, values.into())
    }

    /// Set `key` to `><:low,high`
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidRange`] unless `range` is a list of exactly two
    /// values. The builder is left unchanged.
    pub fn between(
        &mut self,
        key: impl Into<String>,
        range: impl Into<FilterArg>,
    ) -> Result<&mut Self, FilterError> {
        let key = key.into();
        let range: FilterArg = range.into();
        match range {
            FilterArg::List(values) if values.len() == 2 => {
                let raw = values.iter().map(ToString::to_string).collect();
                Ok(self.insert(key, &TaggedValue::new(FilterOperator::Between, raw)))
            }
            other => {
                let len = other.list_len();
                tracing::debug!(%key, ?len, "rejecting between range that is not two values");
                Err(FilterError::invalid_range(key, len))
            }
        }
    }

    /// Set `key` with any operator.
    ///
    /// List operators follow the same rules as their dedicated methods. Scalar
    /// operators given a list write the values comma-joined.
    ///
    /// # Errors
    ///
    /// Fails only for [`FilterOperator::Between`], as [`between`](Self::between) does.
    pub fn filter(
        &mut self,
        key: impl Into<String>,
        operator: FilterOperator,
        arg: impl Into<FilterArg>,
    ) -> Result<&mut Self, FilterError> {
        let key = key.into();
        let arg = arg.into();
        match operator {
            FilterOperator::Between => self.between(key, arg),
            FilterOperator::In | FilterOperator::NotIn => Ok(self.list(key, operator, arg)),
            _ => {
                let tagged = TaggedValue::new(operator, vec![arg.to_string()]);
                Ok(self.insert(key, &tagged))
            }
        }
    }

    /// Remove an entry, returning its tagged value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.filters.shift_remove(key)
    }

    /// Get the tagged (not percent-encoded) value for a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Decode the entry for a key into its operator and values
    #[must_use]
    pub fn parsed(&self, key: &str) -> Option<Result<TaggedValue, FilterError>> {
        self.filters
            .get_key_value(key)
            .map(|(key, tagged)| TaggedValue::parse(key, tagged))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.filters.clear();
        self
    }

    /// Entries as `(key, tagged value)` in render order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every entry of `other` into this builder, later values winning
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        for (key, tagged) in &other.filters {
            self.filters.insert(key.clone(), tagged.clone());
        }
        self
    }

    /// Render as `key=value` pairs joined by `&`, both sides percent-encoded.
    ///
    /// Returns an empty string when no filters are set. No leading `?`.
    #[must_use]
    pub fn render(&self) -> String {
        tracing::trace!(filters = self.filters.len(), "rendering filter query");
        self.filters
            .iter()
            .map(|(key, tagged)| format!("{}={}", encode_component(key), encode_component(tagged)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Rebuild a builder from a rendered query string.
    ///
    /// A leading `?` and empty pairs are skipped; a pair without `=` gets an empty
    /// value. Values are stored as decoded, without validating their operator.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Decode`] if a component does not decode to UTF-8.
    pub fn from_query(query: &str) -> Result<Self, FilterError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut builder = Self::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, tagged) = pair.split_once('=').unwrap_or((pair, ""));
            builder.filters.insert(
                decode_component(key)?.into_owned(),
                decode_component(tagged)?.into_owned(),
            );
        }
        Ok(builder)
    }

    /// Append the rendered filters to the query of `url`, after any existing pairs
    pub fn append_to_url(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        let rendered = self.render();
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{rendered}"),
            _ => rendered,
        };
        url.set_query(Some(&query));
    }

    fn scalar(&mut self, key: String, operator: FilterOperator, value: &FilterValue) -> &mut Self {
        self.insert(key, &TaggedValue::new(operator, vec![value.to_string()]))
    }

    fn list(&mut self, key: String, operator: FilterOperator, arg: FilterArg) -> &mut Self {
        match arg {
            FilterArg::List(values) => {
                let raw = values.iter().map(ToString::to_string).collect();
                self.insert(key, &TaggedValue::new(operator, raw))
            }
            FilterArg::Scalar(value) => {
                tracing::debug!(
                    %key,
                    operator = operator.token(),
                    %value,
                    "ignoring scalar argument for list filter"
                );
                self
            }
        }
    }

    fn insert(&mut self, key: String, tagged: &TaggedValue) -> &mut Self {
        // IndexMap::insert keeps the slot of an existing key
        self.filters.insert(key, tagged.to_string());
        self
    }
}

impl fmt::Display for FilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for FilterBuilder {
    type Err = FilterError;

    fn from_str(query: &str) -> Result<Self, Self::Err> {
        Self::from_query(query)
    }
}

impl Serialize for FilterBuilder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operator_tag() {
        let mut builder = FilterBuilder::new();
        builder
            .equals("a", 1)
            .greater_than("b", 2)
            .greater_than_or_equal("c", 3)
            .less_than("d", 4)
            .less_than_or_equal("e", 5)
            .not_equals("f", 6)
            .like("g", "x")
            .not_like("h", "y")
            .is_in("i", [1, 2])
            .not_in("j", vec!["p", "q"]);
        builder.between("k", (0, 9)).unwrap();

        let tags: Vec<_> = builder.iter().map(|(_, tagged)| tagged).collect();
        assert_eq!(
            tags,
            vec!["1", ">:2", ">=:3", "<:4", "<=:5", "!=:6", "~:x", "!~:y", "in:1,2", "!in:p,q", "><:0,9"]
        );
    }

    #[test]
    fn test_scalar_list_argument_is_noop() {
        let mut builder = FilterBuilder::new();
        builder.not_in("role", "guest");
        assert!(builder.is_empty());

        builder.not_in("role", ["guest"]).not_in("role", "admin");
        assert_eq!(builder.get("role"), Some("!in:guest"));
    }

    #[test]
    fn test_empty_list_is_written() {
        let mut builder = FilterBuilder::new();
        builder.is_in("role", Vec::<String>::new());
        assert_eq!(builder.get("role"), Some("in:"));
    }

    #[test]
    fn test_between_rejects_wrong_shapes() {
        let mut builder = FilterBuilder::new();
        builder.equals("price", 5);

        let err = builder.between("price", 10).unwrap_err();
        assert_eq!(err, FilterError::invalid_range("price", None));

        let err = builder.between("price", [1, 2, 3]).unwrap_err();
        assert_eq!(err, FilterError::invalid_range("price", Some(3)));

        assert_eq!(builder.get("price"), Some("5"));
    }

    #[test]
    fn test_generic_filter_dispatch() {
        let mut builder = FilterBuilder::new();
        builder
            .filter("tags", FilterOperator::Like, ["a", "b"])
            .unwrap()
            .filter("role", FilterOperator::In, "solo")
            .unwrap();
        assert_eq!(builder.get("tags"), Some("~:a,b"));
        assert_eq!(builder.get("role"), None);

        assert!(builder.filter("price", FilterOperator::Between, [1]).is_err());
        builder.filter("price", FilterOperator::Between, [1, 2]).unwrap();
        assert_eq!(builder.get("price"), Some("><:1,2"));
    }

    #[test]
    fn test_parsed_entry() {
        let mut builder = FilterBuilder::new();
        builder.is_in("role", ["admin", "editor"]);
        let parsed = builder.parsed("role").unwrap().unwrap();
        assert_eq!(parsed.operator, FilterOperator::In);
        assert_eq!(parsed.values, vec!["admin".to_string(), "editor".to_string()]);
        assert!(builder.parsed("missing").is_none());
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut builder = FilterBuilder::new();
        builder.equals("x", 1);
        assert_eq!(builder.render(), "x=1");
        builder.clear().equals("y", 2);
        assert_eq!(builder.render(), "y=2");
        assert_eq!(builder.len(), 1);
    }
}
