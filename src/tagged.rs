//! The `operator:value` form carried by each query parameter.
//!
//! ```text
//! active            equality, no prefix
//! >=:18             scalar operator
//! in:admin,editor   list operator, comma-separated
//! ><:10,100         range, exactly two values
//! ```

use std::fmt;

use crate::errors::FilterError;
use crate::operator::FilterOperator;

/// An operator with its raw, not yet percent-encoded values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedValue {
    pub operator: FilterOperator,
    /// One value for scalar operators, any number for `in`/`!in`, two for `><`
    pub values: Vec<String>,
}

impl TaggedValue {
    #[must_use]
    pub fn new(operator: FilterOperator, values: Vec<String>) -> Self {
        Self { operator, values }
    }

    /// Parse a decoded tagged string.
    ///
    /// The operator is the text before the first `:` when it is a known token;
    /// otherwise the whole string is an equality value, so `10:30` stays intact.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidRange`] when `><` is not followed by two values.
    pub fn parse(key: &str, tagged: &str) -> Result<Self, FilterError> {
        let Some((operator, rest)) = tagged
            .split_once(':')
            .and_then(|(token, rest)| FilterOperator::from_token(token).map(|op| (op, rest)))
        else {
            return Ok(Self::new(FilterOperator::Equals, vec![tagged.to_string()]));
        };

        if !operator.takes_list() {
            return Ok(Self::new(operator, vec![rest.to_string()]));
        }

        let values: Vec<String> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split(',').map(str::to_string).collect()
        };

        if operator == FilterOperator::Between && values.len() != 2 {
            return Err(FilterError::invalid_range(key, Some(values.len())));
        }

        Ok(Self::new(operator, values))
    }
}

impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator != FilterOperator::Equals {
            write!(f, "{}:", self.operator.token())?;
        }
        f.write_str(&self.values.join(","))
    }
}
