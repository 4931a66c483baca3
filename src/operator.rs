use serde::{Serialize, Serializer};
use std::fmt;

/// Comparison operators understood by the receiving API.
///
/// Each operator has a wire token written in front of the value, separated by `:`.
/// Equality has no token and is written as the bare value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    /// Equality (bare value)
    Equals,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterThanOrEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessThanOrEqual,
    /// Not equal (`!=`)
    NotEquals,
    /// Pattern match (`~`)
    Like,
    /// Negated pattern match (`!~`)
    NotLike,
    /// Set membership (`in`)
    In,
    /// Negated set membership (`!in`)
    NotIn,
    /// Inclusive range (`><`), always two values
    Between,
}

impl FilterOperator {
    pub const ALL: [Self; 11] = [
        Self::Equals,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::NotEquals,
        Self::Like,
        Self::NotLike,
        Self::In,
        Self::NotIn,
        Self::Between,
    ];

    /// Get the wire token for this operator
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Equals => "",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::NotEquals => "!=",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::In => "in",
            Self::NotIn => "!in",
            Self::Between => "><",
        }
    }

    /// Parse an operator from its wire token (e.g. `">="`, `"!in"`)
    ///
    /// The empty token is not accepted: equality carries no prefix at all.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterThanOrEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanOrEqual),
            "!=" => Some(Self::NotEquals),
            "~" => Some(Self::Like),
            "!~" => Some(Self::NotLike),
            "in" => Some(Self::In),
            "!in" => Some(Self::NotIn),
            "><" => Some(Self::Between),
            _ => None,
        }
    }

    /// Whether the operator carries a comma-separated list of values
    #[must_use]
    pub const fn takes_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn | Self::Between)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl Serialize for FilterOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}
