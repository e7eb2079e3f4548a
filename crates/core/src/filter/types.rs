//! Filter term and filter set types.

use std::fmt;

/// Comparison applied by a [`FilterTerm`].
///
/// Negation is part of the variant; there is no separate flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Contains,
    NotContains,
    ContainsAny,
    NotContainsAny,
    Equals,
    NotEquals,
    /// A well-formed call whose operator name is not recognised. Never
    /// matches.
    Unknown(String),
}

impl Operator {
    /// Resolve an operator name (case-insensitive) and a negation prefix.
    pub fn from_name(name: &str, negated: bool) -> Self {
        match (name.to_ascii_lowercase().as_str(), negated) {
            ("contains", false) => Self::Contains,
            ("contains", true) => Self::NotContains,
            ("containsany", false) => Self::ContainsAny,
            ("containsany", true) => Self::NotContainsAny,
            ("equals", false) => Self::Equals,
            ("equals", true) => Self::NotEquals,
            (_, false) => Self::Unknown(name.to_string()),
            (_, true) => Self::Unknown(format!("!{name}")),
        }
    }

    pub fn is_negated(&self) -> bool {
        match self {
            Self::NotContains | Self::NotContainsAny | Self::NotEquals => true,
            Self::Unknown(name) => name.starts_with('!'),
            _ => false,
        }
    }

    /// Operator name without the negation prefix.
    pub fn name(&self) -> &str {
        match self {
            Self::Contains | Self::NotContains => "contains",
            Self::ContainsAny | Self::NotContainsAny => "containsAny",
            Self::Equals | Self::NotEquals => "equals",
            Self::Unknown(name) => name.trim_start_matches('!'),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            f.write_str("!")?;
        }
        f.write_str(self.name())
    }
}

/// One parsed predicate: `property.operator(values)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    /// Dot-separated, lowercased property path.
    pub property: String,
    pub operator: Operator,
    pub values: Vec<String>,
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator.is_negated() {
            f.write_str("!")?;
        }
        write!(f, "{}.{}(", self.property, self.operator.name())?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value:?}")?;
        }
        f.write_str(")")
    }
}

/// How the terms of a [`FilterSet`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Combine {
    #[default]
    And,
    Or,
}

impl fmt::Display for Combine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

/// A list of terms joined by AND or OR. An empty set matches every note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    pub terms: Vec<FilterTerm>,
    pub combine: Combine,
}

impl FilterSet {
    pub fn new(terms: Vec<FilterTerm>, combine: Combine) -> Self {
        Self { terms, combine }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}: []", self.combine);
        }
        write!(f, "{}:", self.combine)?;
        for term in &self.terms {
            write!(f, "\n  - {term}")?;
        }
        Ok(())
    }
}
