//! Backend-neutral document filter.
//!
//! Handlers and the service build a [`Filter`]; each store translates it into
//! its own query language (see `crate::mongodb::to_mongo_filter`) or evaluates
//! it in process with [`Filter::matches`].

use serde_json::Value;

use crate::store::Document;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// Exact, case-sensitive equality. An array field matches when any of
    /// its elements is equal to `value`.
    Eq { field: String, value: Value },
    /// Case-insensitive substring match on a string field. An array field
    /// matches when any string element contains `needle`.
    ContainsIgnoreCase { field: String, needle: String },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// `needle` found (case-insensitively) in at least one of `fields`.
    pub fn any_contains(fields: &[&str], needle: &str) -> Self {
        Filter::Or(
            fields
                .iter()
                .map(|field| Filter::contains_ignore_case(*field, needle))
                .collect(),
        )
    }

    /// Conjunction that absorbs `All` and flattens nested `And`s.
    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), f) => {
                left.push(f);
                Filter::And(left)
            }
            (f, Filter::And(mut right)) => {
                right.insert(0, f);
                Filter::And(right)
            }
            (left, right) => Filter::And(vec![left, right]),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    /// Evaluate against a document held in memory.
    ///
    /// A missing field only equals `null`; it never contains a needle.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => match doc.get(field) {
                Some(Value::Array(items)) => {
                    items.iter().any(|item| values_equal(item, value))
                        || matches!(value, Value::Array(expected) if expected == items)
                }
                Some(actual) => values_equal(actual, value),
                None => value.is_null(),
            },
            Filter::ContainsIgnoreCase { field, needle } => {
                let needle = needle.to_lowercase();
                match doc.get(field) {
                    Some(Value::String(s)) => s.to_lowercase().contains(&needle),
                    Some(Value::Array(items)) => items.iter().any(|item| {
                        item.as_str()
                            .is_some_and(|s| s.to_lowercase().contains(&needle))
                    }),
                    _ => false,
                }
            }
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

/// JSON equality that treats `1` and `1.0` as the same number.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
        _ => left == right,
    }
}
