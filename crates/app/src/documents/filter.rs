//! Document Filters

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::documents::{decimal::read_decimal, models::Document};

/// A condition on a single document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The field equals the given JSON value.
    Eq(Value),

    /// The field holds a decimal within the inclusive bounds.
    Range {
        gte: Option<Decimal>,
        lte: Option<Decimal>,
    },
}

impl Condition {
    fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Self::Eq(expected) => value == Some(expected),
            Self::Range { gte, lte } => {
                let Some(actual) = value.and_then(read_decimal) else {
                    return false;
                };

                gte.is_none_or(|min| actual >= min) && lte.is_none_or(|max| actual <= max)
            }
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Eq(value) => value.clone(),
            Self::Range { gte, lte } => {
                let mut bounds = Map::new();

                if let Some(min) = gte {
                    bounds.insert("$gte".to_string(), Value::String(min.to_string()));
                }

                if let Some(max) = lte {
                    bounds.insert("$lte".to_string(), Value::String(max.to_string()));
                }

                Value::Object(bounds)
            }
        }
    }
}

/// A conjunction of field conditions. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: BTreeMap<String, Condition>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses
            .insert(field.into(), Condition::Eq(value.into()));
        self
    }

    /// Require `field` to lie within the inclusive bounds. No clause is added
    /// when both bounds are absent.
    #[must_use]
    pub fn range(
        mut self,
        field: impl Into<String>,
        gte: Option<Decimal>,
        lte: Option<Decimal>,
    ) -> Self {
        if gte.is_some() || lte.is_some() {
            self.clauses
                .insert(field.into(), Condition::Range { gte, lte });
        }

        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.clauses.get(field)
    }

    pub fn clauses(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.clauses
            .iter()
            .map(|(field, condition)| (field.as_str(), condition))
    }

    /// Evaluate the filter against a document in process.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, condition)| condition.matches(document.get(field)))
    }

    /// Render the filter in the familiar document query form, e.g.
    /// `{"price": {"$gte": "10"}, "status": true}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.clauses
                .iter()
                .map(|(field, condition)| (field.clone(), condition.to_json()))
                .collect(),
        )
    }
}
