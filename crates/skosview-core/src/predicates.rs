//! Filter predicates handed down by the listing framework.
//!
//! The framework groups conditions into numbered where-groups, each holding
//! `(field, value, operator)` tuples. Values are arbitrary JSON: most filters
//! send a string or a one-element array, some (statuses, types) send arrays
//! that the API accepts as lists.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Comparison operator attached to a condition.
///
/// The Skosmos API has no operator concept; operators only shape the value
/// (see [`KeywordFilter`]) and are otherwise carried for completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[default]
    Equals,
    Like,
    In,
}

/// One filter condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: String,
    pub value: JsonValue,
    #[serde(default)]
    pub operator: Operator,
}

impl Predicate {
    pub fn new(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator: Operator::Equals,
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Field name with leading `.` separators removed.
    pub fn field_name(&self) -> &str {
        self.field.trim_start_matches('.')
    }

    /// First element of an array value, or the value itself for scalars.
    pub fn first_value(&self) -> Option<&JsonValue> {
        match &self.value {
            JsonValue::Array(items) => items.first(),
            JsonValue::Null => None,
            other => Some(other),
        }
    }
}

/// A group of conditions joined by one conjunction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhereGroup {
    pub conjunction: Conjunction,
    pub conditions: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

/// Ordered where-groups, keyed by group number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    groups: Vec<(i32, WhereGroup)>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition to `group`, creating an AND group on first use.
    /// `None` and `0` both address the default group.
    pub fn add_where(&mut self, group: Option<i32>, predicate: Predicate) {
        let group = group.unwrap_or(0);
        match self.groups.iter_mut().find(|(id, _)| *id == group) {
            Some((_, g)) => g.conditions.push(predicate),
            None => self.groups.push((
                group,
                WhereGroup {
                    conjunction: Conjunction::And,
                    conditions: vec![predicate],
                },
            )),
        }
    }

    /// Set the conjunction of a group, creating it if needed.
    pub fn set_where_group(&mut self, group: i32, conjunction: Conjunction) {
        match self.groups.iter_mut().find(|(id, _)| *id == group) {
            Some((_, g)) => g.conjunction = conjunction,
            None => self.groups.push((
                group,
                WhereGroup {
                    conjunction,
                    conditions: Vec::new(),
                },
            )),
        }
    }

    /// Every condition, group by group, in insertion order.
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.groups.iter().flat_map(|(_, g)| g.conditions.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().next().is_none()
    }
}

impl FromIterator<Predicate> for WhereClause {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        let mut clause = WhereClause::new();
        for predicate in iter {
            clause.add_where(None, predicate);
        }
        clause
    }
}

/// Operators offered by the keyword search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordOperator {
    Contains,
    #[serde(rename = "starts")]
    StartsWith,
}

/// Exposed keyword filter: turns user input into a Skosmos wildcard query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordFilter {
    pub operator: KeywordOperator,
    pub value: String,
}

impl KeywordFilter {
    pub fn new(operator: KeywordOperator, value: impl Into<String>) -> Self {
        Self {
            operator,
            value: value.into(),
        }
    }

    /// The wildcard pattern sent as the `query` parameter.
    pub fn pattern(&self) -> String {
        match self.operator {
            KeywordOperator::Contains => format!("*{}*", self.value),
            KeywordOperator::StartsWith => format!("{}*", self.value),
        }
    }

    /// Add this filter's condition on `field` to the clause.
    pub fn apply(&self, clause: &mut WhereClause, group: Option<i32>, field: &str) {
        clause.add_where(
            group,
            Predicate::new(field, self.pattern()).with_operator(Operator::Like),
        );
    }
}
