//! Query-builder contract and builder mutations.
//!
//! The execution engine owns the query builder. Generated fields carry a
//! [`Mutator`], a list of plain [`BuilderMutation`] values, which the engine
//! applies to its own builder through the [`QueryBuilder`] trait.

use crate::error::Error;
use crate::fragment::{write_identifier, Fragment, SortDirection};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The part of a host query builder that generated mutators drive.
pub trait QueryBuilder {
    /// Alias of the row set this builder selects from.
    fn table_alias(&self) -> &str;

    /// Limit the number of returned rows.
    fn limit(&mut self, limit: u64);

    /// Append an ordering term.
    fn order_by(&mut self, column: &Fragment, ascending: bool, nulls_last: bool);
}

/// One adjustment applied to a sub-query builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BuilderMutation {
    /// Limit the result to `count` rows.
    Limit {
        /// Maximum number of rows.
        count: u64,
    },
    /// Order by a column.
    OrderBy {
        /// Sort expression.
        column: Fragment,
        /// Ascending when true.
        ascending: bool,
        /// Place nulls last when true.
        nulls_last: bool,
    },
}

impl BuilderMutation {
    /// Apply this mutation to a builder.
    pub fn apply(&self, builder: &mut dyn QueryBuilder) {
        match self {
            BuilderMutation::Limit { count } => builder.limit(*count),
            BuilderMutation::OrderBy {
                column,
                ascending,
                nulls_last,
            } => builder.order_by(column, *ascending, *nulls_last),
        }
    }
}

impl fmt::Display for BuilderMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderMutation::Limit { count } => write!(f, "limit {}", count),
            BuilderMutation::OrderBy {
                column,
                ascending,
                nulls_last,
            } => {
                write!(
                    f,
                    "order by {} {}",
                    column,
                    SortDirection::from_ascending(*ascending)
                )?;
                if *nulls_last {
                    f.write_str(" nulls last")?;
                }
                Ok(())
            }
        }
    }
}

/// An ordered list of builder mutations.
///
/// A mutator holds no per-request state. Applying it twice to two builders
/// yields the same adjustments on both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mutator {
    steps: Vec<BuilderMutation>,
}

impl Mutator {
    /// Create an empty mutator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a limit step.
    pub fn limit(mut self, count: u64) -> Self {
        self.steps.push(BuilderMutation::Limit { count });
        self
    }

    /// Append an ordering step.
    pub fn order_by(mut self, column: Fragment, ascending: bool, nulls_last: bool) -> Self {
        self.steps.push(BuilderMutation::OrderBy {
            column,
            ascending,
            nulls_last,
        });
        self
    }

    /// The mutation steps in application order.
    pub fn steps(&self) -> &[BuilderMutation] {
        &self.steps
    }

    /// Check if the mutator does nothing.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply every step, in order, to `builder`.
    pub fn apply(&self, builder: &mut dyn QueryBuilder) {
        for step in &self.steps {
            step.apply(builder);
        }
    }
}

impl fmt::Display for Mutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// Ordering term recorded by [`SelectBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOrder {
    /// Sort expression.
    pub column: Fragment,
    /// Ascending when true.
    pub ascending: bool,
    /// Place nulls last when true.
    pub nulls_last: bool,
}

/// Minimal sub-select builder that renders to SQL.
///
/// `source` is correlated against `parent_alias`; the selected rows are
/// exposed under `alias`.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    parent_alias: String,
    alias: String,
    source: Fragment,
    limit: Option<u64>,
    order: Vec<SelectOrder>,
}

impl SelectBuilder {
    /// Create a builder selecting from `source`.
    pub fn new(parent_alias: impl Into<String>, alias: impl Into<String>, source: Fragment) -> Self {
        Self {
            parent_alias: parent_alias.into(),
            alias: alias.into(),
            source,
            limit: None,
            order: Vec::new(),
        }
    }

    /// The recorded limit, if any.
    pub fn current_limit(&self) -> Option<u64> {
        self.limit
    }

    /// The recorded ordering terms.
    pub fn ordering(&self) -> &[SelectOrder] {
        &self.order
    }

    /// Render the sub-select.
    pub fn to_sql(&self) -> Result<String, Error> {
        if self.alias.is_empty() {
            return Err(Error::EmptyAlias);
        }
        let source = self.source.render(&self.parent_alias)?;
        let mut alias = String::new();
        write_identifier(&self.alias, &mut alias)?;

        let mut sql = format!("SELECT {}.* FROM {} AS {}", alias, source, alias);
        for (i, term) in self.order.iter().enumerate() {
            sql.push_str(if i == 0 { " ORDER BY " } else { ", " });
            sql.push_str(&term.column.render(&self.alias)?);
            sql.push(' ');
            sql.push_str(SortDirection::from_ascending(term.ascending).as_sql());
            if term.nulls_last {
                sql.push_str(" NULLS LAST");
            }
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        Ok(sql)
    }
}

impl QueryBuilder for SelectBuilder {
    fn table_alias(&self) -> &str {
        &self.alias
    }

    fn limit(&mut self, limit: u64) {
        self.limit = Some(limit);
    }

    fn order_by(&mut self, column: &Fragment, ascending: bool, nulls_last: bool) {
        self.order.push(SelectOrder {
            column: column.clone(),
            ascending,
            nulls_last,
        });
    }
}
