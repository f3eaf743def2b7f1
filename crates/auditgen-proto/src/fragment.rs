//! Composable SQL fragments.
//!
//! A [`Fragment`] is a small expression tree describing part of a query. It
//! never holds the alias of the row it is evaluated against: the alias is
//! supplied when the fragment is rendered, so one fragment value can be shared
//! by any number of concurrent requests.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Alias printed in place of the current row when a fragment is displayed
/// without a concrete alias.
pub const ROW_ALIAS_PLACEHOLDER: &str = "__row__";

/// Sort direction used inside fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Build a direction from an ascending flag.
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    /// Whether this direction is ascending.
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Ordering term of a scalar sub-select.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderTerm {
    /// Column to order by.
    pub column: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl OrderTerm {
    /// Ascending order on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending order on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A composable query expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    /// A quoted identifier.
    Identifier {
        /// Unquoted identifier text.
        name: String,
    },
    /// Raw SQL emitted verbatim.
    Raw {
        /// SQL text.
        sql: String,
    },
    /// The alias of the row currently being resolved.
    RowAlias,
    /// A column qualified by a table expression.
    Column {
        /// Table expression, usually [`Fragment::RowAlias`].
        table: Box<Fragment>,
        /// Column name.
        column: String,
    },
    /// A schema-qualified function call.
    Call {
        /// Schema holding the function.
        schema: String,
        /// Function name.
        function: String,
        /// Call arguments.
        args: Vec<Fragment>,
    },
    /// Correlated sub-select returning one column of the first row.
    ScalarSubquery {
        /// Column to project.
        column: String,
        /// Row source of the sub-select.
        from: Box<Fragment>,
        /// Ordering applied before the limit.
        order_by: OrderTerm,
        /// Row limit.
        limit: u64,
    },
}

impl Fragment {
    /// Create an identifier fragment.
    pub fn identifier(name: impl Into<String>) -> Self {
        Fragment::Identifier { name: name.into() }
    }

    /// Create a raw SQL fragment.
    pub fn raw(sql: impl Into<String>) -> Self {
        Fragment::Raw { sql: sql.into() }
    }

    /// Column on the current row.
    pub fn row_column(column: impl Into<String>) -> Self {
        Fragment::Column {
            table: Box::new(Fragment::RowAlias),
            column: column.into(),
        }
    }

    /// Schema-qualified function call.
    pub fn call(schema: impl Into<String>, function: impl Into<String>, args: Vec<Fragment>) -> Self {
        Fragment::Call {
            schema: schema.into(),
            function: function.into(),
            args,
        }
    }

    /// Scalar sub-select over `from`.
    pub fn scalar_subquery(
        column: impl Into<String>,
        from: Fragment,
        order_by: OrderTerm,
        limit: u64,
    ) -> Self {
        Fragment::ScalarSubquery {
            column: column.into(),
            from: Box::new(from),
            order_by,
            limit,
        }
    }

    /// Whether the fragment refers to the current row anywhere.
    pub fn is_correlated(&self) -> bool {
        match self {
            Fragment::RowAlias => true,
            Fragment::Identifier { .. } | Fragment::Raw { .. } => false,
            Fragment::Column { table, .. } => table.is_correlated(),
            Fragment::Call { args, .. } => args.iter().any(Fragment::is_correlated),
            Fragment::ScalarSubquery { from, .. } => from.is_correlated(),
        }
    }

    /// Render the fragment to SQL, correlating it with the row `alias`.
    pub fn render(&self, alias: &str) -> Result<String, Error> {
        if alias.is_empty() {
            return Err(Error::EmptyAlias);
        }
        self.validate()?;
        let mut out = String::new();
        self.write_sql(alias, &mut out)?;
        Ok(out)
    }

    fn validate(&self) -> Result<(), Error> {
        match self {
            Fragment::Identifier { name } => check_identifier(name),
            Fragment::Raw { .. } | Fragment::RowAlias => Ok(()),
            Fragment::Column { table, column } => {
                table.validate()?;
                check_identifier(column)
            }
            Fragment::Call {
                schema,
                function,
                args,
            } => {
                check_identifier(schema)?;
                check_identifier(function)?;
                args.iter().try_for_each(Fragment::validate)
            }
            Fragment::ScalarSubquery {
                column,
                from,
                order_by,
                ..
            } => {
                check_identifier(column)?;
                check_identifier(&order_by.column)?;
                from.validate()
            }
        }
    }

    fn write_sql<W: Write>(&self, alias: &str, out: &mut W) -> fmt::Result {
        match self {
            Fragment::Identifier { name } => write_identifier(name, out),
            Fragment::Raw { sql } => out.write_str(sql),
            Fragment::RowAlias => write_identifier(alias, out),
            Fragment::Column { table, column } => {
                table.write_sql(alias, out)?;
                out.write_char('.')?;
                write_identifier(column, out)
            }
            Fragment::Call {
                schema,
                function,
                args,
            } => {
                write_identifier(schema, out)?;
                out.write_char('.')?;
                write_identifier(function, out)?;
                out.write_char('(')?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    arg.write_sql(alias, out)?;
                }
                out.write_char(')')
            }
            Fragment::ScalarSubquery {
                column,
                from,
                order_by,
                limit,
            } => {
                out.write_str("(SELECT ")?;
                write_identifier(column, out)?;
                out.write_str(" FROM ")?;
                from.write_sql(alias, out)?;
                out.write_str(" ORDER BY ")?;
                write_identifier(&order_by.column, out)?;
                write!(out, " {} LIMIT {})", order_by.direction, limit)
            }
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_sql(ROW_ALIAS_PLACEHOLDER, f)
    }
}

fn check_identifier(name: &str) -> Result<(), Error> {
    if name.is_empty() || name.contains('\0') {
        return Err(Error::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// Write a double-quoted SQL identifier.
pub(crate) fn write_identifier<W: Write>(name: &str, out: &mut W) -> fmt::Result {
    out.write_char('"')?;
    for ch in name.chars() {
        if ch == '"' {
            out.write_str("\"\"")?;
        } else {
            out.write_char(ch)?;
        }
    }
    out.write_char('"')
}
