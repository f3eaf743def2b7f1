//! Query fragments for one audited entity.
//!
//! [`AuditFragments`] builds every fragment and builder mutation the
//! generated fields need. None of them hold a row alias: the execution engine
//! supplies it when it renders a fragment or applies a mutator.
//!
//! First/last selection orders by the audit row's `id` alone. Rows sharing an
//! `id` have no defined order between them.

use crate::introspection::ClassDescriptor;
use crate::options::AuditPolicy;
use auditgen_proto::{Fragment, Mutator, OrderTerm, SortDirection};

/// Name of the audit-retrieval function.
pub const AUDIT_FUNCTION_NAME: &str = "get_audit_information";

/// Sequence column of audit rows.
pub const AUDIT_SEQUENCE_COLUMN: &str = "id";

/// Timestamp column of audit rows.
pub const AUDIT_OCCURRED_AT_COLUMN: &str = "originated_at";

/// Originating actor column of audit rows.
pub const AUDIT_ORIGINATOR_COLUMN: &str = "originated_by_user_id";

/// Which end of the audit history to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Which {
    /// Oldest audit event.
    First,
    /// Newest audit event.
    Last,
}

impl Which {
    /// Sort direction that puts the wanted event first.
    pub fn direction(self) -> SortDirection {
        match self {
            Which::First => SortDirection::Asc,
            Which::Last => SortDirection::Desc,
        }
    }

    fn order_term(self) -> OrderTerm {
        OrderTerm {
            column: AUDIT_SEQUENCE_COLUMN.to_string(),
            direction: self.direction(),
        }
    }
}

/// Fragment factory bound to one audited entity.
#[derive(Debug, Clone)]
pub struct AuditFragments<'a> {
    class: &'a ClassDescriptor,
    function_schema: &'a str,
    audit_id_column: &'a str,
}

impl<'a> AuditFragments<'a> {
    /// Create a factory for `class`.
    pub fn new(class: &'a ClassDescriptor, policy: &'a AuditPolicy) -> Self {
        Self {
            class,
            function_schema: &policy.audit_function_schema,
            audit_id_column: &policy.audit_id_column,
        }
    }

    /// The entity this factory is bound to.
    pub fn class(&self) -> &'a ClassDescriptor {
        self.class
    }

    /// `"<schema>"."get_audit_information"(<row>."<audit id column>")`.
    pub fn audit_source(&self) -> Fragment {
        Fragment::call(
            self.function_schema,
            AUDIT_FUNCTION_NAME,
            vec![Fragment::row_column(self.audit_id_column)],
        )
    }

    /// Limit to one row, ordered by sequence id ascending (first) or
    /// descending (last).
    pub fn first_or_last_mutator(&self, which: Which) -> Mutator {
        Mutator::new().limit(1).order_by(
            Fragment::identifier(AUDIT_SEQUENCE_COLUMN),
            which.direction().is_ascending(),
            false,
        )
    }

    /// Timestamp of the first or last audit event, as a scalar sub-select.
    pub fn date_projection(&self, which: Which) -> Fragment {
        self.projection(AUDIT_OCCURRED_AT_COLUMN, which)
    }

    /// Actor id of the first or last audit event, as a scalar sub-select.
    pub fn actor_projection(&self, which: Which) -> Fragment {
        self.projection(AUDIT_ORIGINATOR_COLUMN, which)
    }

    fn projection(&self, column: &str, which: Which) -> Fragment {
        Fragment::scalar_subquery(column, self.audit_source(), which.order_term(), 1)
    }
}
