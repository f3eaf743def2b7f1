//! Audit generation options.
//!
//! [`AuditOptions`] is the sparse, user-facing configuration: every key is
//! optional. [`AuditPolicy::resolve`] fills the gaps with defaults and is the
//! only form the rest of the crate reads.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default schema holding `get_audit_information`.
pub const DEFAULT_AUDIT_FUNCTION_SCHEMA: &str = "app_public";

/// Default column passed to `get_audit_information`.
pub const DEFAULT_AUDIT_ID_COLUMN: &str = "id";

/// Default namespace of the audit log's own tables.
pub const DEFAULT_AUDIT_LOG_SCHEMA: &str = "pgmemento";

/// Default JSON path for the session-info actor source.
pub const DEFAULT_SESSION_INFO_PATH: &str = "{name}";

/// Default value when no actor name can be found.
pub const DEFAULT_NAME_FALLBACK: &str = "unknown user";

/// Where the actor name of an audit event comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActorNameSource {
    /// The event's `originated_by_user_id` column.
    #[default]
    #[serde(rename = "originated_by_user_id", alias = "audit-originator-id")]
    OriginatorId,
    /// A value inside the transaction's session-info JSON.
    ///
    /// Accepted in configuration but not used by generation.
    #[serde(rename = "session_info")]
    SessionInfo,
}

/// Sparse audit options as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuditOptions {
    /// Schema that contains the `get_audit_information` function.
    pub audit_function_schema: Option<String>,
    /// Column passed to `get_audit_information`.
    pub audit_id_column_name: Option<String>,
    /// Namespace of the audit log's own tables, never augmented.
    pub audit_log_schema: Option<String>,
    /// Add the `auditEvents` connection.
    pub audit_event_connection: Option<bool>,
    /// Declare audit event fields and the connection as nullable.
    pub audit_event_fields_and_connection_optional: Option<bool>,
    /// Add `firstAuditEvent` and `lastAuditEvent`.
    pub first_last_audit_event: Option<bool>,
    /// Add `lastModifiedAt`.
    pub date_props: Option<bool>,
    /// Add `lastModifiedBy`.
    pub name_props: Option<bool>,
    /// Actor name source.
    pub name_source: Option<ActorNameSource>,
    /// JSON path (`#>>` notation) to the name inside session info.
    pub name_session_info_json_path: Option<String>,
    /// Value used when no name can be found.
    pub name_fallback: Option<String>,
    /// Hide the audit id column on audited entities.
    pub omit_audit_ids: Option<bool>,
}

impl AuditOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Set the audit function schema.
    pub fn with_audit_function_schema(mut self, schema: impl Into<String>) -> Self {
        self.audit_function_schema = Some(schema.into());
        self
    }

    /// Set the audit id column.
    pub fn with_audit_id_column(mut self, column: impl Into<String>) -> Self {
        self.audit_id_column_name = Some(column.into());
        self
    }

    /// Toggle the `auditEvents` connection.
    pub fn with_event_connection(mut self, enabled: bool) -> Self {
        self.audit_event_connection = Some(enabled);
        self
    }

    /// Toggle `firstAuditEvent` / `lastAuditEvent`.
    pub fn with_first_last_event(mut self, enabled: bool) -> Self {
        self.first_last_audit_event = Some(enabled);
        self
    }

    /// Toggle `lastModifiedAt`.
    pub fn with_date_props(mut self, enabled: bool) -> Self {
        self.date_props = Some(enabled);
        self
    }

    /// Toggle `lastModifiedBy`.
    pub fn with_name_props(mut self, enabled: bool) -> Self {
        self.name_props = Some(enabled);
        self
    }

    /// Toggle nullable audit event fields.
    pub fn with_optional_fields(mut self, enabled: bool) -> Self {
        self.audit_event_fields_and_connection_optional = Some(enabled);
        self
    }

    /// Toggle hiding of audit id columns.
    pub fn with_omit_audit_ids(mut self, enabled: bool) -> Self {
        self.omit_audit_ids = Some(enabled);
        self
    }
}

/// Fully resolved audit options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditPolicy {
    /// Schema that contains `get_audit_information`.
    pub audit_function_schema: String,
    /// Column passed to `get_audit_information`.
    pub audit_id_column: String,
    /// Namespace of the audit log's own tables.
    pub audit_log_schema: String,
    /// Add the `auditEvents` connection.
    pub event_connection: bool,
    /// Add `firstAuditEvent` and `lastAuditEvent`.
    pub first_last_event: bool,
    /// Add `lastModifiedAt`.
    pub date_fields: bool,
    /// Add `lastModifiedBy`.
    pub name_fields: bool,
    /// Declare audit event fields and the connection as nullable.
    pub optional_fields: bool,
    /// Actor name source.
    pub name_source: ActorNameSource,
    /// JSON path to the name inside session info.
    pub name_session_info_path: String,
    /// Value used when no name can be found.
    pub name_fallback: String,
    /// Hide the audit id column on audited entities.
    pub omit_audit_ids: bool,
}

impl AuditPolicy {
    /// Resolve sparse options against the defaults.
    pub fn resolve(options: &AuditOptions) -> Self {
        Self {
            audit_function_schema: options
                .audit_function_schema
                .clone()
                .unwrap_or_else(|| DEFAULT_AUDIT_FUNCTION_SCHEMA.to_string()),
            audit_id_column: options
                .audit_id_column_name
                .clone()
                .unwrap_or_else(|| DEFAULT_AUDIT_ID_COLUMN.to_string()),
            audit_log_schema: options
                .audit_log_schema
                .clone()
                .unwrap_or_else(|| DEFAULT_AUDIT_LOG_SCHEMA.to_string()),
            event_connection: options.audit_event_connection.unwrap_or(true),
            first_last_event: options.first_last_audit_event.unwrap_or(true),
            date_fields: options.date_props.unwrap_or(true),
            name_fields: options.name_props.unwrap_or(true),
            optional_fields: options
                .audit_event_fields_and_connection_optional
                .unwrap_or(false),
            name_source: options.name_source.unwrap_or_default(),
            name_session_info_path: options
                .name_session_info_json_path
                .clone()
                .unwrap_or_else(|| DEFAULT_SESSION_INFO_PATH.to_string()),
            name_fallback: options
                .name_fallback
                .clone()
                .unwrap_or_else(|| DEFAULT_NAME_FALLBACK.to_string()),
            omit_audit_ids: options.omit_audit_ids.unwrap_or(false),
        }
    }

    /// Check if any field group is enabled.
    pub fn has_any_field_group(&self) -> bool {
        self.event_connection || self.first_last_event || self.date_fields || self.name_fields
    }
}

impl Default for AuditPolicy {
    fn default() -> Self {
        Self::resolve(&AuditOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = AuditPolicy::default();
        assert_eq!(policy.audit_function_schema, "app_public");
        assert_eq!(policy.audit_id_column, "id");
        assert_eq!(policy.audit_log_schema, "pgmemento");
        assert!(policy.event_connection);
        assert!(policy.first_last_event);
        assert!(policy.date_fields);
        assert!(policy.name_fields);
        assert!(!policy.optional_fields);
        assert_eq!(policy.name_source, ActorNameSource::OriginatorId);
        assert_eq!(policy.name_session_info_path, "{name}");
        assert_eq!(policy.name_fallback, "unknown user");
        assert!(!policy.omit_audit_ids);
    }

    #[test]
    fn test_partial_override() {
        let options = AuditOptions::new()
            .with_audit_function_schema("audit")
            .with_date_props(false)
            .with_optional_fields(true);
        let policy = AuditPolicy::resolve(&options);

        assert_eq!(policy.audit_function_schema, "audit");
        assert!(!policy.date_fields);
        assert!(policy.optional_fields);
        assert!(policy.name_fields);
        assert_eq!(policy.audit_id_column, "id");
    }

    #[test]
    fn test_json_keys() {
        let options = AuditOptions::from_json_str(
            r#"{
                "auditFunctionSchema": "app_hidden",
                "auditIdColumnName": "row_id",
                "auditEventFieldsAndConnectionOptional": true,
                "firstLastAuditEvent": false,
                "nameSource": "session_info"
            }"#,
        )
        .unwrap();
        let policy = AuditPolicy::resolve(&options);

        assert_eq!(policy.audit_function_schema, "app_hidden");
        assert_eq!(policy.audit_id_column, "row_id");
        assert!(policy.optional_fields);
        assert!(!policy.first_last_event);
        assert_eq!(policy.name_source, ActorNameSource::SessionInfo);
    }

    #[test]
    fn test_name_source_alias() {
        let options = AuditOptions::from_json_str(r#"{"nameSource": "audit-originator-id"}"#).unwrap();
        assert_eq!(options.name_source, Some(ActorNameSource::OriginatorId));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(AuditOptions::from_json_str(r#"{"dateProp": true}"#).is_err());
    }

    #[test]
    fn test_no_field_groups() {
        let policy = AuditPolicy::resolve(
            &AuditOptions::new()
                .with_event_connection(false)
                .with_first_last_event(false)
                .with_date_props(false)
                .with_name_props(false),
        );
        assert!(!policy.has_any_field_group());
    }
}
