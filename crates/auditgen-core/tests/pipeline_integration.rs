//! Integration tests for the audit generation pipeline.

use auditgen_core::proto::{FieldResolution, QueryBuilder, SelectBuilder, TypeRef};
use auditgen_core::{
    generate, AuditInflection, AuditOptions, ClassDescriptor, ClassKind, DefaultInflection, Error,
    Introspection, ProcedureDescriptor, TypeDescriptor,
};
use pretty_assertions::assert_eq;

/// Shop schema: two audited tables, a view, an unaudited table, the audit
/// log's own table, and the audit function returning `app_public.audit_event`.
fn shop_snapshot() -> Introspection {
    let orders = ClassDescriptor::table(1, "app_public", "orders").with_attributes([
        ("id", "int4"),
        ("customer_id", "int4"),
        ("audit_id", "int8"),
    ]);
    let customers = ClassDescriptor::table(2, "app_public", "customers").with_attributes([
        ("id", "int4"),
        ("name", "text"),
        ("audit_id", "int8"),
    ]);
    let order_totals = ClassDescriptor::new(3, "app_public", "order_totals", ClassKind::View)
        .with_attributes([("id", "int4"), ("audit_id", "int8")]);
    let settings = ClassDescriptor::table(4, "app_public", "settings")
        .with_attributes([("id", "int4"), ("value", "jsonb")]);
    let row_log = ClassDescriptor::table(5, "pgmemento", "row_log")
        .with_attributes([("id", "int8"), ("audit_id", "int8")]);
    let audit_event = ClassDescriptor::new(50, "app_public", "audit_event", ClassKind::CompositeType)
        .with_attributes([
            ("id", "int8"),
            ("originated_at", "timestamptz"),
            ("originated_by_user_id", "uuid"),
        ]);

    Introspection::new()
        .with_class(orders)
        .with_class(customers)
        .with_class(order_totals)
        .with_class(settings)
        .with_class(row_log)
        .with_class(audit_event)
        .with_type(TypeDescriptor::composite(500, "audit_event", 50))
        .with_procedure(ProcedureDescriptor::new(
            900,
            "app_public",
            "get_audit_information",
            500,
        ))
}

fn first_last_only() -> AuditOptions {
    AuditOptions::new()
        .with_first_last_event(true)
        .with_date_props(false)
        .with_name_props(false)
        .with_event_connection(false)
}

// ============== Tests ==============

#[test]
fn test_only_audited_tables_are_extended() {
    let result = generate(&shop_snapshot(), &AuditOptions::default(), &DefaultInflection).unwrap();

    assert_eq!(
        result.audited_entities,
        vec!["app_public.orders", "app_public.customers"]
    );
    let extended: Vec<_> = result
        .document
        .definitions
        .iter()
        .map(|d| d.type_name.as_str())
        .collect();
    assert_eq!(
        extended,
        vec![
            "Order",
            "Order",
            "Order",
            "Order",
            "Customer",
            "Customer",
            "Customer",
            "Customer",
            "AuditEvent"
        ]
    );
}

#[test]
fn test_first_last_only_for_orders() {
    let result = generate(&shop_snapshot(), &first_last_only(), &DefaultInflection).unwrap();

    assert_eq!(
        result.document.field_names("Order"),
        vec!["firstAuditEvent", "lastAuditEvent"]
    );
    for name in ["firstAuditEvent", "lastAuditEvent"] {
        let field = result.document.find_field("Order", name).unwrap();
        assert_eq!(field.field_type, TypeRef::non_null("AuditEvent"));
    }
}

#[test]
fn test_optional_fields_toggle() {
    let strict = generate(&shop_snapshot(), &first_last_only(), &DefaultInflection).unwrap();
    let optional = generate(
        &shop_snapshot(),
        &first_last_only().with_optional_fields(true),
        &DefaultInflection,
    )
    .unwrap();

    assert_eq!(strict.document.len(), optional.document.len());
    for (a, b) in strict
        .document
        .definitions
        .iter()
        .zip(optional.document.definitions.iter())
    {
        assert_eq!(a.type_name, b.type_name);
        for (fa, fb) in a.fields.iter().zip(b.fields.iter()) {
            assert_eq!(fa.name, fb.name);
            assert_eq!(fa.resolution, fb.resolution);
            assert_eq!(fa.field_type.name, fb.field_type.name);
            if fa.field_type.name == "AuditEvent" {
                assert!(fa.field_type.non_null);
                assert!(!fb.field_type.non_null);
            } else {
                assert_eq!(fa.field_type, fb.field_type);
            }
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    let snapshot = shop_snapshot();
    let options = AuditOptions::default().with_omit_audit_ids(true);

    let first = generate(&snapshot, &options, &DefaultInflection).unwrap();
    let second = generate(&snapshot, &options, &DefaultInflection).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.document.to_string(), second.document.to_string());
}

#[test]
fn test_actor_field_is_hidden_and_republished() {
    let result = generate(&shop_snapshot(), &AuditOptions::default(), &DefaultInflection).unwrap();

    let raw = result
        .introspection
        .class(50)
        .unwrap()
        .attribute("originated_by_user_id")
        .unwrap();
    assert!(raw.is_omitted());
    assert!(result
        .document
        .find_field("AuditEvent", "originatedByUserId")
        .is_some());
}

#[test]
fn test_omit_audit_ids() {
    let result = generate(
        &shop_snapshot(),
        &AuditOptions::default().with_omit_audit_ids(true),
        &DefaultInflection,
    )
    .unwrap();

    let omitted: Vec<_> = result
        .introspection
        .classes
        .iter()
        .flat_map(|c| c.attributes.iter())
        .filter(|a| a.is_omitted())
        .map(|a| (a.class_id, a.name.as_str()))
        .collect();
    assert_eq!(
        omitted,
        vec![(1, "id"), (2, "id"), (50, "originated_by_user_id")]
    );
}

#[test]
fn test_first_event_subquery_sql() {
    let result = generate(&shop_snapshot(), &first_last_only(), &DefaultInflection).unwrap();
    let field = result.document.find_field("Customer", "firstAuditEvent").unwrap();

    let (source, mutator) = match &field.resolution {
        FieldResolution::Source {
            source,
            mutator: Some(mutator),
        } => (source.clone(), mutator.clone()),
        other => panic!("expected source resolution, got {:?}", other),
    };

    let mut builder = SelectBuilder::new("customers_1", "audit_1", source);
    mutator.apply(&mut builder);
    assert_eq!(builder.table_alias(), "audit_1");
    assert_eq!(
        builder.to_sql().unwrap(),
        r#"SELECT "audit_1".* FROM "app_public"."get_audit_information"("customers_1"."id") AS "audit_1" ORDER BY "id" ASC LIMIT 1"#
    );
}

#[test]
fn test_custom_inflection() {
    struct Renamed;

    impl AuditInflection for Renamed {
        fn last_modified_at(&self) -> String {
            "updatedAt".to_string()
        }

        fn last_modified_by(&self) -> String {
            "updatedBy".to_string()
        }

        fn originating_actor_field(&self) -> String {
            "actorId".to_string()
        }
    }

    let options = AuditOptions::new()
        .with_first_last_event(false)
        .with_event_connection(false);
    let result = generate(&shop_snapshot(), &options, &Renamed).unwrap();

    assert_eq!(result.document.field_names("Order"), vec!["updatedAt", "updatedBy"]);
    assert_eq!(result.document.field_names("AuditEvent"), vec!["actorId"]);
}

#[test]
fn test_audited_table_without_audit_id_column_fails() {
    let snapshot = Introspection::new().with_class(
        ClassDescriptor::table(1, "app_public", "orders")
            .with_attributes([("order_no", "int4"), ("audit_id", "int8")]),
    );

    let err = generate(&snapshot, &AuditOptions::default(), &DefaultInflection).unwrap_err();
    assert!(matches!(err, Error::MissingAttribute { ref attribute, .. } if attribute == "id"));
}

#[test]
fn test_missing_audit_function_uses_fallback_type() {
    let mut snapshot = shop_snapshot();
    snapshot.procedures.clear();

    let result = generate(&snapshot, &AuditOptions::default(), &DefaultInflection).unwrap();
    assert_eq!(
        result.document.field_names("AuditEvent"),
        vec!["originatedByUserId"]
    );
    assert!(result.annotations.is_empty());
    assert!(!result
        .introspection
        .class(50)
        .unwrap()
        .attribute("originated_by_user_id")
        .unwrap()
        .is_omitted());
}

#[test]
fn test_outputs_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<auditgen_core::proto::ExtensionDocument>();
    assert_send_sync::<auditgen_core::proto::Fragment>();
    assert_send_sync::<auditgen_core::proto::Mutator>();
}
