//! Integration tests for object ↔ record conversion


use evaporator_core::{
    named_enum, ChainOrder, Crypt, DescriptorCache, DotPath, Error, Evaporable, Evaporator,
    EvaporatorConfig, FieldMapping, Introspect, Member, MemorySecretStore, NamedEnum,
    PathResolver, PropertyDescriptor, Record, Result, TransformerMetadata, UnknownEnumPolicy,
    Value, ValueKind,
};
use std::sync::Arc;
use test_support::*;

named_enum! {
    #[derive(Debug, PartialEq)]
    enum Priority { Low, High }
}

/// Enum property without encryption
#[derive(Debug, PartialEq)]
struct Ticket {
    priority: Priority,
}

impl Default for Ticket {
    fn default() -> Self {
        Self {
            priority: Priority::Low,
        }
    }
}

impl Introspect for Ticket {
    fn type_name(&self) -> &'static str {
        "Ticket"
    }

    fn field(&self, name: &str) -> Option<Member<'_>> {
        match name {
            "priority" => Some(self.priority.to_value().into()),
            _ => None,
        }
    }
}

impl Evaporable for Ticket {
    fn declare() -> Vec<PropertyDescriptor> {
        vec![PropertyDescriptor::builder("priority", ValueKind::Enum)
            .transform(TransformerMetadata::enum_codec::<Priority>())
            .build()]
    }

    fn set_value(&mut self, property: &str, value: Value) -> Result<()> {
        self.priority = Priority::from_value(&value)
            .ok_or_else(|| Error::invalid_value(property, "Priority", &value))?;
        Ok(())
    }
}

fn text(record: &Record, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        other => panic!("expected text in {field}, got {other:?}"),
    }
}

#[test]
fn test_round_trip() {
    let evaporator = evaporator();
    let mapping = account_mapping();
    let account = Account::sample();

    let record = evaporator.to_record(&account, &mapping).unwrap();
    assert_eq!(record.len(), 5);
    assert_eq!(text(&record, "id"), account.id.hyphenated().to_string());
    assert_eq!(text(&record, "owner_email"), "a@example.com");
    assert_eq!(text(&record, "nickname"), "ada");
    assert_ne!(text(&record, "status"), "Suspended");
    assert_ne!(text(&record, "note"), "pays late");

    let restored: Account = evaporator.from_record(&record, &mapping).unwrap();
    assert_eq!(restored, account);
}

#[test]
fn test_ciphertext_is_fresh_per_call() {
    let evaporator = evaporator();
    let mapping = account_mapping();
    let account = Account::sample();

    let first = evaporator.to_record(&account, &mapping).unwrap();
    let second = evaporator.to_record(&account, &mapping).unwrap();
    assert_ne!(text(&first, "note"), text(&second, "note"));
}

#[test]
fn test_mapping_renames_and_filters() {
    let evaporator = evaporator();
    let mapping = FieldMapping::new()
        .map("nickname", "display_name")
        .map("id", "account_id");

    let record = evaporator.to_record(&Account::sample(), &mapping).unwrap();
    assert_eq!(record.len(), 2);
    assert_eq!(text(&record, "display_name"), "ada");
    assert!(record.contains("account_id"));
    assert!(!record.contains("nickname"));
}

#[test]
fn test_undeclared_mapping_entries_ignored() {
    let evaporator = evaporator();
    let mapping = FieldMapping::new()
        .map("nickname", "nickname")
        .map("password_hash", "password_hash");

    let record = evaporator.to_record(&Account::sample(), &mapping).unwrap();
    assert_eq!(record.len(), 1);
    assert!(!record.contains("password_hash"));
}

#[test]
fn test_empty_values_omitted() {
    let evaporator = evaporator();
    let account = Account {
        note: String::new(),
        nickname: None,
        ..Account::sample()
    };

    let record = evaporator.to_record(&account, &account_mapping()).unwrap();
    assert!(!record.contains("note"));
    // A plain property keeps its null
    assert_eq!(record.get("nickname"), Some(&Value::Null));

    let restored: Account = evaporator.from_record(&record, &account_mapping()).unwrap();
    assert_eq!(restored, account);
}

#[test]
fn test_nil_uuid_omitted() {
    let evaporator = evaporator();
    let account = Account {
        id: uuid::Uuid::nil(),
        ..Account::sample()
    };

    let record = evaporator.to_record(&account, &account_mapping()).unwrap();
    assert!(!record.contains("id"));
}

#[test]
fn test_tampered_ciphertext_fails_whole_call() {
    let evaporator = evaporator();
    let mapping = account_mapping();
    let record = evaporator.to_record(&Account::sample(), &mapping).unwrap();

    let mut payload = Crypt::decode(&text(&record, "note")).unwrap();
    let last = payload.len() - 1;
    payload[last] ^= 0x01;
    let tampered = record.clone().with("note", Crypt::encode(&payload));

    let mut target = Account::default();
    let err = evaporator
        .from_record_into(&mut target, &tampered, &mapping)
        .unwrap_err();
    assert!(matches!(err, Error::Authentication { ref property, .. } if property == "note"));
    assert!(err.is_data());
    // Nothing was applied
    assert_eq!(target, Account::default());
}

#[test]
fn test_mistyped_value_fails_before_any_write() {
    let mirrored = evaporator();
    let mapping = account_mapping();
    let record = mirrored.to_record(&Account::sample(), &mapping).unwrap();

    // Declaration order leaves "status" as a name, which `set_value` would reject
    // after id and owner_email had already been applied
    let declaration = evaporator_with(EvaporatorConfig {
        reverse_chain: ChainOrder::Declaration,
        ..EvaporatorConfig::default()
    });
    let mut target = Account::default();
    let err = declaration
        .from_record_into(&mut target, &record, &mapping)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidValue { ref property, ref expected, ref found }
            if property == "status" && expected == "enum" && found == "string"
    ));
    assert_eq!(target, Account::default());
}

#[test]
fn test_associated_data_mismatch() {
    let evaporator = evaporator();
    let mapping = account_mapping();
    let record = evaporator.to_record(&Account::sample(), &mapping).unwrap();
    let moved = record.with("owner_email", "b@example.com");

    let err = evaporator.from_record::<Account>(&moved, &mapping).unwrap_err();
    assert!(matches!(err, Error::Authentication { ref property, .. } if property == "status"));
}

#[test]
fn test_missing_associated_data_field() {
    let evaporator = evaporator();
    let mapping = account_mapping();
    let record = evaporator.to_record(&Account::sample(), &mapping).unwrap();
    let partial: Record = record
        .iter()
        .filter(|(field, _)| *field != "owner_email")
        .map(|(field, value)| (field.to_string(), value.clone()))
        .collect();

    let err = evaporator.from_record::<Account>(&partial, &mapping).unwrap_err();
    assert!(matches!(err, Error::InvalidPath { ref segment, .. } if segment == "owner_email"));
}

#[test]
fn test_declaration_order_reverse_pass() {
    let mirrored = evaporator();
    let mapping = account_mapping();
    let record = mirrored.to_record(&Account::sample(), &mapping).unwrap();

    // Decrypting last hands the enum name, not a member, to the object
    let declaration = evaporator_with(EvaporatorConfig {
        reverse_chain: ChainOrder::Declaration,
        ..EvaporatorConfig::default()
    });
    let err = declaration.from_record::<Account>(&record, &mapping).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { ref property, .. } if property == "status"));
}

#[test]
fn test_unknown_enum_name_keeps_prior_value() {
    let evaporator = evaporator();
    let mapping = FieldMapping::identity(["priority"]);
    let record = Record::new().with("priority", "DOES_NOT_EXIST");

    let mut ticket = Ticket {
        priority: Priority::High,
    };
    evaporator
        .from_record_into(&mut ticket, &record, &mapping)
        .unwrap();
    assert_eq!(ticket.priority, Priority::High);

    let fresh: Ticket = evaporator.from_record(&record, &mapping).unwrap();
    assert_eq!(fresh, Ticket::default());
}

#[test]
fn test_unknown_enum_name_error_policy() {
    let evaporator = evaporator_with(EvaporatorConfig {
        unknown_enum: UnknownEnumPolicy::Error,
        ..EvaporatorConfig::default()
    });
    let record = Record::new().with("priority", "DOES_NOT_EXIST");

    let err = evaporator
        .from_record::<Ticket>(&record, &FieldMapping::identity(["priority"]))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEnumCase { ref enum_name, .. } if enum_name == "Priority"));
}

#[test]
fn test_enum_round_trip_stores_name() {
    let evaporator = evaporator();
    let mapping = FieldMapping::identity(["priority"]);
    let ticket = Ticket {
        priority: Priority::High,
    };

    let record = evaporator.to_record(&ticket, &mapping).unwrap();
    assert_eq!(record.get("priority"), Some(&Value::from("High")));
    assert_eq!(evaporator.from_record::<Ticket>(&record, &mapping).unwrap(), ticket);
}

#[test]
fn test_missing_secret() {
    init_tracing();
    let evaporator = Evaporator::with_defaults(Arc::new(MemorySecretStore::new()));

    let err = evaporator
        .to_record(&Account::sample(), &account_mapping())
        .unwrap_err();
    assert!(matches!(err, Error::SecretNotFound { .. }));
}

#[test]
fn test_unregistered_transformer() {
    init_tracing();
    let evaporator = Evaporator::new(evaporator_core::TransformerRegistry::new());

    let err = evaporator
        .to_record(&Ticket::default(), &FieldMapping::identity(["priority"]))
        .unwrap_err();
    assert!(matches!(err, Error::UnresolvableTransformer { ref tag, .. } if tag == "enum"));
    assert!(err.is_configuration());
}

#[test]
fn test_private_descriptor_cache() {
    let cache = Arc::new(DescriptorCache::new());
    let evaporator = evaporator().with_cache(Arc::clone(&cache));

    evaporator
        .to_record(&Account::sample(), &account_mapping())
        .unwrap();
    evaporator
        .to_record(&Ticket::default(), &FieldMapping::identity(["priority"]))
        .unwrap();
    evaporator
        .to_record(&Account::sample(), &account_mapping())
        .unwrap();

    assert_eq!(cache.len(), 2);
    assert_eq!(evaporator.descriptors::<Account>().len(), 5);
}

#[test]
fn test_path_getter_fallback() {
    let account = Account::sample();

    let email = PathResolver::resolve_object(&DotPath::parse("owner.email").unwrap(), &account);
    assert_eq!(email.unwrap(), Value::from("a@example.com"));

    let err = PathResolver::resolve_object(&DotPath::parse("owner.phone").unwrap(), &account)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPath { ref segment, .. } if segment == "phone"));

    let err = PathResolver::resolve_object(&DotPath::parse("note.length").unwrap(), &account)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPath { ref segment, .. } if segment == "note"));
}
