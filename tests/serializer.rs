use std::sync::atomic::{AtomicU8, Ordering};

use wirebox::{instance_ref, Introspect, Property, TextSerializer, Value};

#[derive(Clone)]
struct Person {
    name: String,
    age: i32,
}

impl Introspect for Person {
    fn properties() -> Vec<Property> {
        vec![
            Property::readable::<String>("name", |instance| Ok(Value::Text(&instance_ref::<Person>(instance)?.name))),
            Property::readable::<i32>("age", |instance| Ok(Value::from(instance_ref::<Person>(instance)?.age))),
        ]
    }
}

#[test]
fn test_literals() {
    let serializer = TextSerializer::new();

    assert_eq!(serializer.to_text(Value::Null).unwrap(), "null");
    assert_eq!(serializer.to_text(true).unwrap(), "true");
    assert_eq!(serializer.to_text(3).unwrap(), "3");
    assert_eq!(serializer.to_text("ab").unwrap(), "\"ab\"");
    assert_eq!(serializer.to_text(1.5).unwrap(), "1.5");
}

#[test]
fn test_object_properties_in_descriptor_order() {
    let serializer = TextSerializer::new();
    let person = Person {
        name: "Bob".into(),
        age: 30,
    };

    assert_eq!(
        serializer.to_text(Value::Object(&person)).unwrap(),
        r#"{"name": "Bob", "age": 30}"#
    );
}

#[test]
fn test_referential_transparency() {
    let serializer = TextSerializer::new();
    let person = Person {
        name: "Ana".into(),
        age: 41,
    };

    let first = serializer.to_text(Value::Object(&person)).unwrap();
    let second = serializer.to_text(Value::Object(&person)).unwrap();
    assert_eq!(first, second);
}

struct Account {
    owner: Person,
    active: bool,
    nickname: Option<String>,
}

impl Introspect for Account {
    fn properties() -> Vec<Property> {
        vec![
            Property::readable::<Person>("owner", |instance| {
                Ok(Value::Object(&instance_ref::<Account>(instance)?.owner))
            }),
            Property::readable::<bool>("active", |instance| Ok(Value::from(instance_ref::<Account>(instance)?.active))),
            Property::readable::<Option<String>>("nickname", |instance| {
                Ok(Value::from(instance_ref::<Account>(instance)?.nickname.as_ref()))
            }),
        ]
    }
}

#[test]
fn test_nested_object_and_none_as_null() {
    let serializer = TextSerializer::new();
    let account = Account {
        owner: Person {
            name: "Bob".into(),
            age: 30,
        },
        active: true,
        nickname: None,
    };

    assert_eq!(
        serializer.to_text(Value::Object(&account)).unwrap(),
        r#"{"owner": {"name": "Bob", "age": 30}, "active": true, "nickname": null}"#
    );
}

struct Renamed {
    name: String,
}

impl Introspect for Renamed {
    fn properties() -> Vec<Property> {
        vec![
            Property::readable::<String>("name", |instance| Ok(Value::Text(&instance_ref::<Renamed>(instance)?.name)))
                .rename("n"),
        ]
    }
}

#[test]
fn test_rename_marker_overrides_property_name() {
    let serializer = TextSerializer::new();
    let renamed = Renamed { name: "Bob".into() };

    assert_eq!(serializer.to_text(Value::Object(&renamed)).unwrap(), r#"{"n": "Bob"}"#);
}

struct Opaque;

impl Introspect for Opaque {}

#[test]
fn test_object_without_readable_properties() {
    let serializer = TextSerializer::new();

    assert_eq!(serializer.to_text(Value::Object(&Opaque)).unwrap(), "{}");
}

struct Mixed {
    visible: i32,
    hidden: i32,
}

impl Introspect for Mixed {
    fn properties() -> Vec<Property> {
        vec![
            Property::readable::<i32>("visible", |instance| Ok(Value::from(instance_ref::<Mixed>(instance)?.visible))),
            // Write-only, skipped by the serializer.
            Property::writable::<i32>("hidden", |_, _| Ok(())),
        ]
    }
}

#[test]
fn test_write_only_properties_are_skipped() {
    let serializer = TextSerializer::new();
    let mixed = Mixed { visible: 1, hidden: 2 };

    let _ = mixed.hidden;
    assert_eq!(serializer.to_text(Value::Object(&mixed)).unwrap(), r#"{"visible": 1}"#);
}

struct Counted {
    value: i32,
}

static COUNTED_DESCRIPTOR_WALKS: AtomicU8 = AtomicU8::new(0);

impl Introspect for Counted {
    fn properties() -> Vec<Property> {
        COUNTED_DESCRIPTOR_WALKS.fetch_add(1, Ordering::SeqCst);
        vec![Property::readable::<i32>("value", |instance| {
            Ok(Value::from(instance_ref::<Counted>(instance)?.value))
        })]
    }
}

#[test]
fn test_descriptors_memoized_per_type() {
    let serializer = TextSerializer::new();

    for value in 0..3 {
        let counted = Counted { value };
        let _ = serializer.to_text(Value::Object(&counted)).unwrap();
    }

    assert_eq!(COUNTED_DESCRIPTOR_WALKS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_text_is_not_escaped() {
    let serializer = TextSerializer::new();

    assert_eq!(serializer.to_text("a\"b").unwrap(), "\"a\"b\"");
}
