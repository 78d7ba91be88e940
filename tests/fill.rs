use dragon_fill::fill::ResultNode;
use dragon_fill::{
    EnvSource, FieldDescriptor, FieldType, FillError, Filler, FnSource, MapSource,
    PropertiesSource, RawValue, Record, Resource, Schema, Shape, SourceConfig, TomlSource,
    TypeDescriptor, Value,
};
use indoc::indoc;
use serde::Deserialize;

#[derive(Debug, PartialEq, Deserialize)]
struct Person {
    name: String,
    age: i64,
    nickname: Option<String>,
}

impl Schema for Person {
    fn name() -> &'static str {
        "Person"
    }

    fn shape() -> Shape {
        Shape::Structured(
            Record::new("Person")
                .field(FieldDescriptor::new("name", FieldType::STRING))
                .field(FieldDescriptor::new("age", FieldType::INTEGER))
                .field(FieldDescriptor::new("nickname", FieldType::STRING).nullable()),
        )
    }
}

#[derive(Debug, PartialEq, Deserialize)]
struct AppConfig {
    name: String,
    debug: bool,
    ratio: f64,
    database: Database,
}

#[derive(Debug, PartialEq, Deserialize)]
struct Database {
    host: String,
    port: u16,
}

fn database_record() -> Record {
    Record::new("Database")
        .field(FieldDescriptor::new("host", FieldType::STRING).with_default("localhost"))
        .field(FieldDescriptor::new("port", FieldType::INTEGER).with_default(5432))
}

impl Schema for AppConfig {
    fn name() -> &'static str {
        "AppConfig"
    }

    fn shape() -> Shape {
        Shape::Structured(
            Record::new("AppConfig")
                .field(FieldDescriptor::new("name", FieldType::STRING).with_default("app"))
                .field(FieldDescriptor::new("debug", FieldType::BOOLEAN).with_default(false))
                .field(FieldDescriptor::new("ratio", FieldType::FLOAT).with_default(0.5))
                .field(FieldDescriptor::new("database", FieldType::Record(database_record))),
        )
    }
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Server {
    host: String,
    port: i64,
}

impl Schema for Server {
    fn name() -> &'static str {
        "Server"
    }

    fn shape() -> Shape {
        Shape::Structured(
            Record::new("Server")
                .field(FieldDescriptor::new("host", FieldType::STRING))
                .field(FieldDescriptor::new("port", FieldType::INTEGER)),
        )
    }
}

fn properties(args: &[&str]) -> Filler {
    Filler::new(SourceConfig::properties())
        .with_source(PropertiesSource::from_args(args.iter().copied()).unwrap())
}

fn unresolved_paths(err: FillError) -> Vec<String> {
    match err {
        FillError::Unresolved(report) => report.paths(),
        other => panic!("expected unresolved fields, got {other}"),
    }
}

#[test]
fn fills_person_with_nullable_nickname() {
    let person: Person = properties(&["-Pname=Ann", "-Page=30"]).fill().unwrap();

    assert_eq!(
        person,
        Person {
            name: "Ann".into(),
            age: 30,
            nickname: None,
        }
    );
}

#[test]
fn supplied_value_overrides_nullable() {
    let person: Person = properties(&["-Pname=Ann", "-Page=30", "-Pnickname=Annie"])
        .fill()
        .unwrap();

    assert_eq!(person.nickname.as_deref(), Some("Annie"));
}

#[test]
fn all_defaults_with_empty_source() {
    let config: AppConfig = Filler::new(SourceConfig::env()).fill().unwrap();

    assert_eq!(
        config,
        AppConfig {
            name: "app".into(),
            debug: false,
            ratio: 0.5,
            database: Database {
                host: "localhost".into(),
                port: 5432,
            },
        }
    );
}

#[test]
fn env_source_fills_nested_record() {
    let filler = Filler::new(SourceConfig::env()).with_source(EnvSource::from_vars([
        ("DEBUG", "TRUE"),
        ("DATABASE_PORT", "6543"),
        ("ratio", "0.25"),
    ]));
    let config: AppConfig = filler.fill().unwrap();

    assert!(config.debug);
    assert_eq!(config.ratio, 0.25);
    assert_eq!(config.database.port, 6543);
    assert_eq!(config.database.host, "localhost");
}

#[test]
fn missing_required_field_names_path_and_key() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Port {
        port: i64,
    }

    impl Schema for Port {
        fn name() -> &'static str {
            "Port"
        }

        fn shape() -> Shape {
            Shape::Structured(
                Record::new("Port").field(FieldDescriptor::new("port", FieldType::INTEGER)),
            )
        }
    }

    let err = properties(&[]).fill::<Port>().unwrap_err();
    let message = err.to_string();

    assert!(message.contains("'port'"));
    assert!(message.contains("-Pport=<value>"));
    assert_eq!(unresolved_paths(err), vec!["port"]);
}

#[test]
fn reports_every_failing_field_aligned() {
    let err = properties(&["-Pport=eighty"]).fill::<Server>().unwrap_err();

    assert_eq!(
        err.to_string(),
        indoc! {"
            could not fill 'Server':
              'host': value not supplied; pass it as -Phost=<value>
              'port': cannot read prop:port as integer: 'eighty' is not a valid integer"}
    );
}

#[test]
fn nested_failures_use_dotted_paths() {
    fn credentials() -> Record {
        Record::new("Credentials")
            .field(FieldDescriptor::new("user", FieldType::STRING))
            .field(FieldDescriptor::new("password", FieldType::STRING))
    }

    let record = Record::new("Service")
        .field(FieldDescriptor::new("port", FieldType::INTEGER))
        .field(FieldDescriptor::new("credentials", FieldType::Record(credentials)));

    let err = properties(&["-Pcredentials.user=admin"])
        .fill_record(&record)
        .unwrap_err();
    let message = err.to_string();

    assert_eq!(unresolved_paths(err), vec!["port", "credentials.password"]);
    assert!(message.contains("\n  'port'                : value not supplied"));
    assert!(message.contains("\n  'credentials.password': value not supplied"));
}

#[test]
fn nullable_nested_record_reports_missing_fields() {
    fn database() -> Record {
        Record::new("Database")
            .field(FieldDescriptor::new("host", FieldType::STRING))
            .field(FieldDescriptor::new("port", FieldType::INTEGER))
    }

    let record = Record::new("App")
        .field(FieldDescriptor::new("database", FieldType::Record(database)).nullable());
    let filler = properties(&["-Pdatabase.host=db.internal"]);

    let tree = filler.fill_tree(&Shape::Structured(record.clone()));
    let ResultNode::Record(fields) = &tree else {
        panic!("expected record");
    };
    let ResultNode::Record(database) = &fields["database"] else {
        panic!("expected nested record, got {:?}", fields["database"]);
    };
    assert_eq!(database["host"], ResultNode::Value(Value::from("db.internal")));

    let err = filler.fill_record(&record).unwrap_err();
    assert_eq!(unresolved_paths(err), vec!["database.port"]);
}

#[test]
fn open_target_empty_string_passes_through() {
    let filler = Filler::new(SourceConfig::properties())
        .with_source(MapSource::new().with_text("prop:", ""));

    let value = filler.fill_open("Tags", &Value::empty_record()).unwrap();
    assert_eq!(value, Value::from(""));
}

#[test]
fn fill_is_idempotent() {
    let filler = properties(&["-Pname=Ann", "-Page=30"]);
    let shape = Person::shape();

    assert_eq!(filler.fill_tree(&shape), filler.fill_tree(&shape));
    assert_eq!(
        filler.fill_shape("Person", &shape).unwrap(),
        filler.fill_shape("Person", &shape).unwrap()
    );
}

#[test]
fn later_sources_override_earlier_ones() {
    let defaults: toml::Table = toml::from_str(indoc! {r#"
        name = "Bob"
        age = 41
    "#})
    .unwrap();
    let filler = Filler::new(SourceConfig::properties())
        .with_source(TomlSource::new(defaults, "."))
        .with_source(PropertiesSource::new().with("name", "Ann"));
    let person: Person = filler.fill().unwrap();

    assert_eq!(person.name, "Ann");
    assert_eq!(person.age, 41);
}

#[test]
fn open_target_array_literal() {
    let filler = Filler::new(SourceConfig::properties())
        .with_source(MapSource::new().with_text("prop:", "{a, b, c}"));

    let value = filler.fill_open("Tags", &Value::empty_record()).unwrap();
    assert_eq!(value, Value::from(vec!["a", "b", "c"]));
}

#[test]
fn open_target_plain_string_passes_through() {
    let filler = Filler::new(SourceConfig::properties())
        .with_source(MapSource::new().with_text("prop:", "a, b, c"));

    let value = filler.fill_open("Tags", &Value::empty_record()).unwrap();
    assert_eq!(value, Value::from("a, b, c"));
}

#[test]
fn open_target_with_default_shape() {
    let default: Value = [
        ("retries", Value::Integer(3)),
        ("labels", Value::from(Vec::<Value>::new())),
        (
            "limits",
            [("cpu", Value::Float(1.0)), ("memory", Value::from("1G"))]
                .into_iter()
                .collect(),
        ),
    ]
    .into_iter()
    .collect();

    let filler = properties(&["-Pretries=5", "-Plabels={x, y}", "-Plimits.cpu=2.5"]);
    let value = filler.fill_open("Job", &default).unwrap();

    let expected: Value = [
        ("retries", Value::Integer(5)),
        ("labels", Value::from(vec!["x", "y"])),
        (
            "limits",
            [("cpu", Value::Float(2.5)), ("memory", Value::from("1G"))]
                .into_iter()
                .collect(),
        ),
    ]
    .into_iter()
    .collect();
    assert_eq!(value, expected);
}

#[test]
fn open_target_null_entry_is_reported() {
    let default: Value = [("mystery", Value::Null)].into_iter().collect();
    let err = properties(&["-Pmystery=1"])
        .fill_open("Loose", &default)
        .unwrap_err();

    assert!(err.to_string().contains("ambiguous type"));
    assert_eq!(unresolved_paths(err), vec!["mystery"]);
}

#[test]
fn https_source_with_resource_handles() {
    #[derive(Debug, Deserialize)]
    struct Remote {
        port: i64,
        cert: Resource,
    }

    impl Schema for Remote {
        fn name() -> &'static str {
            "Remote"
        }

        fn shape() -> Shape {
            fn endpoint() -> Record {
                Record::new("Endpoint")
                    .field(FieldDescriptor::new("port", FieldType::INTEGER))
                    .field(FieldDescriptor::new("cert", FieldType::RESOURCE))
            }
            Shape::Structured(endpoint())
        }
    }

    let cert = Resource::new("https://cert", "-----BEGIN CERTIFICATE-----");
    let filler = Filler::new(SourceConfig::https())
        .with_source(FnSource::new(|locator: &str| match locator {
            "https://port" => RawValue::text("443"),
            _ => RawValue::Absent,
        }))
        .with_source(MapSource::new().with_resource(cert.clone()));

    let remote: Remote = filler.fill().unwrap();
    assert_eq!(remote.port, 443);
    assert_eq!(remote.cert, cert);
}

#[test]
fn custom_coercion_and_skipped_fields() {
    #[derive(Debug, Deserialize)]
    struct Timeouts {
        connect_ms: i64,
    }

    impl Schema for Timeouts {
        fn name() -> &'static str {
            "Timeouts"
        }

        fn shape() -> Shape {
            Shape::Structured(
                Record::new("Timeouts")
                    .field(FieldDescriptor::new(
                        "connect_ms",
                        FieldType::Scalar(TypeDescriptor::Custom("duration")),
                    ))
                    .field(FieldDescriptor::new("on_timeout", FieldType::Unsupported("fn()"))),
            )
        }
    }

    let filler = properties(&["-Pconnect_ms=2s"]).with_coercion(
        TypeDescriptor::Custom("duration"),
        |raw| {
            let text = raw.as_text();
            let seconds = text
                .strip_suffix('s')
                .ok_or_else(|| format!("'{text}' has no unit"))?;
            seconds
                .parse::<i64>()
                .map(|s| Value::Integer(s * 1000))
                .map_err(|e| e.to_string())
        },
    );

    let timeouts: Timeouts = filler.fill().unwrap();
    assert_eq!(timeouts.connect_ms, 2000);
}

#[test]
fn unresolved_tree_keeps_failures_as_values() {
    let tree = properties(&["-Pname=Ann"]).fill_tree(&Person::shape());

    let ResultNode::Record(fields) = &tree else {
        panic!("expected record");
    };
    assert_eq!(fields["name"], ResultNode::Value(Value::from("Ann")));
    assert!(matches!(fields["age"], ResultNode::Failure(_)));
    assert_eq!(fields["nickname"], ResultNode::Value(Value::Null));
}

#[test]
fn invalid_scheme_is_rejected() {
    let err = SourceConfig::new("not a scheme", ".").unwrap_err();
    assert!(matches!(err, FillError::InvalidScheme(_)));
}
