#![cfg(feature = "derive")]

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use sanitag::{
	Annotation, FieldDef, FieldRef, FieldValue, HandlerError, Record, Sanitize, SanitizeError,
	Sanitizer, SanitizerConfig, UnknownAnnotationPolicy,
};

#[derive(Sanitize)]
struct Profile {
	#[sanitag(len = "3..32", required)]
	name: String,
	#[sanitag(skip)]
	#[allow(dead_code)]
	cache: Vec<Profile>,
	#[sanitag(range = "0..150")]
	#[sanitag(required)]
	age: Option<u8>,
	#[sanitag(r#type = "tag")]
	tags: Vec<String>,
	address: Address,
}

#[derive(Sanitize)]
struct Address {
	#[sanitag(len = "1..64")]
	city: String,
	zip: Option<u32>,
}

#[derive(Sanitize)]
struct Pair(#[sanitag(len = "1")] String, i32);

#[derive(Sanitize)]
struct Wrapper<T> {
	#[sanitag(required)]
	inner: T,
}

#[derive(Sanitize)]
struct Borrowed<'a> {
	#[sanitag(len = "3")]
	code: &'a str,
}

#[derive(Sanitize)]
struct Node {
	#[sanitag(required)]
	label: String,
	next: Option<Box<Node>>,
}

type Log = Arc<Mutex<Vec<String>>>;

/// Registers handlers that log `annotation(argument) path-independent value` and accept.
fn logging_sanitizer(log: &Log, names: &[&'static str]) -> Sanitizer {
	let mut sanitizer = Sanitizer::new();
	for &name in names {
		let log = log.clone();
		sanitizer
			.register(name, move |argument: &str, value: &FieldValue<'_>| {
				log.lock()
					.unwrap()
					.push(format!("{name}({argument}) {value:?}"));
				Ok::<(), HandlerError>(())
			})
			.unwrap();
	}
	sanitizer
}

fn profile() -> Profile {
	Profile {
		name: "ada".to_string(),
		cache: Vec::new(),
		age: None,
		tags: vec!["x".to_string()],
		address: Address {
			city: "Moscow".to_string(),
			zip: Some(101000),
		},
	}
}

const PROFILE_NAME: &[Annotation] = &[
	Annotation::new("len", "3..32"),
	Annotation::new("required", ""),
];
const PROFILE_AGE: &[Annotation] = &[
	Annotation::new("range", "0..150"),
	Annotation::new("required", ""),
];
const PROFILE_TAGS: &[Annotation] = &[Annotation::new("type", "tag")];
const PROFILE_FIELDS: &[FieldDef] = &[
	FieldDef::new("name", PROFILE_NAME),
	FieldDef::new("age", PROFILE_AGE),
	FieldDef::new("tags", PROFILE_TAGS),
	FieldDef::new("address", &[]),
];

#[test]
fn derive_generates_schema() {
	let record = profile();
	let schema = record.schema();

	assert_eq!(schema.type_name, "Profile");
	assert_eq!(schema.fields, PROFILE_FIELDS);
	assert_eq!(schema.field("age").unwrap().annotation("range"), Some("0..150"));
	assert!(schema.field("cache").is_none());
}

#[test]
fn derive_accessor_follows_schema() {
	let record = profile();

	assert!(matches!(record.field(0), FieldRef::Leaf(FieldValue::Str("ada"))));
	assert!(matches!(record.field(1), FieldRef::Leaf(FieldValue::Null)));
	assert!(matches!(record.field(3), FieldRef::Record(_)));
	assert!(matches!(record.field(4), FieldRef::Absent));

	let nested: Vec<_> = (0..4).map(|index| record.is_nested(index)).collect();
	assert_eq!(nested, [false, false, false, true]);
}

#[test]
fn walk_visits_annotated_leaves_in_registration_order() {
	let log = Log::default();
	let sanitizer = logging_sanitizer(&log, &["required", "len", "range", "type"]);

	sanitizer.sanitize(&profile()).unwrap();
	assert_eq!(
		*log.lock().unwrap(),
		[
			"required() Str(\"ada\")",
			"len(3..32) Str(\"ada\")",
			"required() Null",
			"range(0..150) Null",
			"type(tag) Seq([Str(\"x\")])",
			"len(1..64) Str(\"Moscow\")",
		]
	);
}

#[test]
fn tuple_structs_use_positions() {
	let pair = Pair("a".to_string(), 2);
	let names: Vec<_> = pair.schema().fields.iter().map(|f| f.name).collect();
	assert_eq!(names, ["0", "1"]);

	let mut sanitizer = Sanitizer::new();
	sanitizer
		.register("len", |_: &str, _: &FieldValue<'_>| Err("too long".into()))
		.unwrap();
	let err = sanitizer.sanitize(&pair).unwrap_err();
	assert_eq!(err.path().unwrap().as_str(), "0");
}

#[test]
fn generic_fields_follow_their_type() {
	let log = Log::default();
	let sanitizer = logging_sanitizer(&log, &["required", "len"]);

	sanitizer
		.sanitize(&Wrapper {
			inner: "leaf".to_string(),
		})
		.unwrap();
	assert_eq!(*log.lock().unwrap(), ["required() Str(\"leaf\")"]);
}

#[test]
fn annotated_nested_record_is_refused() {
	let log = Log::default();
	let wrapped = Wrapper {
		inner: Address {
			city: "Kazan".to_string(),
			zip: None,
		},
	};

	let err = logging_sanitizer(&log, &["required", "len"])
		.sanitize(&wrapped)
		.unwrap_err();
	assert!(matches!(
		err,
		SanitizeError::InvalidRecord { ref path, ref reason } if path.as_str() == "inner" && reason.contains("`required`")
	));
	assert!(log.lock().unwrap().is_empty());

	let config =
		SanitizerConfig::default().with_unknown_annotations(UnknownAnnotationPolicy::Ignore);
	let mut lenient = Sanitizer::with_config(config);
	lenient
		.register("len", |_: &str, _: &FieldValue<'_>| Ok(()))
		.unwrap();
	lenient.sanitize(&wrapped).unwrap();
}

#[test]
fn borrowed_fields_are_walked() {
	let owned = String::from("RUS");
	let record = Borrowed { code: &owned };

	let mut sanitizer = Sanitizer::new();
	sanitizer
		.register("len", |argument: &str, value: &FieldValue<'_>| {
			let expected: usize = argument.parse()?;
			match value.as_str() {
				Some(text) if text.len() == expected => Ok(()),
				_ => Err("wrong length".into()),
			}
		})
		.unwrap();

	sanitizer.sanitize(&record).unwrap();
	assert!(sanitizer.sanitize(&Borrowed { code: "RU" }).is_err());
}

#[test]
fn empty_nested_reference_names_the_field() {
	let list = Node {
		label: "head".to_string(),
		next: Some(Box::new(Node {
			label: "tail".to_string(),
			next: None,
		})),
	};

	let log = Log::default();
	let err = logging_sanitizer(&log, &["required"])
		.sanitize(&list)
		.unwrap_err();
	assert!(matches!(
		err,
		SanitizeError::InvalidRecord { ref path, .. } if path.as_str() == "next.next"
	));
}

#[test]
fn unregistered_annotation_fails_derived_records() {
	let mut sanitizer = Sanitizer::new();
	sanitizer
		.register("len", |_: &str, _: &FieldValue<'_>| Ok(()))
		.unwrap();

	let err = sanitizer.sanitize(&profile()).unwrap_err();
	assert!(matches!(
		err,
		SanitizeError::UnknownAnnotation { ref name, ref path } if name == "required" && path.as_str() == "name"
	));
}

#[test]
fn built_sanitizer_is_shared_across_threads() {
	let mut sanitizer = Sanitizer::new();
	sanitizer
		.register("len", |argument: &str, value: &FieldValue<'_>| {
			let (min, max) = argument.split_once("..").ok_or("bad range")?;
			let len = value.as_str().map_or(0, str::len);
			if (min.parse::<usize>()?..max.parse::<usize>()?).contains(&len) {
				Ok(())
			} else {
				Err(format!("length {len} outside {argument}").into())
			}
		})
		.unwrap();
	let sanitizer = Arc::new(sanitizer);

	std::thread::scope(|scope| {
		for city in ["Omsk", "Tver", ""] {
			let sanitizer = sanitizer.clone();
			scope.spawn(move || {
				let address = Address {
					city: city.to_string(),
					zip: None,
				};
				assert_eq!(sanitizer.sanitize(&address).is_ok(), !city.is_empty());
			});
		}
	});
}
