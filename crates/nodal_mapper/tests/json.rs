use std::collections::BTreeMap;

use chrono::NaiveTime;
use nodal_mapper::convert::ValueContext;
use nodal_mapper::naming::Case;
use nodal_mapper::node::{JsonNode, NodeKind};
use nodal_mapper::{ErrorKind, Format, Mapper, Options};
use nodal_model::Reflect;
use nodal_model::impls::{UntypedDictionary, UntypedList};

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
#[allow(non_snake_case)]
struct Pair {
    Value1: i32,
    Value2: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
#[allow(non_snake_case)]
struct Item {
    Property: String,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Alarm {
    label: String,
    time: NaiveTime,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Reading {
    sensor: String,
    value: f64,
    calibrated: Option<bool>,
    tags: Vec<String>,
    limits: BTreeMap<String, i64>,
    history: Vec<Option<u8>>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Measure {
    amount: i32,
    note: Option<String>,
}

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Legacy {
    values: UntypedList,
}

fn mapper() -> Mapper {
    Mapper::new()
}

// -----------------------------------------------------------------------------
// Scenarios

#[test]
fn two_integer_members() {
    let options = Options::default();
    let pair: Pair = mapper().from_json_str(r#"{"Value1": 1, "Value2": 2}"#, &options).unwrap();
    assert_eq!(pair, Pair { Value1: 1, Value2: 2 });

    let node = mapper().serialize(&pair, Format::Json, &options).unwrap();
    assert_eq!(node.kind(), NodeKind::Object);
    let fields: Vec<(String, Option<String>)> = node
        .children()
        .map(|child| (child.name().to_owned(), child.value().map(str::to_owned)))
        .collect();
    assert_eq!(
        fields,
        [
            ("Value1".to_owned(), Some("1".to_owned())),
            ("Value2".to_owned(), Some("2".to_owned())),
        ]
    );
}

#[test]
fn root_list_of_objects() {
    let items: Vec<Item> = mapper()
        .from_json_str(r#"[ {"Property":"hai"} ]"#, &Options::default())
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].Property, "hai");
}

#[test]
fn custom_time_reader() {
    let options = Options::builder()
        .with_reader(|text: &str, _: &ValueContext<'_>| NaiveTime::parse_from_str(text, "%H-%M"))
        .friendly_parse_message::<NaiveTime>("'{value}' is not a time like 11-59.")
        .build();

    let alarm: Alarm = mapper()
        .from_json_str(r#"{"label": "wake", "time": "11-59"}"#, &options)
        .unwrap();
    assert_eq!(alarm.time, NaiveTime::from_hms_opt(11, 59, 0).unwrap());

    let err = mapper()
        .from_json_str::<Alarm>(r#"{"label": "wake", "time": "eleven"}"#, &options)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueParse);
    assert!(err.message().contains("eleven"));
    assert_eq!(err.friendly_message(), "'eleven' is not a time like 11-59.");
    assert_eq!(err.member(), Some("Alarm.time"));
    assert_eq!(err.path(), Some("$.time"));
    assert!(std::error::Error::source(&err).is_some());
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn round_trip() {
    let reading = Reading {
        sensor: "t-1".into(),
        value: 21.5,
        calibrated: Some(true),
        tags: vec!["indoor".into(), "north".into()],
        limits: BTreeMap::from([("max".to_owned(), 40), ("min".to_owned(), -5)]),
        history: vec![Some(3), None, Some(7)],
    };
    let options = Options::default();

    let text = mapper().to_json_string(&reading, &options).unwrap();
    assert_eq!(
        text,
        r#"{"sensor":"t-1","value":21.5,"calibrated":true,"tags":["indoor","north"],"limits":{"max":40,"min":-5},"history":[3,null,7]}"#
    );

    let back: Reading = mapper().from_json_str(&text, &options).unwrap();
    assert_eq!(back, reading);
}

#[test]
fn round_trip_with_naming() {
    let options = Options::builder().member_case(Case::Pascal).build();
    let measure = Measure {
        amount: 3,
        note: Some("ok".into()),
    };

    let text = mapper().to_json_string(&measure, &options).unwrap();
    assert_eq!(text, r#"{"Amount":3,"Note":"ok"}"#);
    assert_eq!(mapper().from_json_str::<Measure>(&text, &options).unwrap(), measure);
}

#[test]
fn pretty_print() {
    let options = Options::builder().pretty_print(true).build();
    let text = mapper()
        .to_json_string(&Measure { amount: 1, note: None }, &options)
        .unwrap();
    assert_eq!(text, "{\n  \"amount\": 1,\n  \"note\": null\n}");
}

#[test]
fn other_serde_codecs_produce_nodes() {
    let node: JsonNode = ron::from_str(r#"{"amount": 4, "note": "ron"}"#).unwrap();
    let measure: Measure = mapper().deserialize(&node, &Options::default()).unwrap();
    assert_eq!(
        measure,
        Measure {
            amount: 4,
            note: Some("ron".into())
        }
    );
}

// -----------------------------------------------------------------------------
// Unmatched policies

#[test]
fn unmatched_nodes() {
    let input = r#"{"Value1": 1, "Extra": true, "Value2": 2}"#;

    let pair: Pair = mapper().from_json_str(input, &Options::default()).unwrap();
    assert_eq!(pair, Pair { Value1: 1, Value2: 2 });

    let strict = Options::builder().fail_on_unmatched_elements(true).build();
    let err = mapper().from_json_str::<Pair>(input, &strict).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnmatchedNode);
    assert_eq!(err.path(), Some("$.Extra"));
}

#[test]
fn unmatched_members() {
    let input = r#"{"Value1": 1}"#;

    let pair: Pair = mapper().from_json_str(input, &Options::default()).unwrap();
    assert_eq!(pair, Pair { Value1: 1, Value2: 0 });

    let strict = Options::builder().fail_on_unmatched_members(true).build();
    let err = mapper().from_json_str::<Pair>(input, &strict).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnmatchedMember);
    assert_eq!(err.member(), Some("Pair.Value2"));
}

#[test]
fn ignore_case() {
    let input = r#"{"value1": 5, "VALUE2": 6}"#;

    let pair: Pair = mapper().from_json_str(input, &Options::default()).unwrap();
    assert_eq!(pair, Pair::default());

    let options = Options::builder().ignore_case(true).build();
    let pair: Pair = mapper().from_json_str(input, &options).unwrap();
    assert_eq!(pair, Pair { Value1: 5, Value2: 6 });
}

// -----------------------------------------------------------------------------
// Nulls

#[test]
fn null_into_value_types() {
    let err = mapper()
        .from_json_str::<Measure>(r#"{"amount": null}"#, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueCannotBeNull);
    assert_eq!(err.member(), Some("Measure.amount"));

    let measure: Measure = mapper()
        .from_json_str(r#"{"amount": 2, "note": null}"#, &Options::default())
        .unwrap();
    assert_eq!(measure.note, None);

    let lenient = Options::builder().default_non_nullable_when_empty(true).build();
    let measure: Measure = mapper().from_json_str(r#"{"amount": null}"#, &lenient).unwrap();
    assert_eq!(measure.amount, 0);
}

#[test]
fn empty_text() {
    let options = Options::default();

    let measure: Measure = mapper()
        .from_json_str(r#"{"amount": 1, "note": ""}"#, &options)
        .unwrap();
    assert_eq!(measure.note.as_deref(), Some(""));

    let err = mapper()
        .from_json_str::<Measure>(r#"{"amount": ""}"#, &options)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueCannotBeNull);

    let reading: Reading = mapper()
        .from_json_str(r#"{"sensor": "s", "calibrated": ""}"#, &options)
        .unwrap();
    assert_eq!(reading.calibrated, None);
}

#[test]
fn exclude_null_values() {
    let options = Options::builder().exclude_null_values(true).build();
    let text = mapper()
        .to_json_string(&Measure { amount: 1, note: None }, &options)
        .unwrap();
    assert_eq!(text, r#"{"amount":1}"#);
}

// -----------------------------------------------------------------------------
// Rejections

#[test]
fn untyped_collections_are_rejected() {
    let options = Options::default();

    let err = mapper()
        .from_json_str::<Legacy>(r#"{"values": [1, 2]}"#, &options)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeNotSupported);

    let err = mapper()
        .serialize(&Legacy::default(), Format::Json, &options)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeNotSupported);

    let err = mapper()
        .from_json_str::<UntypedDictionary>("{}", &options)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeNotSupported);
}

#[test]
fn roots_must_be_containers() {
    let options = Options::default();

    let err = mapper().from_json_str::<i32>("1", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeNotSupported);

    let err = mapper().serialize(&None::<Pair>, Format::Json, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueCannotBeNull);

    let text = mapper().to_json_string(&Some(Pair::default()), &options).unwrap();
    assert_eq!(text, r#"{"Value1":0,"Value2":0}"#);
}

#[test]
fn shape_mismatch() {
    let err = mapper()
        .from_json_str::<Reading>(r#"{"tags": "indoor"}"#, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NodeTypeMismatch);
    assert_eq!(err.path(), Some("$.tags"));
}

#[test]
fn malformed_text() {
    let err = mapper()
        .from_json_str::<Pair>(r#"{"Value1": "#, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceParse);
}

#[test]
fn errors_point_at_array_items() {
    let err = mapper()
        .from_json_str::<Reading>(r#"{"history": [1, "x"]}"#, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueParse);
    assert_eq!(err.path(), Some("$.history[1]"));
    assert_eq!(err.member(), Some("Reading.history"));
}
