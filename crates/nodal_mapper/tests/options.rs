use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use nodal_mapper::convert::ValueContext;
use nodal_mapper::node::NodeKind;
use nodal_mapper::{ErrorKind, Format, Mapper, Mode, Options};
use nodal_model::info::ValueKind;
use nodal_model::{FromParent, Reflect};

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Note {
    title: String,
    body: Option<String>,
    stars: u32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Order {
    id: u32,
    line: Line,
}

#[derive(Reflect, Debug, PartialEq)]
#[reflect(default, parent = Order)]
struct Line {
    #[reflect(ignore)]
    order_id: u32,
    quantity: u32,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            order_id: 0,
            quantity: 1,
        }
    }
}

impl FromParent<Order> for Line {
    fn from_parent(parent: &Order) -> Self {
        Self {
            order_id: parent.id,
            ..Self::default()
        }
    }
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Basket {
    owner: String,
    #[reflect(items)]
    fruits: Vec<String>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Account {
    name: String,
    #[reflect(read_only)]
    created: u32,
    #[reflect(write_only)]
    password: String,
    #[reflect(ignore)]
    session: u64,
    #[reflect(skip)]
    cache: Vec<u8>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Trip {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Index {
    pages: BTreeMap<u32, String>,
}

#[derive(Reflect, Debug)]
struct Sealed {
    code: u32,
}

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Holder {
    sealed: Option<Sealed>,
}

fn mapper() -> Mapper {
    Mapper::new()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// -----------------------------------------------------------------------------
// Visitors

#[test]
fn typed_visitor_mutates_values() {
    let options = Options::builder()
        .on_deserialized_for::<Note, _>(|_, note, _| note.stars *= 10)
        .build();
    let note: Note = mapper()
        .from_json_str(r#"{"title": "a", "stars": 3}"#, &options)
        .unwrap();
    assert_eq!(note.stars, 30);
}

#[test]
fn visitors_run_in_registration_order() {
    let options = Options::builder()
        .on_deserialized_for::<String, _>(|_, text, _| text.push('a'))
        .on_deserialized_for::<String, _>(|_, text, _| text.push('b'))
        .build();
    let note: Note = mapper().from_json_str(r#"{"title": "x"}"#, &options).unwrap();
    assert_eq!(note.title, "xab");
}

#[test]
fn visitor_predicates_see_the_member() {
    let options = Options::builder()
        .on_deserialized_when(
            |_, _, cx| cx.member().is_some_and(|member| member.name() == "body"),
            |_, value, _| {
                if let Some(text) = value.downcast_mut::<String>() {
                    *text = text.to_uppercase();
                }
            },
        )
        .build();
    let note: Note = mapper()
        .from_json_str(r#"{"title": "keep", "body": "shout"}"#, &options)
        .unwrap();
    assert_eq!(note.title, "keep");
    assert_eq!(note.body.as_deref(), Some("SHOUT"));
}

#[test]
fn serialize_visitors_are_format_scoped() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    let options = Options::builder()
        .on_serialized_in(Format::Xml, move |_, _, cx| {
            assert_eq!(cx.mode(), Mode::Serialize);
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .on_serialized_for::<u32, _>(|stars, node, _| {
            node.set_value(Some(format!("{stars}*")), ValueKind::String);
        })
        .build();
    let note = Note {
        title: "t".into(),
        body: None,
        stars: 4,
    };

    let root = mapper().serialize(&note, Format::Json, &options).unwrap();
    assert_eq!(seen.load(Ordering::Relaxed), 0);
    let stars = root.children().find(|child| child.name() == "stars").unwrap();
    assert_eq!(stars.value(), Some("4*"));

    mapper().serialize(&note, Format::Xml, &options).unwrap();
    // title, body, stars and the root.
    assert_eq!(seen.load(Ordering::Relaxed), 4);
}

#[test]
fn typed_visitors_can_be_format_scoped() {
    let options = Options::builder()
        .on_deserialized_for_in::<u32, _>(Format::Xml, |_, stars, _| *stars += 100)
        .on_serialized_for_in::<u32, _>(Format::Json, |stars, node, _| {
            node.set_value(Some(format!("{stars}*")), ValueKind::String);
        })
        .build();
    let note = Note {
        title: "t".into(),
        body: Some("b".into()),
        stars: 4,
    };

    let json = mapper().serialize(&note, Format::Json, &options).unwrap();
    let stars = json.children().find(|child| child.name() == "stars").unwrap();
    assert_eq!(stars.value(), Some("4*"));

    let xml = mapper().serialize(&note, Format::Xml, &options).unwrap();
    let stars = xml.children().find(|child| child.name() == "stars").unwrap();
    assert_eq!(stars.value(), Some("4"));

    let back: Note = mapper().deserialize(&*xml, &options).unwrap();
    assert_eq!(back.stars, 104);
    let back: Note = mapper()
        .from_json_str(r#"{"title": "t", "stars": 4}"#, &options)
        .unwrap();
    assert_eq!(back.stars, 4);
}

// -----------------------------------------------------------------------------
// Construction

#[test]
fn parent_constructor() {
    let order: Order = mapper()
        .from_json_str(r#"{"id": 5, "line": {"quantity": 3}}"#, &Options::default())
        .unwrap();
    assert_eq!(
        order.line,
        Line {
            order_id: 5,
            quantity: 3,
        }
    );
}

#[test]
fn factory_wins_over_constructors() {
    let options = Options::builder()
        .with_factory::<Line, _>(|parent| {
            let order = parent?.downcast_ref::<Order>()?;
            Some(Line {
                order_id: order.id + 100,
                quantity: 0,
            })
        })
        .build();
    let order: Order = mapper()
        .from_json_str(r#"{"id": 1, "line": {}}"#, &options)
        .unwrap();
    assert_eq!(order.line.order_id, 101);
    assert_eq!(order.line.quantity, 0);

    let refusing = Options::builder().with_factory::<Line, _>(|_| None).build();
    let err = mapper()
        .from_json_str::<Order>(r#"{"id": 1, "line": {}}"#, &refusing)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ObjectCreation);
    assert_eq!(err.member(), Some("Order.line"));
}

#[test]
fn missing_constructor() {
    let holder: Holder = mapper()
        .from_json_str(r#"{"sealed": null}"#, &Options::default())
        .unwrap();
    assert!(holder.sealed.is_none());

    let err = mapper()
        .from_json_str::<Holder>(r#"{"sealed": {"code": 1}}"#, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ObjectCreation);
    assert_eq!(err.path(), Some("$.sealed"));
}

// -----------------------------------------------------------------------------
// Shapes

#[test]
fn collections_with_members() {
    let basket = Basket {
        owner: "ann".into(),
        fruits: vec!["fig".into(), "kiwi".into()],
    };

    let text = mapper().to_json_string(&basket, &Options::default()).unwrap();
    assert_eq!(text, r#"["fig","kiwi"]"#);

    let as_object = Options::builder()
        .treat_as_object(|ty| ty.ty().is::<Basket>())
        .build();
    let text = mapper().to_json_string(&basket, &as_object).unwrap();
    assert_eq!(text, r#"{"owner":"ann"}"#);

    let back: Basket = mapper().from_json_str(&text, &as_object).unwrap();
    assert_eq!(back.owner, "ann");
    assert!(back.fruits.is_empty());
}

#[test]
fn dictionary_keys_are_simple_values() {
    let index = Index {
        pages: BTreeMap::from([(1, "intro".to_owned()), (20, "end".to_owned())]),
    };
    let text = mapper().to_json_string(&index, &Options::default()).unwrap();
    assert_eq!(text, r#"{"pages":{"1":"intro","20":"end"}}"#);
    assert_eq!(mapper().from_json_str::<Index>(&text, &Options::default()).unwrap(), index);

    let err = mapper()
        .from_json_str::<Index>(r#"{"pages": {"one": "intro"}}"#, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueParse);
    assert_eq!(err.path(), Some("$.pages.one"));
}

// -----------------------------------------------------------------------------
// Members

#[test]
fn member_access() {
    let account = Account {
        name: "ann".into(),
        created: 7,
        password: "secret".into(),
        session: 9,
        cache: vec![1],
    };
    let text = mapper().to_json_string(&account, &Options::default()).unwrap();
    assert_eq!(text, r#"{"name":"ann","created":7}"#);

    let input = r#"{"name": "bo", "created": 8, "password": "pw", "session": 3}"#;
    let account: Account = mapper().from_json_str(input, &Options::default()).unwrap();
    assert_eq!(
        account,
        Account {
            name: "bo".into(),
            created: 0,
            password: "pw".into(),
            session: 0,
            cache: Vec::new(),
        }
    );
}

#[test]
fn member_filters() {
    let note = Note {
        title: "t".into(),
        body: Some("b".into()),
        stars: 2,
    };

    let no_stars = Options::builder()
        .exclude_members(|member, _| member.name() == "stars")
        .build();
    let text = mapper().to_json_string(&note, &no_stars).unwrap();
    assert_eq!(text, r#"{"title":"t","body":"b"}"#);

    let only_numbers = Options::builder()
        .include_types(|ty| ty.ty().is::<u32>())
        .build();
    let text = mapper().to_json_string(&note, &only_numbers).unwrap();
    assert_eq!(text, r#"{"stars":2}"#);

    let no_strings = Options::builder()
        .exclude_types(|ty| ty.ty().is::<String>())
        .build();
    let back: Note = mapper()
        .from_json_str(r#"{"title": "t", "stars": 1}"#, &no_strings)
        .unwrap();
    assert_eq!(back.title, "");
    assert_eq!(back.stars, 1);

    let strict = Options::builder()
        .include_members(|member, _| member.name() == "title")
        .fail_on_unmatched_members(true)
        .build();
    let back: Note = mapper().from_json_str(r#"{"title": "t"}"#, &strict).unwrap();
    assert_eq!(back.title, "t");
}

// -----------------------------------------------------------------------------
// Converters

#[test]
fn nullable_converters() {
    let options = Options::builder()
        .with_nullable_reader(|text: &str, _: &ValueContext<'_>| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .with_nullable_writer(|value: &NaiveDate, _: &ValueContext<'_>| value.format("%d/%m/%Y").to_string())
        .build();

    let trip: Trip = mapper()
        .from_json_str(r#"{"start": "02/03/2024", "end": ""}"#, &options)
        .unwrap();
    assert_eq!(trip.start, date(2024, 3, 2));
    assert_eq!(trip.end, None);

    let trip: Trip = mapper()
        .from_json_str(r#"{"start": "02/03/2024", "end": "09/03/2024"}"#, &options)
        .unwrap();
    assert_eq!(trip.end, Some(date(2024, 3, 9)));

    let text = mapper()
        .to_json_string(
            &Trip {
                start: date(2024, 1, 5),
                end: None,
            },
            &options,
        )
        .unwrap();
    assert_eq!(text, r#"{"start":"05/01/2024","end":null}"#);
}

#[test]
fn nullable_readers_see_untrimmed_text() {
    let options = Options::builder()
        .with_nullable_reader(|text: &str, _: &ValueContext<'_>| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .build();

    let err = mapper()
        .from_json_str::<Trip>(r#"{"start": "02/03/2024", "end": "  "}"#, &options)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueParse);
    assert_eq!(err.path(), Some("$.end"));
}

// -----------------------------------------------------------------------------
// Root name

#[test]
fn root_name_override() {
    let options = Options::builder().root_name("memo").build();
    let root = mapper().serialize(&Note::default(), Format::Xml, &options).unwrap();
    assert_eq!(root.name(), "memo");
    assert_eq!(root.kind(), NodeKind::Object);

    let strict = options.to_builder().fail_on_unmatched_elements(true).build();
    let back: Note = mapper().deserialize(&*root, &strict).unwrap();
    assert_eq!(back, Note::default());
}
