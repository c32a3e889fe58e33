use nodal_mapper::naming::Case;
use nodal_mapper::node::{Node, NodeKind, XmlNode};
use nodal_mapper::{ErrorKind, Format, Mapper, Options};
use nodal_model::Reflect;

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default, rename = "library")]
struct Library {
    name: String,
    books: Vec<Book>,
    opened: Option<u16>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Book {
    #[reflect(rename = "isbn")]
    code: String,
    pages: u32,
    kind: Genre,
}

#[derive(Reflect, Default, Debug, PartialEq)]
enum Genre {
    #[default]
    Fiction,
    #[reflect(rename = "non-fiction")]
    NonFiction,
}

fn library() -> Library {
    Library {
        name: "central".into(),
        books: vec![
            Book {
                code: "978-0".into(),
                pages: 320,
                kind: Genre::Fiction,
            },
            Book {
                code: "978-1".into(),
                pages: 88,
                kind: Genre::NonFiction,
            },
        ],
        opened: None,
    }
}

fn element<'a>(node: &'a dyn Node, name: &str) -> &'a dyn Node {
    node.children().find(|child| child.name() == name).unwrap()
}

#[test]
fn element_tree() {
    let options = Options::builder().type_case(Case::Pascal).build();
    let root = Mapper::new().serialize(&library(), Format::Xml, &options).unwrap();

    assert_eq!(root.name(), "Library");
    let books = element(&*root, "books");
    let names: Vec<&str> = books.children().map(|book| book.name()).collect();
    assert_eq!(names, ["Book", "Book"]);

    let first = books.children().next().unwrap();
    assert_eq!(element(first, "isbn").value(), Some("978-0"));
    assert_eq!(element(first, "kind").value(), Some("Fiction"));
    assert!(element(&*root, "opened").is_null());
}

#[test]
fn round_trip() {
    let options = Options::default();
    let mapper = Mapper::new();

    let root = mapper.serialize(&library(), Format::Xml, &options).unwrap();
    assert_eq!(root.name(), "library");
    let back: Library = mapper.deserialize(&*root, &options).unwrap();
    assert_eq!(back, library());
}

#[test]
fn array_item_naming() {
    let options = Options::builder()
        .with_array_item_naming_when(
            |cx| cx.member.is_some_and(|member| member.name() == "books"),
            |_, _| String::from("volume"),
        )
        .build();
    let root = Mapper::new().serialize(&library(), Format::Xml, &options).unwrap();
    let books = element(&*root, "books");
    assert!(books.children().all(|book| book.name() == "volume"));
}

#[test]
fn hand_built_elements() {
    // XML elements do not record whether they hold a value or children.
    let root = XmlNode::new("library", NodeKind::Object)
        .with_child(XmlNode::text_element("name", "branch"))
        .with_child(
            XmlNode::new("books", NodeKind::Object).with_child(
                XmlNode::new("Book", NodeKind::Object)
                    .with_child(XmlNode::text_element("isbn", "1"))
                    .with_child(XmlNode::text_element("pages", "12"))
                    .with_child(XmlNode::text_element("kind", "non-fiction")),
            ),
        )
        .with_child(XmlNode::nil_element("opened"));

    let library: Library = Mapper::new().deserialize(&root, &Options::default()).unwrap();
    assert_eq!(library.name, "branch");
    assert_eq!(library.books.len(), 1);
    assert_eq!(library.books[0].pages, 12);
    assert_eq!(library.books[0].kind, Genre::NonFiction);
    assert_eq!(library.opened, None);
}

#[test]
fn text_is_not_a_list() {
    let root = XmlNode::new("library", NodeKind::Object)
        .with_child(XmlNode::text_element("books", "none"));
    let err = Mapper::new()
        .deserialize::<Library>(&root, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NodeTypeMismatch);
    assert_eq!(err.path(), Some("/library/books"));
}

#[test]
fn nil_markers_survive_null_exclusion() {
    let options = Options::builder().exclude_null_values(true).build();
    let mapper = Mapper::new();

    let plain = mapper.serialize(&library(), Format::Xml, &options).unwrap();
    assert!(plain.children().all(|child| child.name() != "opened"));

    let mut marked = XmlNode::new("library", NodeKind::Object).with_nil_markers();
    mapper.serialize_into(&library(), &mut marked, &options).unwrap();
    let opened = marked.elements().iter().find(|e| e.name() == "opened").unwrap();
    assert!(opened.is_nil());
}
