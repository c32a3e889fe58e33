use nodal_model::info::ValueKind;

use super::{Format, Node, NodeChildren, NodeError, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Table,
    Row,
    Field,
}

/// A node of a character-separated table.
///
/// The tree is always three levels deep: a table (array) of rows
/// (objects) of fields (values). Anything nested deeper is rejected.
///
/// # Example
///
/// ```
/// use nodal_mapper::node::{CsvNode, Node, NodeKind};
///
/// let table = CsvNode::from_records(&["id", "name"], [["1", "ann"], ["2", ""]]);
/// assert_eq!(table.kind(), NodeKind::Array);
/// assert_eq!(table.headers(), ["id", "name"]);
/// assert_eq!(table.records(), [["1", "ann"], ["2", ""]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvNode {
    name: String,
    level: Level,
    value: Option<String>,
    children: Vec<CsvNode>,
}

impl CsvNode {
    fn with_level(name: &str, level: Level) -> Self {
        Self {
            name: String::from(name),
            level,
            value: None,
            children: Vec::new(),
        }
    }

    /// Creates an empty table, `kind` must be [`NodeKind::Array`].
    pub fn table(name: &str, kind: NodeKind) -> Result<Self, NodeError> {
        match kind {
            NodeKind::Array => Ok(Self::with_level(name, Level::Table)),
            _ => Err(NodeError::Unsupported {
                format: Format::Csv,
                kind,
                depth: 0,
            }),
        }
    }

    /// Builds a table from a header line and records.
    ///
    /// Missing trailing fields are left out of their row.
    pub fn from_records<H, R, F>(headers: &[H], records: R) -> Self
    where
        H: AsRef<str>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        let mut table = Self::with_level("", Level::Table);
        for record in records {
            let mut row = Self::with_level("", Level::Row);
            for (header, field) in headers.iter().zip(record) {
                let mut cell = Self::with_level(header.as_ref(), Level::Field);
                cell.value = Some(String::from(field.as_ref()));
                row.children.push(cell);
            }
            table.children.push(row);
        }
        table
    }

    /// Returns the column names in first-seen order across all rows.
    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = Vec::new();
        for row in &self.children {
            for field in &row.children {
                if !headers.iter().any(|h| *h == field.name) {
                    headers.push(field.name.clone());
                }
            }
        }
        headers
    }

    /// Returns one record per row, aligned to [`headers`](Self::headers).
    ///
    /// Missing and null fields are empty.
    pub fn records(&self) -> Vec<Vec<String>> {
        let headers = self.headers();
        self.children
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|header| {
                        row.children
                            .iter()
                            .find(|field| field.name == *header)
                            .and_then(|field| field.value.clone())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}

impl Node for CsvNode {
    #[inline]
    fn format(&self) -> Format {
        Format::Csv
    }

    fn kind(&self) -> NodeKind {
        match self.level {
            Level::Table => NodeKind::Array,
            Level::Row => NodeKind::Object,
            Level::Field => NodeKind::Value,
        }
    }

    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        name.clone_into(&mut self.name);
    }

    #[inline]
    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn set_value(&mut self, value: Option<String>, _value_kind: ValueKind) {
        self.value = value;
    }

    fn children(&self) -> NodeChildren<'_> {
        Box::new(self.children.iter().map(|child| child as &dyn Node))
    }

    fn add_child(&mut self, name: &str, kind: NodeKind) -> Result<&mut dyn Node, NodeError> {
        let (level, depth) = match (self.level, kind) {
            (Level::Table, NodeKind::Object) => (Level::Row, 1),
            (Level::Row, NodeKind::Value) => (Level::Field, 2),
            (Level::Field, _) => return Err(NodeError::NotAContainer(NodeKind::Value)),
            (Level::Table, _) => (Level::Table, 1),
            (Level::Row, _) => (Level::Row, 2),
        };
        if level == self.level {
            return Err(NodeError::Unsupported {
                format: Format::Csv,
                kind,
                depth,
            });
        }
        let index = self.children.len();
        self.children.push(Self::with_level(name, level));
        Ok(&mut self.children[index])
    }
}

#[cfg(test)]
mod tests {
    use super::CsvNode;
    use crate::node::{Format, Node, NodeError, NodeKind};

    #[test]
    fn rejects_nesting() {
        let mut table = CsvNode::table("", NodeKind::Array).unwrap();
        assert!(table.add_child("", NodeKind::Array).is_err());

        let row = table.add_child("Row", NodeKind::Object).unwrap();
        assert_eq!(
            row.add_child("tags", NodeKind::Array).unwrap_err(),
            NodeError::Unsupported {
                format: Format::Csv,
                kind: NodeKind::Array,
                depth: 2,
            }
        );
        assert!(row.add_child("id", NodeKind::Value).is_ok());
        assert!(CsvNode::table("", NodeKind::Object).is_err());
    }

    #[test]
    fn records_align_to_headers() {
        let mut table = CsvNode::table("", NodeKind::Array).unwrap();
        let row = table.add_child("", NodeKind::Object).unwrap();
        row.add_child("a", NodeKind::Value)
            .unwrap()
            .set_value(Some(String::from("1")), Default::default());
        let row = table.add_child("", NodeKind::Object).unwrap();
        row.add_child("b", NodeKind::Value)
            .unwrap()
            .set_value(Some(String::from("2")), Default::default());
        row.add_child("a", NodeKind::Value)
            .unwrap()
            .set_value(None, Default::default());

        assert_eq!(table.headers(), ["a", "b"]);
        assert_eq!(table.records(), [["1", ""], ["", "2"]]);
    }
}
