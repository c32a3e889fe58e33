use core::fmt::Write;

use super::Format;

/// One step from a node to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Name(String),
    Index(usize),
}

/// Location of a node, tracked by the mapper while it recurses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    root: String,
    segments: Vec<Segment>,
}

impl NodePath {
    /// Creates the path of a root node named `root`.
    pub fn new(root: &str) -> Self {
        Self {
            root: String::from(root),
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn push_name(&mut self, name: &str) {
        self.segments.push(Segment::Name(String::from(name)));
    }

    #[inline]
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    pub(crate) fn render(&self, format: Format) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = match format {
            Format::Json => self.render_json(&mut out),
            Format::Xml => self.render_xml(&mut out),
            Format::Csv => self.render_csv(&mut out),
            Format::Form => self.render_form(&mut out),
        };
        out
    }

    fn render_json(&self, out: &mut String) -> core::fmt::Result {
        out.push('$');
        for segment in &self.segments {
            match segment {
                Segment::Name(name) => write!(out, ".{name}")?,
                Segment::Index(index) => write!(out, "[{index}]")?,
            }
        }
        Ok(())
    }

    fn render_xml(&self, out: &mut String) -> core::fmt::Result {
        write!(out, "/{}", self.root)?;
        for segment in &self.segments {
            match segment {
                Segment::Name(name) => write!(out, "/{name}")?,
                // XPath positions are 1-based.
                Segment::Index(index) => write!(out, "/*[{}]", index + 1)?,
            }
        }
        Ok(())
    }

    fn render_csv(&self, out: &mut String) -> core::fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Name(name) if out.is_empty() => out.push_str(name),
                Segment::Name(name) => write!(out, ".{name}")?,
                Segment::Index(index) => write!(out, "[{index}]")?,
            }
        }
        Ok(())
    }

    fn render_form(&self, out: &mut String) -> core::fmt::Result {
        for segment in &self.segments {
            if !out.is_empty() {
                out.push('.');
            }
            match segment {
                Segment::Name(name) => out.push_str(name),
                Segment::Index(index) => write!(out, "{index}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NodePath;
    use crate::node::Format;

    fn sample() -> NodePath {
        let mut path = NodePath::new("Order");
        path.push_name("lines");
        path.push_index(1);
        path.push_name("sku");
        path
    }

    #[test]
    fn renders_per_format() {
        let path = sample();
        assert_eq!(path.render(Format::Json), "$.lines[1].sku");
        assert_eq!(path.render(Format::Xml), "/Order/lines/*[2]/sku");
        assert_eq!(path.render(Format::Form), "lines.1.sku");

        let mut row = NodePath::new("");
        row.push_index(3);
        row.push_name("price");
        assert_eq!(row.render(Format::Csv), "[3].price");
    }

    #[test]
    fn push_and_pop() {
        let mut path = sample();
        path.pop();
        path.pop();
        assert_eq!(path.depth(), 1);
        assert_eq!(path.render(Format::Json), "$.lines");
        assert_eq!(NodePath::new("Root").render(Format::Json), "$");
    }
}
