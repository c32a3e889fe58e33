use core::error::Error as StdError;
use core::fmt;

use nodal_model::cache::CachedMember;
use thiserror::Error;

use crate::node::{Format, NodeError};

/// Boxed source error of a [`MappingError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type of the mapper.
pub type Result<T, E = MappingError> = core::result::Result<T, E>;

/// Raw values are cut to this many characters in messages.
const MAX_RAW_VALUE_CHARS: usize = 50;

// -----------------------------------------------------------------------------
// ErrorKind

/// Category of a [`MappingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The type cannot be mapped at this position.
    TypeNotSupported,
    /// A source node has no matching member.
    UnmatchedNode,
    /// A member has no matching source node.
    UnmatchedMember,
    /// A raw value could not be converted to its type.
    ValueParse,
    /// A null value was read into a type without a null representation.
    ValueCannotBeNull,
    /// No constructor or factory produced an instance.
    ObjectCreation,
    /// The node shape does not match the type shape.
    NodeTypeMismatch,
    /// The text codec could not read a node tree.
    SourceParse,
    /// The text codec could not write a node tree.
    SourceWrite,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeNotSupported => "type not supported",
            Self::UnmatchedNode => "unmatched node",
            Self::UnmatchedMember => "unmatched member",
            Self::ValueParse => "value parse",
            Self::ValueCannotBeNull => "value cannot be null",
            Self::ObjectCreation => "object creation",
            Self::NodeTypeMismatch => "node type mismatch",
            Self::SourceParse => "source parse",
            Self::SourceWrite => "source write",
        }
    }

    /// The end-user message used when no specific one is given.
    pub const fn default_friendly_message(self) -> &'static str {
        match self {
            Self::TypeNotSupported => "This kind of data is not supported.",
            Self::UnmatchedNode => "The data contains an unexpected field.",
            Self::UnmatchedMember => "A required field is missing.",
            Self::ValueParse => "A value is not in the correct format.",
            Self::ValueCannotBeNull => "A value is required.",
            Self::ObjectCreation => "The data could not be processed.",
            Self::NodeTypeMismatch => "The data does not have the expected structure.",
            Self::SourceParse => "The data is not formatted correctly.",
            Self::SourceWrite => "The data could not be written.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// MappingError

/// Error of a mapping call.
///
/// Carries a technical message and a separate end-user message,
/// plus the member and wire path where the error happened.
#[derive(Debug, Error)]
#[error("{kind}: {message}{}", Location(.member, .path))]
pub struct MappingError {
    kind: ErrorKind,
    message: String,
    friendly: String,
    member: Option<String>,
    path: Option<String>,
    #[source]
    source: Option<BoxError>,
}

struct Location<'a>(&'a Option<String>, &'a Option<String>);

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(member) = self.0 {
            write!(f, ", member `{member}`")?;
        }
        if let Some(path) = self.1 {
            write!(f, ", at `{path}`")?;
        }
        Ok(())
    }
}

impl MappingError {
    fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            message,
            friendly: String::from(kind.default_friendly_message()),
            member: None,
            path: None,
            source: None,
        }
    }

    fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    fn with_friendly(mut self, friendly: String) -> Self {
        self.friendly = friendly;
        self
    }

    // -------------------------------------------------------------------------
    // Constructors

    pub fn type_not_supported(type_path: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::TypeNotSupported,
            format!("`{type_path}` is not supported: {reason}"),
        )
    }

    pub fn unmatched_node(name: &str, type_path: &str) -> Self {
        Self::new(
            ErrorKind::UnmatchedNode,
            format!("node `{name}` does not match any member of `{type_path}`"),
        )
    }

    pub fn unmatched_member(member: &CachedMember) -> Self {
        Self::new(
            ErrorKind::UnmatchedMember,
            format!("member `{member}` has no matching node"),
        )
    }

    /// A raw value failed to convert.
    ///
    /// `friendly` may contain a `{value}` placeholder, replaced with the
    /// truncated raw value.
    pub fn value_parse(
        raw: &str,
        type_path: &str,
        friendly: Option<&str>,
        source: impl Into<BoxError>,
    ) -> Self {
        let raw = truncate(raw);
        let source = source.into();
        let friendly = match friendly {
            Some(template) => template.replace("{value}", &raw),
            None => format!("'{raw}' is not a valid value."),
        };
        Self::new(
            ErrorKind::ValueParse,
            format!("cannot parse '{raw}' as `{type_path}`: {source}"),
        )
        .with_friendly(friendly)
        .with_source(source)
    }

    pub fn value_cannot_be_null(type_path: &str) -> Self {
        Self::new(
            ErrorKind::ValueCannotBeNull,
            format!("`{type_path}` cannot hold a null value"),
        )
    }

    pub fn object_creation(type_path: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::ObjectCreation,
            format!("cannot create `{type_path}`: {reason}"),
        )
    }

    pub fn node_type_mismatch(type_path: &str, expected: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::NodeTypeMismatch,
            format!("`{type_path}` requires {expected}"),
        )
    }

    pub fn source_parse(format: Format, source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self::new(
            ErrorKind::SourceParse,
            format!("malformed {format} text: {source}"),
        )
        .with_source(source)
    }

    pub fn source_write(format: Format, source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self::new(
            ErrorKind::SourceWrite,
            format!("cannot write {format} text: {source}"),
        )
        .with_source(source)
    }

    // -------------------------------------------------------------------------
    // Context

    /// Sets the wire path, if none is set yet.
    pub fn at(mut self, path: impl FnOnce() -> String) -> Self {
        if self.path.is_none() {
            self.path = Some(path());
        }
        self
    }

    /// Sets the member, if none is set yet.
    ///
    /// Errors cross several member boundaries on the way up; only the
    /// innermost one is recorded.
    pub fn within_member(mut self, member: &CachedMember) -> Self {
        if self.member.is_none() {
            self.member = Some(member.to_string());
        }
        self
    }

    // -------------------------------------------------------------------------
    // Accessors

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The technical message, without member and path.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message meant for end users.
    #[inline]
    pub fn friendly_message(&self) -> &str {
        &self.friendly
    }

    /// The `Declaring.member` the error happened in.
    #[inline]
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// The rendered wire path of the node the error happened at.
    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl From<NodeError> for MappingError {
    fn from(err: NodeError) -> Self {
        Self::new(ErrorKind::TypeNotSupported, err.to_string()).with_source(err)
    }
}

fn truncate(raw: &str) -> String {
    match raw.char_indices().nth(MAX_RAW_VALUE_CHARS) {
        Some((end, _)) => format!("{}...", &raw[..end]),
        None => String::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, MappingError};

    #[test]
    fn truncates_raw_values() {
        let raw = "x".repeat(80);
        let err = MappingError::value_parse(&raw, "u8", None, "bad digit");
        assert_eq!(err.kind(), ErrorKind::ValueParse);
        assert!(err.message().contains(&format!("'{}...'", "x".repeat(50))));
        assert!(!err.message().contains(&"x".repeat(51)));
    }

    #[test]
    fn friendly_template() {
        let err = MappingError::value_parse("abc", "u8", Some("'{value}' is no number"), "bad");
        assert_eq!(err.friendly_message(), "'abc' is no number");

        let err = MappingError::value_cannot_be_null("i32");
        assert_eq!(err.friendly_message(), "A value is required.");
    }

    #[test]
    fn path_is_set_once() {
        let err = MappingError::value_cannot_be_null("i32")
            .at(|| String::from("$.a"))
            .at(|| String::from("$"));
        assert_eq!(err.path(), Some("$.a"));
        assert_eq!(
            err.to_string(),
            "value cannot be null: `i32` cannot hold a null value, at `$.a`"
        );
    }

    #[test]
    fn writing_is_not_parsing() {
        use crate::node::Format;

        let err = MappingError::source_write(Format::Json, "writer closed");
        assert_eq!(err.kind(), ErrorKind::SourceWrite);
        assert_eq!(err.friendly_message(), "The data could not be written.");
        assert!(err.message().starts_with("cannot write"));
        assert!(!err.message().contains("malformed"));
    }

    #[test]
    fn keeps_source() {
        use core::error::Error;

        let err = MappingError::value_parse("x", "u8", None, "invalid digit");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("invalid digit"));
    }
}
