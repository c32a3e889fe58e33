//! Converters that take precedence over a type's own text form.

use core::any::TypeId;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use nodal_model::Reflect;
use nodal_model::info::{ParseError, ValueKind};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("`{0}` is not a boolean")]
struct NotABoolean(String);

/// Whether the built-in table converts `ty`.
///
/// `Vec<u8>` is a list by shape; the table makes it a simple value.
#[inline]
pub(super) fn handles(ty: TypeId) -> bool {
    ty == TypeId::of::<Vec<u8>>() || ty == TypeId::of::<bool>()
}

pub(super) fn read(ty: TypeId, text: &str) -> Option<Result<Box<dyn Reflect>, ParseError>> {
    if ty == TypeId::of::<Vec<u8>>() {
        return Some(read_bytes(text));
    }
    if ty == TypeId::of::<bool>() {
        return Some(read_bool(text));
    }
    None
}

pub(super) fn write(value: &dyn Reflect) -> Option<(String, ValueKind)> {
    if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
        return Some((STANDARD.encode(bytes), ValueKind::String));
    }
    if let Some(flag) = value.downcast_ref::<bool>() {
        let text = if *flag { "true" } else { "false" };
        return Some((String::from(text), ValueKind::Boolean));
    }
    None
}

fn read_bytes(text: &str) -> Result<Box<dyn Reflect>, ParseError> {
    Ok(Box::new(STANDARD.decode(text)?))
}

fn read_bool(text: &str) -> Result<Box<dyn Reflect>, ParseError> {
    if text.eq_ignore_ascii_case("true") {
        Ok(Box::new(true))
    } else if text.eq_ignore_ascii_case("false") {
        Ok(Box::new(false))
    } else {
        Err(NotABoolean(String::from(text)).into())
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::{read, write};

    #[test]
    fn bytes_as_base64() {
        let (text, _) = write(&vec![0_u8, 1, 2, 255]).unwrap();
        assert_eq!(text, "AAEC/w==");

        let bytes = read(TypeId::of::<Vec<u8>>(), &text).unwrap().unwrap();
        assert_eq!(bytes.downcast_ref::<Vec<u8>>(), Some(&vec![0, 1, 2, 255]));
        assert!(read(TypeId::of::<Vec<u8>>(), "%%").unwrap().is_err());
    }

    #[test]
    fn booleans_ignore_case() {
        let value = read(TypeId::of::<bool>(), "TRUE").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<bool>(), Some(&true));
        assert!(read(TypeId::of::<bool>(), "yes").unwrap().is_err());
        assert_eq!(write(&false).unwrap().0, "false");
        assert!(read(TypeId::of::<u8>(), "1").is_none());
    }
}
