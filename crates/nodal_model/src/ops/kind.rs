use crate::Reflect;
use crate::info::Shape;
use crate::ops::{Dictionary, List, Object, Optional};

/// An immutable view of a value's shape.
pub enum ReflectRef<'a> {
    Simple(&'a dyn Reflect),
    Object(&'a dyn Object),
    List(&'a dyn List),
    Dictionary(&'a dyn Dictionary),
    Optional(&'a dyn Optional),
}

/// A mutable view of a value's shape.
pub enum ReflectMut<'a> {
    Simple(&'a mut dyn Reflect),
    Object(&'a mut dyn Object),
    List(&'a mut dyn List),
    Dictionary(&'a mut dyn Dictionary),
    Optional(&'a mut dyn Optional),
}

impl ReflectRef<'_> {
    /// Returns the [`Shape`] of the view, `None` for optional values.
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Simple(_) => Some(Shape::Simple),
            Self::Object(_) => Some(Shape::Object),
            Self::List(_) => Some(Shape::Array),
            Self::Dictionary(_) => Some(Shape::Dictionary),
            Self::Optional(_) => None,
        }
    }
}

impl<'a> ReflectMut<'a> {
    /// Returns the list view, if this is a list.
    pub fn into_list(self) -> Option<&'a mut dyn List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the dictionary view, if this is a dictionary.
    pub fn into_dictionary(self) -> Option<&'a mut dyn Dictionary> {
        match self {
            Self::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }
}
