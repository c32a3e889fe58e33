use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::error::Error;
use core::fmt::Display;
use core::str::FromStr;

use crate::Reflect;
use crate::info::ParseError;

/// Parser of a `FromStr` type, usable as a [`SimpleInfo`](crate::info::SimpleInfo) parser.
pub fn parse_from_str<T>(text: &str) -> Result<Box<dyn Reflect>, ParseError>
where
    T: FromStr + Reflect,
    T::Err: Error + Send + Sync + 'static,
{
    match text.parse::<T>() {
        Ok(value) => Ok(Box::new(value)),
        Err(err) => Err(Box::new(err)),
    }
}

/// Formatter of a `Display` type, usable as a [`SimpleInfo`](crate::info::SimpleInfo) formatter.
pub fn format_display<T: Display + Reflect>(value: &dyn Reflect) -> Option<String> {
    value.downcast_ref::<T>().map(ToString::to_string)
}

/// Implements [`Typed`](crate::info::Typed) and [`Reflect`] for a simple type.
///
/// The type's text form is its `FromStr` and `Display` implementation.
///
/// - `impl_reflect_simple!(Ty)`: a string value.
/// - `impl_reflect_simple!(Ty, Number)`: the wire [`ValueKind`](crate::info::ValueKind).
/// - `impl_reflect_simple!(Ty, String, default)`: also uses `Default` as zero value.
///
/// # Example
///
/// ```
/// use core::{fmt, str::FromStr};
/// use nodal_model::impl_reflect_simple;
/// use nodal_model::info::Typed;
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f32);
///
/// impl fmt::Display for Celsius {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}C", self.0)
///     }
/// }
///
/// impl FromStr for Celsius {
///     type Err = core::num::ParseFloatError;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.trim_end_matches('C').parse().map(Celsius)
///     }
/// }
///
/// impl_reflect_simple!(Celsius);
///
/// let info = Celsius::type_info().as_simple().unwrap();
/// let value = info.parse("21.5C").unwrap().unwrap();
/// assert_eq!(info.format(&*value).unwrap(), "21.5C");
/// ```
#[macro_export]
macro_rules! impl_reflect_simple {
    (@impl $ty:ty, $ident:expr, $kind:ident, $parse:expr, $format:expr $(, $default:expr)?) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Simple(
                        $crate::info::SimpleInfo::new::<$ty>($ident, $crate::info::ValueKind::$kind)
                            .with_parser($parse)
                            .with_formatter($format)
                            $(.with_default($default))?
                    )
                })
            }
        }

        impl $crate::Reflect for $ty {
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn $crate::Reflect>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
                $crate::ops::ReflectRef::Simple(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
                $crate::ops::ReflectMut::Simple(self)
            }
        }
    };
    ($ty:ty) => {
        $crate::impl_reflect_simple!($ty, String);
    };
    ($ty:ty, $kind:ident) => {
        $crate::impl_reflect_simple!(
            @impl $ty, ::core::stringify!($ty), $kind,
            $crate::impls::parse_from_str::<$ty>,
            $crate::impls::format_display::<$ty>
        );
    };
    ($ty:ty, $kind:ident, default) => {
        $crate::impl_reflect_simple!(
            @impl $ty, ::core::stringify!($ty), $kind,
            $crate::impls::parse_from_str::<$ty>,
            $crate::impls::format_display::<$ty>,
            $crate::impls::default_of::<$ty>
        );
    };
}
