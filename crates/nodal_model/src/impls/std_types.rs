use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use core::time::Duration;

use crate::Reflect;
use crate::impl_reflect_simple;
use crate::impls::{default_of, format_display, parse_from_str};
use crate::info::ParseError;

// -----------------------------------------------------------------------------
// Primitives

macro_rules! impl_primitive {
    ($kind:ident: $($ty:ident)*) => {
        $(
            impl_reflect_simple!(
                @impl $ty, stringify!($ty), $kind,
                parse_from_str::<$ty>,
                format_display::<$ty>,
                default_of::<$ty>
            );
        )*
    };
}

impl_primitive!(Number: i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize f32 f64);
impl_primitive!(Boolean: bool);
impl_primitive!(String: char String);

// -----------------------------------------------------------------------------
// Duration

// Whole and fractional seconds.
fn parse_seconds(text: &str) -> Result<Box<dyn Reflect>, ParseError> {
    let seconds: f64 = text.parse()?;
    Ok(Box::new(Duration::try_from_secs_f64(seconds)?))
}

fn format_seconds(value: &dyn Reflect) -> Option<String> {
    value
        .downcast_ref::<Duration>()
        .map(|d| d.as_secs_f64().to_string())
}

impl_reflect_simple!(
    @impl Duration, "Duration", Number,
    parse_seconds,
    format_seconds,
    default_of::<Duration>
);

// -----------------------------------------------------------------------------
// Network

macro_rules! impl_address {
    ($($ty:ident)*) => {
        $(
            impl_reflect_simple!(
                @impl $ty, stringify!($ty), String,
                parse_from_str::<$ty>,
                format_display::<$ty>
            );
        )*
    };
}

impl_address!(IpAddr Ipv4Addr Ipv6Addr SocketAddr);

// -----------------------------------------------------------------------------
// Uuid

impl_reflect_simple!(
    @impl uuid::Uuid, "Uuid", String,
    parse_from_str::<uuid::Uuid>,
    format_display::<uuid::Uuid>,
    default_of::<uuid::Uuid>
);

// -----------------------------------------------------------------------------
// Url, Version

// Neither has a meaningful zero value.
impl_reflect_simple!(
    @impl url::Url, "Url", String,
    parse_from_str::<url::Url>,
    format_display::<url::Url>
);

impl_reflect_simple!(
    @impl semver::Version, "Version", String,
    parse_from_str::<semver::Version>,
    format_display::<semver::Version>
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use crate::info::{Typed, ValueKind};

    #[test]
    fn number_text_form() {
        let info = i32::type_info().as_simple().unwrap();
        assert_eq!(info.value_kind(), ValueKind::Number);

        let value = info.parse("-42").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&-42));
        assert_eq!(info.format(&*value).as_deref(), Some("-42"));
        assert!(info.parse("4.2").unwrap().is_err());
    }

    #[test]
    fn duration_in_seconds() {
        let info = Duration::type_info().as_simple().unwrap();

        let value = info.parse("1.5").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<Duration>(), Some(&Duration::from_millis(1500)));
        assert_eq!(info.format(&*value).as_deref(), Some("1.5"));
        assert!(info.parse("-1").unwrap().is_err());
        assert!(info.parse(" 1.5").unwrap().is_err());
    }

    #[test]
    fn url_text_form() {
        let info = url::Url::type_info().as_simple().unwrap();
        assert_eq!(info.value_kind(), ValueKind::String);
        assert!(!info.has_zero_value());

        let value = info.parse("https://example.com/a?b=1").unwrap().unwrap();
        let url = value.downcast_ref::<url::Url>().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(info.format(&*value).as_deref(), Some("https://example.com/a?b=1"));
        assert!(info.parse("not a url").unwrap().is_err());
    }

    #[test]
    fn version_text_form() {
        let info = semver::Version::type_info().as_simple().unwrap();
        assert!(!info.has_zero_value());

        let value = info.parse("1.2.3-beta.1").unwrap().unwrap();
        assert_eq!(
            value.downcast_ref::<semver::Version>(),
            Some(&semver::Version::parse("1.2.3-beta.1").unwrap())
        );
        assert_eq!(info.format(&*value).as_deref(), Some("1.2.3-beta.1"));
        assert!(info.parse("1.2").unwrap().is_err());
    }

    #[test]
    fn zero_values() {
        let zero = u64::type_info().as_simple().unwrap().zero_value().unwrap();
        assert_eq!(zero.downcast_ref::<u64>(), Some(&0));

        let ip = core::net::IpAddr::type_info().as_simple().unwrap();
        assert!(!ip.has_zero_value());
    }
}
