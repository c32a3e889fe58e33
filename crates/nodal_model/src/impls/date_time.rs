use alloc::boxed::Box;
use alloc::string::{String, ToString};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::Reflect;
use crate::impl_reflect_simple;
use crate::impls::{default_of, format_display, parse_from_str};
use crate::info::ParseError;

// ISO-8601 text forms. Offsets follow RFC 3339.

const NAIVE_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn parse_naive_date_time(text: &str) -> Result<Box<dyn Reflect>, ParseError> {
    Ok(Box::new(NaiveDateTime::parse_from_str(text, NAIVE_DATE_TIME)?))
}

fn format_naive_date_time(value: &dyn Reflect) -> Option<String> {
    value
        .downcast_ref::<NaiveDateTime>()
        .map(|v| v.format(NAIVE_DATE_TIME).to_string())
}

fn parse_utc(text: &str) -> Result<Box<dyn Reflect>, ParseError> {
    let value = DateTime::parse_from_rfc3339(text)?;
    Ok(Box::new(value.with_timezone(&Utc)))
}

fn format_utc(value: &dyn Reflect) -> Option<String> {
    value
        .downcast_ref::<DateTime<Utc>>()
        .map(|v| v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn parse_fixed(text: &str) -> Result<Box<dyn Reflect>, ParseError> {
    Ok(Box::new(DateTime::parse_from_rfc3339(text)?))
}

fn format_fixed(value: &dyn Reflect) -> Option<String> {
    value
        .downcast_ref::<DateTime<FixedOffset>>()
        .map(|v| v.to_rfc3339_opts(SecondsFormat::AutoSi, false))
}

impl_reflect_simple!(
    @impl NaiveDate, "NaiveDate", String,
    parse_from_str::<NaiveDate>,
    format_display::<NaiveDate>,
    default_of::<NaiveDate>
);

impl_reflect_simple!(
    @impl NaiveTime, "NaiveTime", String,
    parse_from_str::<NaiveTime>,
    format_display::<NaiveTime>,
    default_of::<NaiveTime>
);

impl_reflect_simple!(
    @impl NaiveDateTime, "NaiveDateTime", String,
    parse_naive_date_time,
    format_naive_date_time,
    default_of::<NaiveDateTime>
);

impl_reflect_simple!(
    @impl DateTime<Utc>, "DateTime", String,
    parse_utc,
    format_utc,
    default_of::<DateTime<Utc>>
);

impl_reflect_simple!(
    @impl DateTime<FixedOffset>, "DateTime", String,
    parse_fixed,
    format_fixed,
    default_of::<DateTime<FixedOffset>>
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

    use crate::info::Typed;

    #[test]
    fn naive_date_time_round_trip() {
        let info = NaiveDateTime::type_info().as_simple().unwrap();
        let value = info.parse("2024-02-29T13:45:10").unwrap().unwrap();

        let expected = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(13, 45, 10)
            .unwrap();
        assert_eq!(value.downcast_ref::<NaiveDateTime>(), Some(&expected));
        assert_eq!(info.format(&*value).as_deref(), Some("2024-02-29T13:45:10"));
    }

    #[test]
    fn utc_uses_rfc3339() {
        let info = DateTime::<Utc>::type_info().as_simple().unwrap();
        let value = info.parse("2024-01-01T10:00:00+02:00").unwrap().unwrap();
        assert_eq!(info.format(&*value).as_deref(), Some("2024-01-01T08:00:00Z"));
    }
}
