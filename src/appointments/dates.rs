use anyhow::anyhow;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::parsing::Parsed;
use time::{Date, PrimitiveDateTime, Time};

/// The only accepted appointment date shape: minute precision, no seconds,
/// no timezone.
pub const MINUTE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Parse `YYYY-MM-DD HH:MM` exactly. Trailing input (a seconds component
/// included) is an error, and the seconds of the result are always zero.
pub fn parse_appointment_date(raw: &str) -> anyhow::Result<PrimitiveDateTime> {
    let mut parsed = Parsed::new();
    let rest = parsed
        .parse_items(raw.as_bytes(), MINUTE_FORMAT)
        .map_err(|e| anyhow!("{e}"))?;
    if !rest.is_empty() {
        return Err(anyhow!("expected 'YYYY-MM-DD HH:MM', got trailing input"));
    }

    let year = parsed.year().ok_or_else(|| anyhow!("missing year"))?;
    let month = parsed.month().ok_or_else(|| anyhow!("missing month"))?;
    let day = parsed.day().ok_or_else(|| anyhow!("missing day"))?;
    let hour = parsed.hour_24().ok_or_else(|| anyhow!("missing hour"))?;
    let minute = parsed.minute().ok_or_else(|| anyhow!("missing minute"))?;

    let date = Date::from_calendar_date(year, month, day.get())?;
    let time = Time::from_hms(hour, minute, 0)?;
    Ok(PrimitiveDateTime::new(date, time))
}

pub fn format_appointment_date(dt: &PrimitiveDateTime) -> anyhow::Result<String> {
    Ok(dt.format(MINUTE_FORMAT)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_minute_precision() {
        let dt = parse_appointment_date("2024-03-01 10:00").unwrap();
        assert_eq!(dt, datetime!(2024-03-01 10:00));
        assert_eq!(dt.second(), 0);
        assert_eq!(dt.microsecond(), 0);
    }

    #[test]
    fn rejects_seconds_component() {
        assert!(parse_appointment_date("2024-03-01 10:00:00").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_appointment_date("next tuesday").is_err());
        assert!(parse_appointment_date("2024-03-01").is_err());
        assert!(parse_appointment_date("2024-13-01 10:00").is_err());
        assert!(parse_appointment_date("").is_err());
    }

    #[test]
    fn format_round_trips() {
        let raw = "2025-12-24 08:30";
        let dt = parse_appointment_date(raw).unwrap();
        assert_eq!(format_appointment_date(&dt).unwrap(), raw);
    }
}
