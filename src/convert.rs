//! Stock converters for common attribute types.
//!
//! ```rust
//! use rdf_mapping::{convert, PropertyMap};
//! use rdf_mapping::vocab::{DCT, XSD};
//!
//! let created = PropertyMap::new(DCT.term("created"))
//!     .with_datatype(XSD.term("dateTime"))
//!     .with_to_wire(convert::datetime_to_wire())
//!     .with_from_wire(convert::datetime_from_wire());
//! ```

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::mapping::Converter;
use crate::model::Value;
use crate::{Error, Result};

/// Format a timestamp as ISO 8601, using `Z` for UTC.
pub fn isoformat(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an ISO 8601 timestamp. An explicit offset is normalised to UTC; a
/// timestamp without one is taken to be UTC already.
pub fn parse_isoformat(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::Conversion {
            converter: "datetime".into(),
            message: format!("cannot convert datetime '{text}': {e}"),
        })
}

/// `to_wire` converter: timestamp → ISO 8601 text. Text passes through.
pub fn datetime_to_wire() -> Converter {
    Converter::new("datetime_to_wire", |value| match value {
        Value::DateTime(dt) => Ok(Value::String(isoformat(dt))),
        Value::String(_) => Ok(value.clone()),
        other => Err(Error::Conversion {
            converter: "datetime_to_wire".into(),
            message: format!("expected DATETIME, got {}", other.type_name()),
        }),
    })
}

/// `from_wire` converter: ISO 8601 text → timestamp.
pub fn datetime_from_wire() -> Converter {
    Converter::new("datetime_from_wire", |value| match value {
        Value::String(text) => parse_isoformat(text).map(Value::DateTime),
        Value::DateTime(_) => Ok(value.clone()),
        other => Err(Error::Conversion {
            converter: "datetime_from_wire".into(),
            message: format!("expected STRING, got {}", other.type_name()),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_isoformat_uses_z() {
        let dt = Utc.with_ymd_and_hms(2011, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(isoformat(&dt), "2011-05-06T07:08:09Z");
    }

    #[test]
    fn test_parse_normalises_offset() {
        let dt = parse_isoformat("2011-05-06T09:08:09+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2011, 5, 6, 7, 8, 9).unwrap());
        let naive = parse_isoformat("2011-05-06T07:08:09").unwrap();
        assert_eq!(naive, dt);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_isoformat("yesterday"), Err(Error::Conversion { .. })));
    }

    #[test]
    fn test_converters() {
        let dt = Utc.with_ymd_and_hms(2011, 5, 6, 7, 8, 9).unwrap();
        let wire = datetime_to_wire().apply(&Value::DateTime(dt)).unwrap();
        assert_eq!(wire, Value::from("2011-05-06T07:08:09Z"));
        assert_eq!(datetime_from_wire().apply(&wire).unwrap(), Value::DateTime(dt));
        assert!(datetime_to_wire().apply(&Value::Int(3)).is_err());
    }
}
