//! Timestamp serialization with a fixed width.
//!
//! Stored documents are ordered by comparing their serialized timestamps as
//! strings, which only works when every value has the same number of
//! fractional digits.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub mod timestamp {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "timestamp")]
        at: DateTime<Utc>,
    }

    #[test]
    fn whole_seconds_keep_fraction_digits() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let json = serde_json::to_value(Stamp { at }).unwrap();
        assert_eq!(json["at"], "2024-05-01T10:00:00.000000Z");
    }

    #[test]
    fn string_order_matches_time_order() {
        let earlier = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let later = earlier + chrono::Duration::milliseconds(500);

        let a = serde_json::to_value(Stamp { at: earlier }).unwrap();
        let b = serde_json::to_value(Stamp { at: later }).unwrap();
        assert!(a["at"].as_str().unwrap() < b["at"].as_str().unwrap());
    }

    #[test]
    fn parses_offsets() {
        let stamp: Stamp =
            serde_json::from_value(serde_json::json!({ "at": "2024-05-01T12:00:00+02:00" }))
                .unwrap();
        assert_eq!(stamp.at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }
}
