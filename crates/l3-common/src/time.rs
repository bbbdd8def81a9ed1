//! Timestamps embedded in dataset filenames.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Length of `_YYYYMMDDTHHMMSSZ_`.
const STAMP_PATTERN_LEN: usize = 18;

/// Observation timestamp parsed from a filename such as
/// `TEMPO_NO2_L3_V03_20251003T231130Z_S012.nc`.
///
/// Holds the fixed-width `YYYYMMDDTHHMMSS` text, so the derived ordering is
/// chronological. Filenames without a stamp get the empty value, which
/// orders before every real stamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatasetTimestamp(String);

impl DatasetTimestamp {
    /// Find the first `_<8 digits>T<6 digits>Z_` run in a filename.
    pub fn from_filename(name: &str) -> Self {
        let bytes = name.as_bytes();
        if bytes.len() < STAMP_PATTERN_LEN {
            return Self::default();
        }

        for start in 0..=(bytes.len() - STAMP_PATTERN_LEN) {
            let window = &bytes[start..start + STAMP_PATTERN_LEN];
            if is_stamp(window) {
                // The window is ASCII, so slicing the str on these offsets is safe.
                return Self(name[start + 1..start + 16].to_string());
            }
        }

        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the filename carried no parseable stamp.
    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }

    /// Interpret the stamp as a UTC instant.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if self.is_unknown() {
            return None;
        }
        NaiveDateTime::parse_from_str(&self.0, "%Y%m%dT%H%M%S")
            .ok()
            .map(|ndt| Utc.from_utc_datetime(&ndt))
    }
}

impl std::fmt::Display for DatasetTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_stamp(window: &[u8]) -> bool {
    window[0] == b'_'
        && window[1..9].iter().all(u8::is_ascii_digit)
        && window[9] == b'T'
        && window[10..16].iter().all(u8::is_ascii_digit)
        && window[16] == b'Z'
        && window[17] == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_tempo_filename() {
        let ts = DatasetTimestamp::from_filename("TEMPO_NO2_L3_V03_20251003T231130Z_S012.nc");
        assert_eq!(ts.as_str(), "20251003T231130");

        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.month(), 10);
        assert_eq!(dt.day(), 3);
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.minute(), 11);
        assert_eq!(dt.second(), 30);
    }

    #[test]
    fn test_missing_stamp_is_empty() {
        for name in [
            "no_stamp_here.nc",
            "TEMPO_20251003T231130_S012.nc",  // no Z
            "TEMPO_20251003T231130Z.nc",      // no trailing underscore
            "TEMPO_2025100XT231130Z_S012.nc", // non-digit
            "",
        ] {
            let ts = DatasetTimestamp::from_filename(name);
            assert!(ts.is_unknown(), "expected no stamp in {:?}", name);
            assert_eq!(ts.to_datetime(), None);
        }
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = DatasetTimestamp::from_filename("x_20251001T000000Z_a.nc");
        let b = DatasetTimestamp::from_filename("x_20251003T231130Z_a.nc");
        let c = DatasetTimestamp::from_filename("x_20250930T120000Z_a.nc");
        let none = DatasetTimestamp::from_filename("x.nc");

        let mut stamps = vec![a.clone(), b.clone(), c.clone(), none.clone()];
        stamps.sort();
        assert_eq!(stamps, vec![none, c, a, b]);
    }

    #[test]
    fn test_first_match_wins() {
        let ts = DatasetTimestamp::from_filename("x_20250101T000000Z_20260101T000000Z_.nc");
        assert_eq!(ts.as_str(), "20250101T000000");
    }
}
