//! Time-of-day classification for surcharges.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

/// Surcharge flags that apply at a given time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimePeriod {
    pub is_night: bool,
    pub is_peak: bool,
}

/// Night runs from 20:00 to 06:00.
const NIGHT_START_HOUR: u32 = 20;
const NIGHT_END_HOUR: u32 = 6;

/// Morning and evening rush hours, start inclusive, end exclusive.
const PEAK_HOURS: [(u32, u32); 2] = [(7, 9), (17, 19)];

impl TimePeriod {
    /// Classify a local time of day.
    ///
    /// ```
    /// use chrono::NaiveTime;
    /// use fermata_server::pricing::TimePeriod;
    ///
    /// let rush = TimePeriod::at(NaiveTime::from_hms_opt(8, 15, 0).unwrap());
    /// assert!(rush.is_peak && !rush.is_night);
    /// ```
    pub fn at(time: NaiveTime) -> Self {
        let hour = time.hour();
        Self {
            is_night: !(NIGHT_END_HOUR..NIGHT_START_HOUR).contains(&hour),
            is_peak: PEAK_HOURS.iter().any(|(start, end)| (*start..*end).contains(&hour)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> TimePeriod {
        TimePeriod::at(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn night_bounds() {
        assert!(at(20, 0).is_night);
        assert!(at(23, 59).is_night);
        assert!(at(0, 0).is_night);
        assert!(at(5, 59).is_night);
        assert!(!at(6, 0).is_night);
        assert!(!at(19, 59).is_night);
    }

    #[test]
    fn peak_bounds() {
        assert!(!at(6, 59).is_peak);
        assert!(at(7, 0).is_peak);
        assert!(at(8, 59).is_peak);
        assert!(!at(9, 0).is_peak);
        assert!(!at(16, 59).is_peak);
        assert!(at(17, 30).is_peak);
        assert!(!at(19, 0).is_peak);
    }

    #[test]
    fn midday_has_no_surcharge() {
        assert_eq!(at(12, 0), TimePeriod::default());
    }
}
