//! Wall-clock time of day used for shifts, surgery starts and grid slots.
//!
//! # Invariants
//! - `hour` is in `0..=23`, `minute` is in `0..=59`.
//! - Text form is always zero-padded `HH:MM`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MINUTES_PER_HOUR: u32 = 60;
const HOURS_PER_DAY: u32 = 24;

/// Error returned when clock text cannot be parsed into a valid time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockTimeError {
    /// Input is not shaped like `H:MM` or `HH:MM`.
    Malformed(String),
    /// Input is shaped correctly but the components are out of range.
    OutOfRange { hour: u32, minute: u32 },
}

impl Display for ClockTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "malformed clock time `{value}`; expected HH:MM"),
            Self::OutOfRange { hour, minute } => {
                write!(f, "clock time {hour}:{minute:02} is out of range")
            }
        }
    }
}

impl Error for ClockTimeError {}

/// Time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    pub fn new(hour: u32, minute: u32) -> Result<Self, ClockTimeError> {
        if hour >= HOURS_PER_DAY || minute >= MINUTES_PER_HOUR {
            return Err(ClockTimeError::OutOfRange { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Parses `H:MM` or `HH:MM` (surrounding whitespace ignored).
    pub fn parse(text: &str) -> Result<Self, ClockTimeError> {
        let trimmed = text.trim();
        let malformed = || ClockTimeError::Malformed(trimmed.to_string());

        let (hour_text, minute_text) = trimmed.split_once(':').ok_or_else(malformed)?;
        if hour_text.is_empty()
            || hour_text.len() > 2
            || minute_text.len() != 2
            || !hour_text.chars().all(|c| c.is_ascii_digit())
            || !minute_text.chars().all(|c| c.is_ascii_digit())
        {
            return Err(malformed());
        }

        let hour = hour_text.parse::<u32>().map_err(|_| malformed())?;
        let minute = minute_text.parse::<u32>().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.minute)
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.hour() * MINUTES_PER_HOUR + self.minute()
    }

    /// Adds whole hours, wrapping past midnight. Minutes are preserved.
    pub fn add_hours(self, hours: u32) -> Self {
        Self {
            hour: ((self.hour() + hours) % HOURS_PER_DAY) as u8,
            minute: self.minute,
        }
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockTime, ClockTimeError};

    #[test]
    fn parse_accepts_single_digit_hour_and_pads_on_display() {
        let time = ClockTime::parse("7:05").unwrap();
        assert_eq!(time.hour(), 7);
        assert_eq!(time.minute(), 5);
        assert_eq!(time.to_string(), "07:05");
    }

    #[test]
    fn parse_rejects_garbage_and_out_of_range() {
        assert!(matches!(
            ClockTime::parse("seven"),
            Err(ClockTimeError::Malformed(_))
        ));
        assert!(matches!(
            ClockTime::parse("10:5"),
            Err(ClockTimeError::Malformed(_))
        ));
        assert_eq!(
            ClockTime::parse("24:00"),
            Err(ClockTimeError::OutOfRange {
                hour: 24,
                minute: 0
            })
        );
    }

    #[test]
    fn add_hours_wraps_past_midnight() {
        let late = ClockTime::parse("23:30").unwrap();
        assert_eq!(late.add_hours(2).to_string(), "01:30");
        assert_eq!(late.add_hours(24), late);
    }

    #[test]
    fn serde_uses_text_form() {
        let time = ClockTime::parse("09:15").unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"09:15\"");
        let back: ClockTime = serde_json::from_str("\"9:15\"").unwrap();
        assert_eq!(back, time);
        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }
}
