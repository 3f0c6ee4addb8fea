//! Minutes/seconds picker selection

use std::{ops::RangeInclusive, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selectable minutes
pub const MINUTES: RangeInclusive<u32> = 0..=60;
/// Selectable seconds
pub const SECONDS: RangeInclusive<u32> = 0..=59;

/// Rejected picker input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    #[error("minutes must be between 0 and 60, got {0}")]
    Minutes(u32),
    #[error("seconds must be between 0 and 59, got {0}")]
    Seconds(u32),
}

/// A selection in the two-column duration picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerSelection {
    minutes: u32,
    seconds: u32,
}

impl PickerSelection {
    /// Create a selection, rejecting rows the picker does not offer
    pub fn new(minutes: u32, seconds: u32) -> Result<Self, PickerError> {
        if !MINUTES.contains(&minutes) {
            return Err(PickerError::Minutes(minutes));
        }
        if !SECONDS.contains(&seconds) {
            return Err(PickerError::Seconds(seconds));
        }
        Ok(Self { minutes, seconds })
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Total countdown length for this selection
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes) * 60 + u64::from(self.seconds))
    }
}

impl Default for PickerSelection {
    /// One minute thirty seconds is preselected
    fn default() -> Self {
        Self {
            minutes: 1,
            seconds: 30,
        }
    }
}

/// The picker's four columns: minute values, "min", second values, "sec"
pub fn picker_columns() -> Vec<Vec<String>> {
    let minutes: Vec<String> = MINUTES.map(|m| m.to_string()).collect();
    let seconds: Vec<String> = SECONDS.map(|s| s.to_string()).collect();
    vec![
        minutes,
        vec!["min".to_string()],
        seconds,
        vec!["sec".to_string()],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_total_seconds() {
        let selection = PickerSelection::new(1, 30).unwrap();
        assert_eq!(selection.duration(), Duration::from_secs(90));
        assert_eq!(
            PickerSelection::new(60, 59).unwrap().duration(),
            Duration::from_secs(3659)
        );
        assert_eq!(PickerSelection::new(0, 0).unwrap().duration(), Duration::ZERO);
    }

    #[test]
    fn rejects_out_of_range_rows() {
        assert_eq!(PickerSelection::new(61, 0), Err(PickerError::Minutes(61)));
        assert_eq!(PickerSelection::new(0, 60), Err(PickerError::Seconds(60)));
        assert_eq!(
            PickerError::Seconds(60).to_string(),
            "seconds must be between 0 and 59, got 60"
        );
    }

    #[test]
    fn default_is_ninety_seconds() {
        assert_eq!(PickerSelection::default().duration(), Duration::from_secs(90));
    }

    #[test]
    fn columns_match_picker_layout() {
        let columns = picker_columns();
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].len(), 61);
        assert_eq!(columns[0].first().map(String::as_str), Some("0"));
        assert_eq!(columns[0].last().map(String::as_str), Some("60"));
        assert_eq!(columns[1], vec!["min"]);
        assert_eq!(columns[2].len(), 60);
        assert_eq!(columns[3], vec!["sec"]);
    }
}
