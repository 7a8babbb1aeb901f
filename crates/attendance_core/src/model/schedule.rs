//! Weekly schedule model: time slots and timetable entries.
//!
//! # Invariants
//! - `(day, slot_number)` identifies at most one `TimetableEntry`; the
//!   service enforces this on insert.
//! - Slot numbers are positive and conceptually unique within the slot list.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One teaching period of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub slot_number: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TimeSlot {
    pub fn new(slot_number: u32, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            slot_number,
            start_time,
            end_time,
        }
    }

    /// Six one-hour slots from 09:00 to 16:00, skipping the 12:00 lunch hour.
    pub fn default_day() -> Vec<TimeSlot> {
        const STARTS: [u32; 6] = [9, 10, 11, 13, 14, 15];
        STARTS
            .iter()
            .zip(1u32..)
            .filter_map(|(&hour, slot_number)| {
                let start = NaiveTime::from_hms_opt(hour, 0, 0)?;
                let end = NaiveTime::from_hms_opt(hour + 1, 0, 0)?;
                Some(TimeSlot::new(slot_number, start, end))
            })
            .collect()
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot {} ({} - {})",
            self.slot_number,
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// Assignment of one subject to a slot on a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub day: Weekday,
    pub slot_number: u32,
    pub subject_code: String,
}

impl TimetableEntry {
    pub fn new(day: Weekday, slot_number: u32, subject_code: impl Into<String>) -> Self {
        Self {
            day,
            slot_number,
            subject_code: subject_code.into(),
        }
    }

    /// Returns whether this entry occupies `(day, slot_number)`.
    pub fn occupies(&self, day: Weekday, slot_number: u32) -> bool {
        self.day == day && self.slot_number == slot_number
    }
}

#[cfg(test)]
mod tests {
    use super::TimeSlot;

    #[test]
    fn default_day_has_six_hour_slots_without_lunch() {
        let slots = TimeSlot::default_day();
        assert_eq!(slots.len(), 6);
        assert_eq!(
            slots.iter().map(|slot| slot.slot_number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
        assert_eq!(slots[0].to_string(), "Slot 1 (09:00 - 10:00)");
        assert_eq!(slots[2].to_string(), "Slot 3 (11:00 - 12:00)");
        assert_eq!(slots[3].to_string(), "Slot 4 (13:00 - 14:00)");
        assert_eq!(slots[5].to_string(), "Slot 6 (15:00 - 16:00)");
    }
}
