//! The collection schedule calculator.
//!
//! Pure date arithmetic against two fixed anchors. Every evaluation reads
//! only the anchors and the supplied day, so calls are re-entrant and safe
//! to issue concurrently from multiple sensors.

use chrono::{Days, NaiveDate};

use crate::model::{BinType, CollectionResult, Cycle, NextCollection};
use crate::ports::ScheduleError;

/// Each bin type is collected once every two weeks.
pub const COLLECTION_INTERVAL_DAYS: i64 = 14;

/// Black bin reference collection: Thursday, 1 January 2026.
const BLACK_ANCHOR: (i32, u32, u32) = (2026, 1, 1);

/// The green and brown bins run exactly one week behind the black bin, so
/// together the two cycles cover every Thursday and never coincide.
const GREEN_BROWN_OFFSET_DAYS: u64 = 7;

/// Calculator holding the two fixed cycles.
///
/// Constructed once and shared by the sensor adapters; it has no mutable
/// state of its own.
pub struct ScheduleCalculator {
    black: Cycle,
    green_brown: Cycle,
}

impl ScheduleCalculator {
    /// Build the calculator with the Greyhound anchors.
    #[must_use]
    pub fn new() -> Self {
        let (year, month, day) = BLACK_ANCHOR;
        let black_anchor =
            NaiveDate::from_ymd_opt(year, month, day).expect("black anchor is a valid date");
        let green_brown_anchor = black_anchor
            .checked_add_days(Days::new(GREEN_BROWN_OFFSET_DAYS))
            .expect("green/brown anchor is a valid date");

        Self {
            black: Cycle {
                bin_type: BinType::Black,
                anchor: black_anchor,
            },
            green_brown: Cycle {
                bin_type: BinType::GreenBrown,
                anchor: green_brown_anchor,
            },
        }
    }

    /// The cycle for the given bin type.
    #[must_use]
    pub const fn cycle(&self, bin_type: BinType) -> Cycle {
        match bin_type {
            BinType::Black => self.black,
            BinType::GreenBrown => self.green_brown,
        }
    }

    /// Both cycles, black first. The ordering doubles as the documented
    /// tie-break preference in [`Self::next_overall`].
    #[must_use]
    pub const fn cycles(&self) -> [Cycle; 2] {
        [self.black, self.green_brown]
    }

    /// Next collection for one bin type on or after `today`.
    ///
    /// The day offset from the anchor is reduced with `rem_euclid`, which
    /// stays in `[0, 14)` even when `today` precedes the anchor, so no sign
    /// branching is needed. A remainder of 0 means `today` is itself a
    /// collection day.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DateOutOfRange`] if the computed collection
    /// date would leave the representable calendar range.
    pub fn next_occurrence(
        &self,
        bin_type: BinType,
        today: NaiveDate,
    ) -> Result<CollectionResult, ScheduleError> {
        let cycle = self.cycle(bin_type);
        let offset = (today - cycle.anchor)
            .num_days()
            .rem_euclid(COLLECTION_INTERVAL_DAYS);
        let days_until = if offset == 0 {
            0
        } else {
            COLLECTION_INTERVAL_DAYS - offset
        };

        let collection_date = today
            .checked_add_days(Days::new(days_until.unsigned_abs()))
            .ok_or(ScheduleError::DateOutOfRange {
                base: today,
                days_ahead: days_until,
            })?;

        Ok(result_for(collection_date, today))
    }

    /// Next collection across both cycles, whichever is sooner.
    ///
    /// Both cycles are computed independently and compared; the 7-day anchor
    /// offset makes a tie impossible, but should the anchors ever change,
    /// the black cycle (listed first) wins a tie.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DateOutOfRange`] if either cycle's
    /// collection date would leave the representable calendar range.
    pub fn next_overall(&self, today: NaiveDate) -> Result<NextCollection, ScheduleError> {
        let black = self.next_occurrence(BinType::Black, today)?;
        let green_brown = self.next_occurrence(BinType::GreenBrown, today)?;

        if black.days_until <= green_brown.days_until {
            Ok(NextCollection {
                bin_type: BinType::Black,
                result: black,
            })
        } else {
            Ok(NextCollection {
                bin_type: BinType::GreenBrown,
                result: green_brown,
            })
        }
    }

    /// The next `count` collections across both cycles, in date order.
    ///
    /// Each entry's `days_until` is relative to `today`. Collections
    /// alternate between the two bin types since the cycles interleave one
    /// week apart.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DateOutOfRange`] if a collection date would
    /// leave the representable calendar range.
    pub fn upcoming(
        &self,
        today: NaiveDate,
        count: usize,
    ) -> Result<Vec<NextCollection>, ScheduleError> {
        let mut black_next = self.next_occurrence(BinType::Black, today)?.collection_date;
        let mut green_brown_next = self
            .next_occurrence(BinType::GreenBrown, today)?
            .collection_date;

        let mut events = Vec::with_capacity(count);
        while events.len() < count {
            // Pick whichever cycle's pending date is sooner, then advance
            // that cycle by one interval.
            let (bin_type, slot) = if black_next <= green_brown_next {
                (BinType::Black, &mut black_next)
            } else {
                (BinType::GreenBrown, &mut green_brown_next)
            };
            let date = *slot;

            events.push(NextCollection {
                bin_type,
                result: result_for(date, today),
            });

            *slot = date
                .checked_add_days(Days::new(COLLECTION_INTERVAL_DAYS.unsigned_abs()))
                .ok_or(ScheduleError::DateOutOfRange {
                    base: date,
                    days_ahead: COLLECTION_INTERVAL_DAYS,
                })?;
        }

        Ok(events)
    }
}

impl Default for ScheduleCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn result_for(collection_date: NaiveDate, today: NaiveDate) -> CollectionResult {
    let days_until = (collection_date - today).num_days();
    CollectionResult {
        collection_date,
        days_until,
        is_today: days_until == 0,
        is_tomorrow: days_until == 1,
        collection_day: collection_date.format("%A").to_string(),
    }
}
