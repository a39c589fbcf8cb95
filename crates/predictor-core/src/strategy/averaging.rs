//! Next-Date Averaging
//!
//! The next date is the last date of a trailing window reflected around the
//! window's mean timestamp: `last + (last - mean)`.

use chrono::NaiveDateTime;

use crate::dates::{from_epoch_millis, to_epoch_millis};
use crate::model::PlanCategory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AveragingStrategy {
    /// Last two transaction dates
    BiAverage,
    /// Last three transaction dates
    TriAverage,
}

impl AveragingStrategy {
    pub const fn window(self) -> usize {
        match self {
            Self::BiAverage => 2,
            Self::TriAverage => 3,
        }
    }

    pub const fn for_category(category: PlanCategory) -> Self {
        match category {
            PlanCategory::BiAverage => Self::BiAverage,
            PlanCategory::TriAverage => Self::TriAverage,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::BiAverage => "bi-average",
            Self::TriAverage => "tri-average",
        }
    }

    pub fn next_date(self, dates: &[NaiveDateTime]) -> Option<NaiveDateTime> {
        predict_next(dates, self.window())
    }
}

/// Predict the date following `dates` using at most `window` trailing entries.
///
/// A shorter history shrinks the window. Returns `None` for an empty history
/// or when the result is outside the representable range.
pub fn predict_next(dates: &[NaiveDateTime], window: usize) -> Option<NaiveDateTime> {
    let tail = &dates[dates.len().saturating_sub(window.max(1))..];
    let last = to_epoch_millis(*tail.last()?);

    let sum = tail
        .iter()
        .try_fold(0_i64, |acc, d| acc.checked_add(to_epoch_millis(*d)))?;
    // Integer division truncates toward zero
    let mean = sum / i64::try_from(tail.len()).ok()?;

    let offset = last.checked_sub(mean)?;
    from_epoch_millis(last.checked_add(offset)?)
}
