//! Split proportion validation.
//!
//! Proportions are fractions of the parent's extent along the split axis.
//! Their sum may fall short of 1.0 (the last child absorbs the remainder) or
//! overshoot it slightly through rounding. Anything above 1.0 in a single
//! entry is an absolute-size request, which splitting does not support.

use crate::error::PaneRejection;

/// Default allowed overshoot of the proportion sum above 1.0.
pub const DEFAULT_SPLIT_TOLERANCE: f64 = 0.05;

/// Outcome of validating a proportion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPlan {
    /// One part requested: the pane stays as it is.
    Unsplit,
    /// Split into this many children.
    Parts(usize),
}

/// Check `proportions` against the split policy.
///
/// Rules, in order: an empty list is rejected; a single entry means no split;
/// negative or non-finite entries are rejected; any entry above `1.0` is an
/// absolute-dimension request and rejected; finally the list is rejected when
/// `sum > 1.0 + tolerance` and the sum without the last entry is still below
/// `1.0`.
pub fn check_proportions(proportions: &[f64], tolerance: f64) -> Result<SplitPlan, PaneRejection> {
    match proportions {
        [] => return Err(PaneRejection::NoProportions),
        [_] => return Ok(SplitPlan::Unsplit),
        _ => {}
    }

    for (index, &value) in proportions.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(PaneRejection::InvalidProportion { index, value });
        }
        if value > 1.0 {
            return Err(PaneRejection::AbsoluteDimension { index, value });
        }
    }

    let sum: f64 = proportions.iter().sum();
    let last = proportions[proportions.len() - 1];
    if sum > 1.0 + tolerance && sum - last < 1.0 {
        return Err(PaneRejection::OutOfTolerance { sum, tolerance });
    }

    Ok(SplitPlan::Parts(proportions.len()))
}
