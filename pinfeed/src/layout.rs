//! Greedy column-balancing masonry placement.
//!
//! Items are processed in input order and each one is appended to the column
//! with the smallest accumulated height, ties broken by the leftmost column.
//! One pass, no backtracking, O(n * k); the classic bin-balancing heuristic
//! applied online. Given deterministic height estimates, re-running the pass
//! over a longer item list reproduces the placement of the shorter prefix,
//! which is what keeps append-only pagination from reshuffling rows.

use derive_setters::Setters;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;
use tracing::trace;

use crate::{estimate::EstimatorArgs, pin::Pin};

/// Arguments for one placement pass.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct MasonryArgs {
    /// Number of columns. Must be at least 1.
    pub column_count: usize,
    /// Rendered width of one column.
    pub column_width: f32,
    /// Vertical gap added below every placed item.
    /// Negative values are treated as zero.
    pub gap: f32,
    /// Height estimation knobs.
    pub estimator: EstimatorArgs,
}

impl Default for MasonryArgs {
    fn default() -> Self {
        Self {
            column_count: 2,
            column_width: 164.0,
            gap: 16.0,
            estimator: EstimatorArgs::default(),
        }
    }
}

/// Errors from masonry placement configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The column count must be at least one.
    #[error("column count must be at least 1, got {0}")]
    InvalidColumnCount(usize),
}

/// A pin placed into a column, paired with its index in the input list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPin<'a> {
    /// Index of the pin in the input list handed to [`place_items`].
    pub index: usize,
    /// The placed pin.
    pub pin: &'a Pin,
}

/// Result of one placement pass.
///
/// Borrows the input pins; the placement never mutates or owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAssignment<'a> {
    columns: Vec<Vec<PlacedPin<'a>>>,
    heights: Vec<f32>,
    gap: f32,
}

impl<'a> ColumnAssignment<'a> {
    /// The per-column placements, in visual top-to-bottom order.
    pub fn columns(&self) -> &[Vec<PlacedPin<'a>>] {
        &self.columns
    }

    /// Number of columns in this assignment.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Accumulated estimated height of one column, including inter-item gaps.
    pub fn column_height(&self, column: usize) -> Option<f32> {
        self.heights.get(column).copied()
    }

    /// Estimated total content height: the tallest column minus its trailing
    /// gap. Zero for an empty assignment.
    pub fn estimated_height(&self) -> f32 {
        let tallest = self.heights.iter().copied().fold(0.0_f32, f32::max);
        if tallest == 0.0 {
            0.0
        } else {
            (tallest - self.gap).max(0.0)
        }
    }
}

/// Distributes `pins` across `args.column_count` columns.
///
/// Deterministic: the same input always yields the same assignment. The input
/// is only read; interaction state and ordering are untouched.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidColumnCount`] when the column count is zero.
pub fn place_items<'a>(
    pins: &'a [Pin],
    args: &MasonryArgs,
) -> Result<ColumnAssignment<'a>, LayoutError> {
    if args.column_count == 0 {
        return Err(LayoutError::InvalidColumnCount(args.column_count));
    }
    let gap = sanitize_gap(args.gap);

    let mut columns: Vec<Vec<PlacedPin<'a>>> = (0..args.column_count).map(|_| Vec::new()).collect();
    let mut offsets: SmallVec<[f32; 4]> = smallvec![0.0; args.column_count];

    for (index, pin) in pins.iter().enumerate() {
        let height = args.estimator.estimate(pin, args.column_width);
        let lane = shortest_lane(&offsets);
        columns[lane].push(PlacedPin { index, pin });
        offsets[lane] += height + gap;
    }

    trace!(
        items = pins.len(),
        columns = args.column_count,
        "masonry placement pass"
    );

    Ok(ColumnAssignment {
        columns,
        heights: offsets.to_vec(),
        gap,
    })
}

fn sanitize_gap(gap: f32) -> f32 {
    if gap.is_finite() && gap > 0.0 { gap } else { 0.0 }
}

fn shortest_lane(offsets: &[f32]) -> usize {
    let mut lane = 0;
    let mut best = offsets.first().copied().unwrap_or(0.0);
    for (index, offset) in offsets.iter().enumerate().skip(1) {
        if *offset < best {
            best = *offset;
            lane = index;
        }
    }
    lane
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::{ImageSource, PinDimensions};

    // With column_width = 75 and no footer: 3:4 estimates to 100, 3:2 to 50.
    fn args() -> MasonryArgs {
        MasonryArgs::default()
            .column_width(75.0)
            .gap(0.0)
            .estimator(EstimatorArgs::default().with_footer(false))
    }

    fn pin(id: &str, width: f32, height: f32) -> Pin {
        Pin::new(id, ImageSource::Local(0)).dimensions(PinDimensions::new(width, height))
    }

    fn ids<'a>(column: &'a [PlacedPin<'a>]) -> Vec<&'a str> {
        column.iter().map(|placed| placed.pin.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_columns() {
        let assignment = place_items(&[], &args()).expect("placement succeeds");
        assert_eq!(assignment.column_count(), 2);
        assert!(assignment.columns().iter().all(|column| column.is_empty()));
        assert_eq!(assignment.estimated_height(), 0.0);
    }

    #[test]
    fn test_single_column_preserves_order() {
        let pins = vec![pin("a", 3.0, 4.0), pin("b", 3.0, 2.0), pin("c", 1.0, 1.0)];
        let assignment = place_items(&pins, &args().column_count(1)).expect("placement succeeds");
        assert_eq!(ids(&assignment.columns()[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_zero_columns_rejected() {
        let result = place_items(&[], &args().column_count(0));
        assert_eq!(result, Err(LayoutError::InvalidColumnCount(0)));
    }

    #[test]
    fn test_shortest_column_with_leftmost_tie_break() {
        // Heights 100, 100, 50: the third item lands in the tied-lowest
        // leftmost column.
        let pins = vec![pin("a", 3.0, 4.0), pin("b", 3.0, 4.0), pin("c", 3.0, 2.0)];
        let assignment = place_items(&pins, &args()).expect("placement succeeds");
        assert_eq!(ids(&assignment.columns()[0]), vec!["a", "c"]);
        assert_eq!(ids(&assignment.columns()[1]), vec!["b"]);
    }

    #[test]
    fn test_placement_is_deterministic() {
        let pins: Vec<Pin> = (0..30)
            .map(|i| pin(&format!("p{i}"), 1.0 + (i % 5) as f32, 3.0))
            .collect();
        let first = place_items(&pins, &args()).expect("placement succeeds");
        let second = place_items(&pins, &args()).expect("placement succeeds");
        assert_eq!(first, second);
    }

    #[test]
    fn test_append_only_stability() {
        let pins: Vec<Pin> = (0..40)
            .map(|i| pin(&format!("p{i}"), 2.0 + (i % 7) as f32, 3.0 + (i % 3) as f32))
            .collect();
        let layout_args = args().column_count(3);

        let short = place_items(&pins[..25], &layout_args).expect("placement succeeds");
        let long = place_items(&pins, &layout_args).expect("placement succeeds");

        // Every pin from the shorter list sits in the same column, at the
        // same in-column position, in both assignments.
        for (column_index, column) in short.columns().iter().enumerate() {
            let long_column = &long.columns()[column_index];
            for (slot, placed) in column.iter().enumerate() {
                assert_eq!(long_column[slot].pin.id, placed.pin.id);
                assert_eq!(long_column[slot].index, placed.index);
            }
        }
    }

    #[test]
    fn test_balance_bound() {
        let layout_args = args().gap(8.0);
        let pins: Vec<Pin> = (0..50)
            .map(|i| pin(&format!("p{i}"), 1.0 + (i % 4) as f32, 2.0 + (i % 5) as f32))
            .collect();
        // Per-item estimated height is bounded by width / min_ratio.
        let max_height = 75.0 / layout_args.estimator.min_aspect_ratio;

        let assignment = place_items(&pins, &layout_args).expect("placement succeeds");
        let tallest = (0..2)
            .filter_map(|c| assignment.column_height(c))
            .fold(0.0_f32, f32::max);
        let shortest = (0..2)
            .filter_map(|c| assignment.column_height(c))
            .fold(f32::INFINITY, f32::min);
        assert!(tallest - shortest < max_height + 8.0);
    }

    #[test]
    fn test_input_not_mutated() {
        let pins = vec![pin("a", 3.0, 4.0), pin("b", 3.0, 2.0)];
        let before = pins.clone();
        let _ = place_items(&pins, &args()).expect("placement succeeds");
        assert_eq!(pins, before);
    }

    #[test]
    fn test_negative_gap_treated_as_zero() {
        let pins = vec![pin("a", 1.0, 1.0)];
        let assignment = place_items(&pins, &args().gap(-5.0)).expect("placement succeeds");
        assert_eq!(assignment.estimated_height(), 75.0);
    }
}
