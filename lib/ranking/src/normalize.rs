//! Rank-based field normalization
//!
//! Converts one raw attribute across the whole population into a bounded
//! score per candidate. Scores come from rank position, not magnitude, so
//! arbitrary raw scales and outliers do not distort the result.
//! All scores are in range [0.0, max_score] where max_score is the most
//! favorable candidate.

use crate::schema::FieldSpec;
use ordered_float::OrderedFloat;

/// Decimal places every score is rounded to.
pub const SCORE_PRECISION: i32 = 10;

/// Round a score to [`SCORE_PRECISION`] decimal places.
///
/// Keeps tie detection and comparisons stable across runs that perform the
/// same arithmetic in a different order.
#[inline]
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_PRECISION);
    (score * factor).round() / factor
}

/// Normalize one field across the population
///
/// # Arguments
/// * `values` - Raw value per candidate, `None` where the candidate lacks it
/// * `spec` - Direction and max score of the field
///
/// # Returns
/// One entry per input value: `Some(score)` for present values, `None` for
/// missing ones. The caller owns what a missing value costs.
///
/// Present values are stably sorted worst-to-best and the value at position
/// `i` of `N` scores `i / (N - 1) * max_score`. A run of equal values all
/// take the score of the run's first position. A lone present value scores
/// `max_score`.
pub fn normalize_field(values: &[Option<f64>], spec: &FieldSpec) -> Vec<Option<f64>> {
    let mut scores = vec![None; values.len()];

    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| value.map(|v| (idx, v)))
        .collect();

    match present.len() {
        0 => return scores,
        1 => {
            scores[present[0].0] = Some(round_score(spec.max_score));
            return scores;
        }
        _ => {}
    }

    // Worst first.
    present.sort_by(|(_, a), (_, b)| {
        let ord = OrderedFloat(*a).cmp(&OrderedFloat(*b));
        if spec.higher_is_better {
            ord
        } else {
            ord.reverse()
        }
    });

    let last = (present.len() - 1) as f64;
    let mut run_start = 0usize;
    let mut run_value = present[0].1;

    for (position, (idx, value)) in present.iter().enumerate() {
        if OrderedFloat(*value) != OrderedFloat(run_value) {
            run_start = position;
            run_value = *value;
        }
        scores[*idx] = Some(round_score(run_start as f64 / last * spec.max_score));
    }

    scores
}
