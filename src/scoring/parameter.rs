//! Single-parameter score
//!
//! Piecewise-linear fit of a measurement against a `ParameterRange`:
//!
//! ```text
//!  1.0 |            ________________
//!      |          /                  \
//!  0.5 |        /                      \
//!      |      /                          \
//!  0.0 |____/                              \____
//!         0   min  opt_min      opt_max  max   2*max
//! ```
//!
//! Inside the optimal window the score is exactly 1.0. Between the absolute
//! bound and the window it ramps linearly from 0.5 to 1.0. Beyond the
//! absolute bound it decays from 0.5 towards 0, relative to the bound itself.

use crate::catalog::ParameterRange;

/// Score how well `value` fits `range`, in [0, 1]
///
/// Non-finite values score 0. When the decay divisor (`min` below the range,
/// `max` above it) is zero the score is 0, since any value beyond a zero
/// bound is as far from it as the ramp can express.
pub fn score_parameter(value: f64, range: &ParameterRange) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    let ParameterRange { min, max, optimal_min, optimal_max, .. } = *range;

    if value >= optimal_min && value <= optimal_max {
        return 1.0;
    }

    if value >= min && value < optimal_min {
        return 0.5 + 0.5 * (value - min) / (optimal_min - min);
    }

    if value > optimal_max && value <= max {
        return 0.5 + 0.5 * (max - value) / (max - optimal_max);
    }

    if value < min {
        if min == 0.0 {
            return 0.0;
        }
        return (0.5 * (1.0 - (min - value) / min)).max(0.0);
    }

    // value > max
    if max == 0.0 {
        return 0.0;
    }
    (0.5 * (1.0 - (value - max) / max)).max(0.0)
}
