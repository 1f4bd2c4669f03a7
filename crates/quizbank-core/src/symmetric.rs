//! Step-based symmetric option generation (second generation).
//!
//! Derives an arithmetic step from the magnitude of the correct value and
//! lists every step between a few steps below and a few steps above it.
//! Output is ascending, not shuffled.

use rand::Rng;

use crate::answer::{format_number, Answer};
use crate::config::EngineConfig;

/// Step size for a correct value, by precedence:
///
/// 1. `>= 10` and a multiple of 10 -> 10
/// 2. `>= 5` and a multiple of 5 -> 5
/// 3. `< 5` -> 0.5
/// 4. otherwise 10 if `>= 10`, else 5
pub fn step_for(value: f64) -> f64 {
    if value >= 10.0 && value % 10.0 == 0.0 {
        10.0
    } else if value >= 5.0 && value % 5.0 == 0.0 {
        5.0
    } else if value < 5.0 {
        0.5
    } else if value >= 10.0 {
        10.0
    } else {
        5.0
    }
}

/// Grow `step` by powers of ten until neighbouring grid points stay distinct
/// at the magnitude of `value`.
fn widen_step(value: f64, mut step: f64) -> f64 {
    while step <= value.abs() * f64::EPSILON {
        step *= 10.0;
    }
    step
}

/// Build the second-generation option list.
///
/// A non-empty `predefined` list is returned verbatim. A label answer
/// yields just itself. A numeric answer yields `lower + k * step` for every
/// `k` up to `correct + above * step`, where `lower = max(0, correct - below
/// * step)`, plus the correct value itself, sorted ascending. Past 2^53 the
/// step is widened so the grid does not collapse onto the correct value.
pub fn generate_symmetric<R: Rng + ?Sized>(
    correct: &Answer,
    predefined: Option<&[String]>,
    config: &EngineConfig,
    rng: &mut R,
) -> Vec<String> {
    if let Some(options) = predefined.filter(|options| !options.is_empty()) {
        return options.to_vec();
    }

    let Some(value) = correct.value() else {
        return vec![correct.text().to_string()];
    };

    let step = widen_step(value, step_for(value));
    let below = rng.gen_range(config.below.min..=config.below.max);
    let above = rng.gen_range(config.above.min..=config.above.max);

    // At most `below + above + 1` grid points, whatever the magnitude.
    let mut values: Vec<f64> = if value - step * f64::from(below) < 0.0 {
        // Clamped at zero: the grid restarts from 0 rather than from `correct`.
        let upper = value + step * f64::from(above);
        let last = (upper / step + 1e-9).floor().min(f64::from(below + above));
        if last < 0.0 {
            Vec::new()
        } else {
            (0..=last as u32).map(|k| step * f64::from(k)).collect()
        }
    } else {
        (0..=below + above)
            .map(|k| value + step * (f64::from(k) - f64::from(below)))
            .collect()
    };

    let correct_text = format_number(value);
    if !values.iter().any(|v| format_number(*v) == correct_text) {
        values.push(value);
    }

    values.sort_by(f64::total_cmp);
    let mut options: Vec<String> = values.into_iter().map(format_number).collect();
    options.dedup();

    tracing::trace!(
        correct = correct.text(),
        step,
        below,
        above,
        count = options.len(),
        "enumerated symmetric options"
    );

    options
}
