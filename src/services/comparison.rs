//! Cross-asset comparison: rebased overlay and close-price correlation.

use crate::render::{render_normalized_chart, Block, Section};
use crate::types::{CoMovement, ComparisonOutcome, EnrichedSeries, NormalizedPoint};
use std::collections::HashMap;

pub const CORRELATION_THRESHOLD: f64 = 0.3;

/// Fewest shared timestamps needed to compute a correlation.
pub const MIN_OVERLAP: usize = 2;

/// Rebase closes to 100 at the series' first observation.
///
/// Each series uses its own first row as the base, so two rebased series
/// can start at different timestamps when their histories differ.
pub fn normalize(series: &EnrichedSeries) -> Vec<NormalizedPoint> {
    let Some(first) = series.points.first().map(|p| p.bar.close) else {
        return Vec::new();
    };

    series
        .points
        .iter()
        .map(|p| NormalizedPoint {
            time: p.bar.time,
            value: p.bar.close / first * 100.0,
        })
        .collect()
}

/// Inner-join closes on timestamp, in `a`'s time order.
pub fn align_closes(a: &EnrichedSeries, b: &EnrichedSeries) -> Vec<(i64, f64, f64)> {
    let b_closes: HashMap<i64, f64> = b.points.iter().map(|p| (p.bar.time, p.bar.close)).collect();

    a.points
        .iter()
        .filter_map(|p| {
            b_closes
                .get(&p.bar.time)
                .map(|close_b| (p.bar.time, p.bar.close, *close_b))
        })
        .collect()
}

/// Pearson correlation coefficient.
/// Returns value from -1.0 to +1.0, or `None` when it is undefined.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < MIN_OVERLAP {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x: f64 = xs.iter().sum::<f64>() / n;
    let mean_y: f64 = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x < 1e-10 || var_y < 1e-10 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

pub fn classify_correlation(correlation: f64) -> CoMovement {
    if correlation > CORRELATION_THRESHOLD {
        CoMovement::PositiveCoMovement
    } else if correlation < -CORRELATION_THRESHOLD {
        CoMovement::NegativeCoMovement
    } else {
        CoMovement::NoClearRelationship
    }
}

/// Correlate the aligned closes of two series.
pub fn compare(a: &EnrichedSeries, b: &EnrichedSeries) -> ComparisonOutcome {
    let aligned = align_closes(a, b);
    let overlap = aligned.len();

    let xs: Vec<f64> = aligned.iter().map(|(_, x, _)| *x).collect();
    let ys: Vec<f64> = aligned.iter().map(|(_, _, y)| *y).collect();

    match pearson(&xs, &ys) {
        Some(correlation) => ComparisonOutcome::Computed {
            correlation,
            co_movement: classify_correlation(correlation),
            overlap,
        },
        None => ComparisonOutcome::InsufficientOverlap { overlap },
    }
}

/// Render the comparison view for the series loaded in this turn.
///
/// A missing series means the caller never loaded it, which is an
/// instruction for the user rather than an error.
pub fn render_comparison(
    first: Option<(&str, &EnrichedSeries)>,
    second: Option<(&str, &EnrichedSeries)>,
    section: &mut Section,
) {
    let (Some((label_a, a)), Some((label_b, b))) = (first, second) else {
        section.info("Load both the index and commodity views to compare them.");
        return;
    };

    render_normalized_chart(
        &[(label_a, normalize(a)), (label_b, normalize(b))],
        &format!("{} vs {} (rebased to 100)", label_a, label_b),
        section,
    );

    match compare(a, b) {
        ComparisonOutcome::Computed {
            correlation,
            co_movement,
            overlap,
        } => {
            section.push(Block::Metric {
                label: format!("{} / {} correlation", label_a, label_b),
                value: format!("{:.2}", correlation),
                caption: format!("{} ({} shared bars)", co_movement.label(), overlap),
            });
            section.info(format!(
                "{} and {} show {}.",
                label_a,
                label_b,
                co_movement.label()
            ));
        }
        ComparisonOutcome::InsufficientOverlap { .. } => {
            section.warning("Insufficient overlapping data to compute correlation.");
        }
    }
}
