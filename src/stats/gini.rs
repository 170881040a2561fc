//! Gini coefficient over agent wealth

use crate::core::types::Wealth;

/// Twice the area between the Lorenz curve and the line of equality
///
/// Returns exactly 0.0 for an empty input, a single value, any uniform
/// multiset, or a non-positive total. Input order does not matter.
pub fn gini(wealths: &[Wealth]) -> f64 {
    let mut sorted = wealths.to_vec();
    sorted.sort_unstable();

    let (Some(&lowest), Some(&highest)) = (sorted.first(), sorted.last()) else {
        return 0.0;
    };
    if lowest == highest {
        return 0.0;
    }

    let total: Wealth = sorted.iter().sum();
    if total <= 0 {
        return 0.0;
    }
    let total = total as f64;
    let n = sorted.len() as f64;

    let mut cumulative = 0.0;
    let mut area = 0.0;
    for (rank, &wealth) in sorted.iter().enumerate() {
        let x1 = rank as f64 / n;
        let x2 = (rank + 1) as f64 / n;
        let y1 = cumulative / total;
        cumulative += wealth as f64;
        let y2 = cumulative / total;

        let under_equality = (x2 - x1) * (x1 + x2) / 2.0;
        let under_lorenz = (x2 - x1) * (y1 + y2) / 2.0;
        area += under_equality - under_lorenz;
    }

    // float noise can push a near-equal distribution fractionally below zero
    (area * 2.0).max(0.0)
}
