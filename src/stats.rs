//! Basic summary statistics over `f64` slices.
//!
//! Small local helpers used throughout the engine. All return `None` on
//! empty or too-short input rather than producing NaN.

/// Arithmetic mean. `None` if the slice is empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (n − 1 denominator).
///
/// `None` if fewer than 2 values.
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    Some((ss / (data.len() - 1) as f64).sqrt())
}
