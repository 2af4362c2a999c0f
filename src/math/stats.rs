//! Scalar statistics over column slices.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator).
///
/// Returns 0.0 when fewer than two observations; a constant column therefore
/// yields 0.0, which callers must treat as degenerate before dividing by it.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_basic() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v) - 5.0).abs() < 1e-12);
        // Sample variance of this classic set is 32/7.
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((sample_std(&v) - expected).abs() < 1e-12);
    }

    #[test]
    fn constant_column_has_zero_std() {
        let v = [3.0; 10];
        assert_eq!(sample_std(&v), 0.0);
    }
}
