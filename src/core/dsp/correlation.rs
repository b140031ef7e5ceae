//! Full linear correlation

use serde::Serialize;

/// Autocorrelation values paired with their integer shifts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub shifts: Vec<i64>,
    pub values: Vec<f64>,
}

impl Correlation {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at the given shift, if it is inside the result
    pub fn at_shift(&self, shift: i64) -> Option<f64> {
        let first = *self.shifts.first()?;
        let idx = usize::try_from(shift - first).ok()?;
        self.values.get(idx).copied()
    }
}

/// Cross-correlation of `a` with `v` over every partial overlap.
///
/// `c[i] = sum_n a[n + k] * v[n]` with `k = i - (v.len() - 1)`; samples
/// outside either sequence count as zero. Output length is
/// `a.len() + v.len() - 1`, or zero if either input is empty.
pub fn correlate_full(a: &[f64], v: &[f64]) -> Vec<f64> {
    if a.is_empty() || v.is_empty() {
        return Vec::new();
    }
    let len = a.len() + v.len() - 1;
    let lag0 = v.len() as i64 - 1;

    (0..len)
        .map(|i| {
            let k = i as i64 - lag0;
            // n ranges over indices where both a[n + k] and v[n] exist
            let n_start = (-k).max(0) as usize;
            let n_end = (a.len() as i64 - k).min(v.len() as i64).max(0) as usize;
            (n_start..n_end)
                .map(|n| a[(n as i64 + k) as usize] * v[n])
                .sum()
        })
        .collect()
}

/// Unnormalized autocorrelation at all `2N - 1` shifts
pub fn autocorrelate(samples: &[f64]) -> Correlation {
    let values = correlate_full(samples, samples);
    let lag0 = samples.len() as i64 - 1;
    let shifts = (0..values.len() as i64).map(|i| i - lag0).collect();
    Correlation { shifts, values }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlate_full_matches_definition() {
        // numpy.correlate([1, 2, 3], [0, 1, 0.5], 'full')
        let c = correlate_full(&[1.0, 2.0, 3.0], &[0.0, 1.0, 0.5]);
        assert_eq!(c, vec![0.5, 2.0, 3.5, 3.0, 0.0]);
    }

    #[test]
    fn test_correlate_full_unequal_lengths() {
        let c = correlate_full(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0]);
        assert_eq!(c, vec![1.0, 3.0, 5.0, 7.0, 4.0]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(correlate_full(&[], &[1.0]).is_empty());
        assert!(autocorrelate(&[]).is_empty());
    }

    #[test]
    fn test_autocorrelate_shifts() {
        let ac = autocorrelate(&[1.0, 2.0, 3.0]);
        assert_eq!(ac.shifts, vec![-2, -1, 0, 1, 2]);
        assert_eq!(ac.values, vec![3.0, 8.0, 14.0, 8.0, 3.0]);
        assert_eq!(ac.at_shift(0), Some(14.0));
        assert_eq!(ac.at_shift(3), None);
        assert_eq!(ac.at_shift(-3), None);
    }
}
