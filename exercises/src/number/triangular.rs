use std::iter::FusedIterator;

use super::divisors::divisor_count;

/// The `n`th triangular number `n(n + 1) / 2`, or `None` if it overflows `u64`.
pub fn triangular(n: u64) -> Option<u64> {
    // Halve whichever factor is even before multiplying.
    if n % 2 == 0 {
        (n / 2).checked_mul(n + 1)
    } else {
        n.checked_mul(n / 2 + 1)
    }
}

/// Divisor count of the `n`th triangular number.
///
/// `n` and `n + 1` are coprime, so once the factor 2 is taken out of the even
/// one, the divisor count is the product of the two halves' counts. The
/// triangle itself is never formed, so this works for every `n`.
pub fn triangle_divisor_count(n: u64) -> u64 {
    if n % 2 == 0 {
        divisor_count(n / 2) * divisor_count(n + 1)
    } else {
        divisor_count(n) * divisor_count(n / 2 + 1)
    }
}

/// Iterator over `(index, value)` of the triangular numbers 1, 3, 6, 10, ...
/// Ends once the next value would overflow `u64`.
#[derive(Debug, Clone)]
pub struct Triangulars {
    index: u64,
    value: u64,
}

impl Triangulars {
    pub fn new() -> Self {
        Self { index: 0, value: 0 }
    }
}

impl Default for Triangulars {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Triangulars {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index + 1;
        let value = self.value.checked_add(index)?;
        self.index = index;
        self.value = value;
        Some((index, value))
    }
}

impl FusedIterator for Triangulars {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ten_terms() {
        let values: Vec<u64> = Triangulars::new().take(10).map(|(_, value)| value).collect();
        assert_eq!(values, vec![1, 3, 6, 10, 15, 21, 28, 36, 45, 55]);
    }

    #[test]
    fn closed_form_matches_iterator() {
        for (index, value) in Triangulars::new().take(1_000) {
            assert_eq!(triangular(index), Some(value));
        }
        assert_eq!(triangular(0), Some(0));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(triangular(u64::MAX), None);
        // Largest index whose triangle still fits.
        assert!(triangular(6_074_000_999).is_some());
        assert!(triangular(6_074_001_000).is_none());
    }

    #[test]
    fn split_count_matches_direct_count() {
        for n in 1..=3_000 {
            let value = triangular(n).unwrap();
            assert_eq!(triangle_divisor_count(n), divisor_count(value), "n = {n}");
        }
        assert_eq!(triangle_divisor_count(7), 6);
    }
}
