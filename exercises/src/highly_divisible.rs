//! Search for the first triangular number with more than a given number of divisors.
//!
//! The classic instance asks for more than 500 divisors. With a threshold of
//! five the answer is 28, the seventh triangle:
//!
//! ```text
//!  1: 1
//!  3: 1, 3
//!  6: 1, 2, 3, 6
//! 10: 1, 2, 5, 10
//! 15: 1, 3, 5, 15
//! 21: 1, 3, 7, 21
//! 28: 1, 2, 4, 7, 14, 28
//! ```

use log::{debug, info};

use crate::{
    error::SearchError,
    number::{triangle_divisor_count, Triangulars},
};

const PROGRESS_EVERY: u64 = 10_000;

/// A triangular number together with its position and divisor count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub index: u64,
    pub value: u64,
    pub divisors: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Skip odd triangles. This happens to keep the answer for a threshold of
    /// 500 but is wrong in general: for a threshold of 1 it yields 6 instead of 3.
    pub even_only: bool,
    /// Stop with [`SearchError::Exhausted`] after this index.
    pub max_index: Option<u64>,
}

/// Smallest triangular number with strictly more than `threshold` divisors.
pub fn first_triangle_over(threshold: u64) -> Result<Triangle, SearchError> {
    search(threshold, &SearchOptions::default())
}

/// Like [`first_triangle_over`], with the given options applied.
///
/// Without `max_index` the search only ends on success or when the triangles
/// no longer fit in `u64`.
pub fn search(threshold: u64, options: &SearchOptions) -> Result<Triangle, SearchError> {
    debug!("searching for a triangle with more than {threshold} divisors ({options:?})");

    for (index, value) in Triangulars::new() {
        if let Some(max_index) = options.max_index {
            if index > max_index {
                return Err(SearchError::Exhausted { threshold, max_index });
            }
        }
        if index % PROGRESS_EVERY == 0 {
            debug!("reached triangle #{index} ({value})");
        }
        if options.even_only && value % 2 != 0 {
            continue;
        }

        let divisors = triangle_divisor_count(index);
        if divisors > threshold {
            info!("triangle #{index} = {value} has {divisors} divisors");
            return Ok(Triangle { index, value, divisors });
        }
    }

    Err(SearchError::Overflow { threshold })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        let found = first_triangle_over(5).unwrap();
        assert_eq!(found, Triangle { index: 7, value: 28, divisors: 6 });
    }

    #[test]
    fn classic_threshold() {
        let found = first_triangle_over(500).unwrap();
        assert_eq!(found, Triangle { index: 12_375, value: 76_576_500, divisors: 576 });
    }

    #[test]
    fn small_thresholds() {
        assert_eq!(first_triangle_over(0).unwrap().value, 1);
        assert_eq!(first_triangle_over(1).unwrap().value, 3);
        assert_eq!(first_triangle_over(3).unwrap().value, 6);
        assert_eq!(first_triangle_over(4).unwrap().value, 28);
    }

    #[test]
    fn even_only_is_not_sound() {
        let even_only = SearchOptions { even_only: true, ..SearchOptions::default() };
        assert_eq!(search(1, &even_only).unwrap().value, 6);
        assert_eq!(first_triangle_over(1).unwrap().value, 3);
        // It does agree for the classic threshold.
        assert_eq!(search(500, &even_only).unwrap().value, 76_576_500);
    }

    #[test]
    fn bounded_search_gives_up() {
        let bounded = SearchOptions { max_index: Some(100), ..SearchOptions::default() };
        assert!(matches!(
            search(500, &bounded),
            Err(SearchError::Exhausted { threshold: 500, max_index: 100 })
        ));
        let inclusive = SearchOptions { max_index: Some(7), ..SearchOptions::default() };
        assert_eq!(search(5, &inclusive).unwrap().index, 7);
    }
}
