//! Integer helpers for the divisor search.

mod divisors;
mod triangular;

pub use divisors::{divisor_count, divisors, factorize};
pub use triangular::{triangle_divisor_count, triangular, Triangulars};
