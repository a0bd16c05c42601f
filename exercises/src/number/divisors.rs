/// Every positive divisor of `n` in ascending order. Empty for zero.
pub fn divisors(n: u64) -> Vec<u64> {
    if n == 0 {
        return Vec::new();
    }

    let mut low = Vec::new();
    let mut high = Vec::new();
    let mut d = 1;
    // d <= sqrt(n), written so d * d cannot overflow.
    while d <= n / d {
        if n % d == 0 {
            low.push(d);
            if d != n / d {
                high.push(n / d);
            }
        }
        d += 1;
    }

    low.extend(high.into_iter().rev());
    low
}

/// Prime factorization of `n` as `(prime, exponent)` pairs, smallest prime first.
/// Zero and one have no prime factors.
pub fn factorize(mut n: u64) -> Vec<(u64, u32)> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }

    let mut p = 2;
    while p <= n / p {
        let mut exponent = 0;
        while n % p == 0 {
            n /= p;
            exponent += 1;
        }
        if exponent > 0 {
            factors.push((p, exponent));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push((n, 1));
    }

    factors
}

/// Number of positive divisors of `n`, from its prime exponents.
pub fn divisor_count(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    factorize(n)
        .into_iter()
        .map(|(_, exponent)| u64::from(exponent) + 1)
        .product()
}
