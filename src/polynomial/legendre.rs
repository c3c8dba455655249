//! Legendre polynomial evaluation via the three-term recurrence.
//!
//! P_0(x) = 1, P_1(x) = x,
//! (n+1) P_{n+1}(x) = (2n+1) x P_n(x) - n P_{n-1}(x)

/// Evaluate the Legendre polynomial P_n(x).
pub fn legendre(n: usize, x: f64) -> f64 {
    legendre_pair(n, x).0
}

/// Evaluate P_n(x) and its derivative P'_n(x) in one recurrence pass.
///
/// The derivative uses
/// P'_n(x) = n (x P_n(x) - P_{n-1}(x)) / (x² - 1) away from the
/// endpoints and the closed forms P'_n(±1) = (±1)^{n+1} n(n+1)/2 there.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    if n == 1 {
        return (x, 1.0);
    }

    let (p_n, p_nm1) = legendre_pair(n, x);

    let dp_n = if (x - 1.0).abs() < 1e-14 {
        (n * (n + 1)) as f64 / 2.0
    } else if (x + 1.0).abs() < 1e-14 {
        let sign = if n % 2 == 0 { -1.0 } else { 1.0 };
        sign * (n * (n + 1)) as f64 / 2.0
    } else {
        n as f64 * (x * p_n - p_nm1) / (x * x - 1.0)
    };

    (p_n, dp_n)
}

/// Returns (P_n(x), P_{n-1}(x)).
fn legendre_pair(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }

    let mut p_prev = 1.0;
    let mut p_curr = x;
    for k in 1..n {
        let p_next = ((2 * k + 1) as f64 * x * p_curr - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }
    (p_curr, p_prev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_order_values() {
        // P_2(x) = (3x² - 1)/2, P_3(x) = (5x³ - 3x)/2
        let x = 0.3;
        assert!((legendre(2, x) - (3.0 * x * x - 1.0) / 2.0).abs() < 1e-14);
        assert!((legendre(3, x) - (5.0 * x * x * x - 3.0 * x) / 2.0).abs() < 1e-14);
    }

    #[test]
    fn endpoint_values() {
        for n in 0..8 {
            assert!((legendre(n, 1.0) - 1.0).abs() < 1e-14);
            let expect = if n % 2 == 0 { 1.0 } else { -1.0 };
            assert!((legendre(n, -1.0) - expect).abs() < 1e-14);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let eps = 1e-6;
        for n in 1..7 {
            for &x in &[-0.7, -0.2, 0.0, 0.4, 0.9] {
                let (_, dp) = legendre_and_derivative(n, x);
                let fd = (legendre(n, x + eps) - legendre(n, x - eps)) / (2.0 * eps);
                assert!(
                    (dp - fd).abs() < 1e-7,
                    "P'_{}({}) = {} vs fd {}",
                    n,
                    x,
                    dp,
                    fd
                );
            }
        }
    }
}
