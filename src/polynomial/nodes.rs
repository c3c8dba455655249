//! Gauss-Legendre-Lobatto nodes and weights.
//!
//! The n-point GLL rule uses the roots of (1-x²)P'_{n-1}(x), which
//! include the endpoints x = ±1. Endpoint nodes are what lets the
//! reconstruction read off cell-edge limits directly from the point
//! values, so this is the quadrature used throughout the solver.

use super::legendre::{legendre, legendre_and_derivative};
use std::f64::consts::PI;

/// Compute the n-point Gauss-Legendre-Lobatto nodes on [-1, 1].
///
/// Interior nodes are found by Newton iteration on P'_{n-1}(x),
/// starting from Chebyshev-Lobatto guesses. A single point degenerates
/// to the midpoint rule.
pub fn gll_nodes(n: usize) -> Vec<f64> {
    assert!(n >= 1, "quadrature needs at least one point");
    if n == 1 {
        return vec![0.0];
    }
    if n == 2 {
        return vec![-1.0, 1.0];
    }

    let order = n - 1;
    let mut nodes: Vec<f64> = (0..n)
        .map(|j| -(PI * j as f64 / order as f64).cos())
        .collect();
    nodes[0] = -1.0;
    nodes[order] = 1.0;

    // Newton on L(x) = (1-x²)P'_N(x); L'(x) = -N(N+1) P_N(x), so the
    // update is x += (1-x²) P'_N / (N(N+1) P_N).
    let denom = (order * (order + 1)) as f64;
    for node in nodes.iter_mut().take(order).skip(1) {
        let mut x = *node;
        for _ in 0..100 {
            let (p, dp) = legendre_and_derivative(order, x);
            let update = (1.0 - x * x) * dp / (denom * p);
            x += update;
            if update.abs() < 1e-15 {
                break;
            }
        }
        *node = x;
    }

    nodes
}

/// Compute the n-point GLL weights on [-1, 1]: w_j = 2 / (N(N+1) P_N(x_j)²).
pub fn gll_weights(nodes: &[f64]) -> Vec<f64> {
    let n = nodes.len();
    if n == 1 {
        return vec![2.0];
    }

    let order = n - 1;
    let denom = (order * (order + 1)) as f64;
    nodes
        .iter()
        .map(|&x| {
            let p = legendre(order, x);
            2.0 / (denom * p * p)
        })
        .collect()
}

/// GLL nodes rescaled to the reference cell [-1/2, 1/2].
pub fn reference_cell_nodes(n: usize) -> Vec<f64> {
    gll_nodes(n).into_iter().map(|x| 0.5 * x).collect()
}

/// GLL weights rescaled to the reference cell, summing to 1.
pub fn reference_cell_weights(n: usize) -> Vec<f64> {
    let nodes = gll_nodes(n);
    gll_weights(&nodes).into_iter().map(|w| 0.5 * w).collect()
}
