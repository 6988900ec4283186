// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric kernel: closed-form root solvers restricted to the unit interval.
//!
//! Every solver here treats division by zero and NaN as "no root" instead of
//! propagating non-finite values into the geometry. Root sets are returned in
//! ascending order with near-duplicates (closer than [`EPSILON`]) collapsed.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use smallvec::SmallVec;

/// A full turn, `2π`.
pub const TAU: f64 = core::f64::consts::TAU;

/// A quarter turn, `π/2`.
pub const HALF_PI: f64 = core::f64::consts::FRAC_PI_2;

/// Three quarters of a turn, `3π/2`.
pub const THREE_HALF_PI: f64 = 3.0 * core::f64::consts::FRAC_PI_2;

/// Tolerance used for unit-interval membership and root de-duplication.
pub const EPSILON: f64 = 1e-6;

const MIN_UNIT: f64 = 0.0 - EPSILON;
const MAX_UNIT: f64 = 1.0 + EPSILON;

/// Up to two real roots of a quadratic.
pub type QuadRoots = SmallVec<[f64; 2]>;

/// Up to three real roots of a cubic.
pub type CubicRoots = SmallVec<[f64; 3]>;

/// Returns `true` if `t` lies in the tolerant unit interval `(−ε, 1+ε)`.
#[inline]
pub fn is_unit(t: f64) -> bool {
    t > MIN_UNIT && t < MAX_UNIT
}

/// Maps an angle in radians onto `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let r = angle % TAU;
    let r = if r < 0.0 { r + TAU } else { r };
    // `r + TAU` can round up to exactly `TAU` for tiny negative inputs.
    if r >= TAU { 0.0 } else { r }
}

fn push_root<A: smallvec::Array<Item = f64>>(roots: &mut SmallVec<A>, t: f64) {
    if !t.is_finite() || roots.iter().any(|r| (r - t).abs() < EPSILON) {
        return;
    }
    roots.push(t);
}

fn sort_roots(roots: &mut [f64]) {
    roots.sort_unstable_by(f64::total_cmp);
}

/// Solves `a·t² + b·t + c = 0` over the reals.
///
/// Falls back to the linear equation when `a` is exactly zero. Uses the
/// cancellation-free form `q = −½(b + sign(b)·√Δ)`, roots `q/a` and `c/q`.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> QuadRoots {
    let mut roots = QuadRoots::new();
    if a == 0.0 {
        if b != 0.0 {
            push_root(&mut roots, -c / b);
        }
        return roots;
    }
    let disc = b * b - 4.0 * a * c;
    if disc.is_nan() || disc < 0.0 {
        return roots;
    }
    let sq = disc.sqrt();
    let q = -0.5 * (b + sq.copysign(b));
    if q == 0.0 {
        // b = 0 and Δ = 0, so c = 0 too: double root at zero.
        push_root(&mut roots, 0.0);
        return roots;
    }
    push_root(&mut roots, q / a);
    push_root(&mut roots, c / q);
    sort_roots(&mut roots);
    roots
}

/// Solves `a·t² + b·t + c = 0` and keeps only roots in the tolerant unit
/// interval, clamped onto `[0, 1]`.
pub fn solve_unit_quadratic(a: f64, b: f64, c: f64) -> QuadRoots {
    let mut out = QuadRoots::new();
    for t in solve_quadratic(a, b, c) {
        if is_unit(t) {
            push_root(&mut out, t.clamp(0.0, 1.0));
        }
    }
    out
}

/// Solves `a·t³ + b·t² + c·t + d = 0` over the reals with Cardano's method.
///
/// The depressed cubic `x³ + p·x + q` is classified by its discriminant
/// `Δ = (q/2)² + (p/3)³`:
/// - `Δ < 0`: three distinct real roots via the trigonometric identity,
/// - `Δ > 0`: one real root via cube roots,
/// - `Δ = 0`: a repeated root, two distinct values.
///
/// A vanishing leading coefficient degrades to [`solve_quadratic`].
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> CubicRoots {
    let mut roots = CubicRoots::new();
    let scale = b.abs().max(c.abs()).max(d.abs());
    if a == 0.0 || a.abs() <= 1e-12 * scale {
        for t in solve_quadratic(b, c, d) {
            push_root(&mut roots, t);
        }
        return roots;
    }

    let b = b / a;
    let c = c / a;
    let d = d / a;
    let offset = b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;

    let half_q = 0.5 * q;
    let third_p = p / 3.0;
    let half_q2 = half_q * half_q;
    let third_p3 = third_p * third_p * third_p;
    let disc = half_q2 + third_p3;
    let tolerance = f64::EPSILON * half_q2.max(third_p3.abs());

    if disc.abs() <= tolerance {
        let u = (-half_q).cbrt();
        push_root(&mut roots, 2.0 * u - offset);
        push_root(&mut roots, -u - offset);
    } else if disc < 0.0 {
        let r = (-third_p).sqrt();
        let cos_arg = (-half_q / (r * r * r)).clamp(-1.0, 1.0);
        let phi = cos_arg.acos() / 3.0;
        let two_r = 2.0 * r;
        push_root(&mut roots, two_r * phi.cos() - offset);
        push_root(&mut roots, two_r * (phi - TAU / 3.0).cos() - offset);
        push_root(&mut roots, two_r * (phi - 2.0 * TAU / 3.0).cos() - offset);
    } else if disc > 0.0 {
        let s = disc.sqrt();
        let u = (-half_q + s).cbrt();
        let v = (-half_q - s).cbrt();
        push_root(&mut roots, u + v - offset);
    }
    sort_roots(&mut roots);
    roots
}

/// Solves the cubic and keeps only roots in the tolerant unit interval,
/// clamped onto `[0, 1]`.
pub fn solve_unit_cubic(a: f64, b: f64, c: f64, d: f64) -> CubicRoots {
    let mut out = CubicRoots::new();
    for t in solve_cubic(a, b, c, d) {
        if is_unit(t) {
            push_root(&mut out, t.clamp(0.0, 1.0));
        }
    }
    out
}
