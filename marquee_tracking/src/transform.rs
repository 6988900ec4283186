// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Affine, Vec2};

use crate::TransformProvider;

/// Save/restore stack of user-to-device transforms.
///
/// Mirrors the canvas transform state: mutations post-multiply the current
/// matrix, so a later `translate` moves along the already scaled axes.
/// Calls with non-finite arguments are ignored.
#[derive(Clone, Debug, Default)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    /// An identity transform with nothing saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current transform.
    pub fn current(&self) -> Affine {
        self.current
    }

    /// Number of saved states above the base.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Pushes a copy of the current transform.
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pops the last saved transform. The base state is never popped.
    pub fn restore(&mut self) {
        if let Some(saved) = self.saved.pop() {
            self.current = saved;
        }
    }

    /// Appends a translation.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.current = self.current * Affine::translate(Vec2::new(dx, dy));
        }
    }

    /// Appends a non-uniform scale.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        if sx.is_finite() && sy.is_finite() {
            self.current = self.current * Affine::scale_non_uniform(sx, sy);
        }
    }

    /// Appends the matrix `[a b c d e f]` in canvas argument order.
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        let coeffs = [a, b, c, d, e, f];
        if coeffs.iter().all(|v| v.is_finite()) {
            self.current = self.current * Affine::new(coeffs);
        }
    }

    /// Replaces the current transform with `[a b c d e f]`.
    pub fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        let coeffs = [a, b, c, d, e, f];
        if coeffs.iter().all(|v| v.is_finite()) {
            self.current = Affine::new(coeffs);
        }
    }

    /// Resets the current transform to identity. Saved states are kept.
    pub fn reset_transform(&mut self) {
        self.current = Affine::IDENTITY;
    }
}

impl TransformProvider for TransformStack {
    fn current_transform(&self) -> Affine {
        self.current
    }
}
