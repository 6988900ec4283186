// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use marquee_geometry::Rectangle;

/// Why an intercepted drawing command was rejected.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// A coordinate, angle or radius was NaN or infinite.
    #[error("{op}: non-finite argument")]
    NonFinite {
        /// Name of the rejected command.
        op: &'static str,
    },
    /// An arc was given a negative radius.
    #[error("{op}: negative radius {radius}")]
    NegativeRadius {
        /// Name of the rejected command.
        op: &'static str,
        /// The offending radius.
        radius: f64,
    },
}

pub(crate) fn finite_points(op: &'static str, points: &[Point]) -> Result<(), CommandError> {
    if points.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(CommandError::NonFinite { op })
    }
}

pub(crate) fn finite_scalars(op: &'static str, values: &[f64]) -> Result<(), CommandError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CommandError::NonFinite { op })
    }
}

pub(crate) fn radius(op: &'static str, radius: f64) -> Result<(), CommandError> {
    finite_scalars(op, &[radius])?;
    if radius < 0.0 {
        return Err(CommandError::NegativeRadius { op, radius });
    }
    Ok(())
}

pub(crate) fn rectangle(op: &'static str, rect: &Rectangle) -> Result<(), CommandError> {
    finite_scalars(op, &[rect.x, rect.y, rect.width, rect.height])
}
