use std::fmt;

use crate::complex::ComplexNumber;

/// Extent of a region of the complex plane. Both dimensions are non-negative
/// by caller contract.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexSize {
    pub width: f64,
    pub height: f64,
}

impl ComplexSize {
    pub fn new(width: f64, height: f64) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0);
        ComplexSize { width, height }
    }

    /// Width over height. Degenerate sizes produce NaN or infinity, which the
    /// rasterizer guards against before using this.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn scaled(&self, multiplier: f64) -> Self {
        ComplexSize {
            width: self.width * multiplier,
            height: self.height * multiplier,
        }
    }
}

/// An axis-aligned region of the complex plane: the viewport ("crop") being
/// rendered. The origin is the minimum corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexRect {
    pub origin: ComplexNumber,
    pub size: ComplexSize,
}

impl ComplexRect {
    /// The classic full view of the set: real in `[-2, 1]`, imaginary in
    /// `[-1.5, 1.5]`.
    pub const DEFAULT_CROP: ComplexRect = ComplexRect {
        origin: ComplexNumber {
            real: -2.0,
            imaginary: -1.5,
        },
        size: ComplexSize {
            width: 3.0,
            height: 3.0,
        },
    };

    pub fn new(origin: ComplexNumber, size: ComplexSize) -> Self {
        ComplexRect { origin, size }
    }

    /// A rect of the given size whose center sits at `center`.
    pub fn centered_at(center: ComplexNumber, size: ComplexSize) -> Self {
        ComplexRect {
            origin: ComplexNumber::new(
                center.real - size.width / 2.0,
                center.imaginary - size.height / 2.0,
            ),
            size,
        }
    }

    pub fn min(&self) -> ComplexNumber {
        self.origin
    }

    pub fn max(&self) -> ComplexNumber {
        ComplexNumber::new(
            self.origin.real + self.size.width,
            self.origin.imaginary + self.size.height,
        )
    }

    pub fn center(&self) -> ComplexNumber {
        ComplexNumber::new(
            self.origin.real + self.size.width / 2.0,
            self.origin.imaginary + self.size.height / 2.0,
        )
    }

    /// Linear interpolation across the region: `(0, 0)` is the minimum corner
    /// and `(1, 1)` the maximum.
    pub fn relative_point(&self, x_percent: f64, y_percent: f64) -> ComplexNumber {
        ComplexNumber::new(
            self.origin.real + self.size.width * x_percent,
            self.origin.imaginary + self.size.height * y_percent,
        )
    }
}

impl Default for ComplexRect {
    fn default() -> Self {
        Self::DEFAULT_CROP
    }
}

impl fmt::Display for ComplexRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.min(), self.max())
    }
}
