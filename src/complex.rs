use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::Error;

/// Tolerance used by [`ComplexNumber::approx_eq`] and [`fmt::Display`].
/// Exact comparison is the rule everywhere else.
const DISPLAY_EPSILON: f64 = 1e-12;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexNumber {
    pub real: f64,
    pub imaginary: f64,
}

impl ComplexNumber {
    pub const ZERO: ComplexNumber = ComplexNumber {
        real: 0.0,
        imaginary: 0.0,
    };

    pub fn new(real: f64, imaginary: f64) -> Self {
        ComplexNumber { real, imaginary }
    }

    /// `self * self`, computed with three multiplications instead of four.
    pub fn squared(&self) -> ComplexNumber {
        ComplexNumber {
            real: self.real * self.real - self.imaginary * self.imaginary,
            imaginary: 2.0 * self.real * self.imaginary,
        }
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Squared norm. The escape loop compares this against 4.0 rather than
    /// paying for the square root on every iteration.
    pub fn magnitude_squared(&self) -> f64 {
        self.real * self.real + self.imaginary * self.imaginary
    }

    /// Division that surfaces a zero divisor as an error instead of NaN.
    pub fn checked_div(self, other: ComplexNumber) -> Result<ComplexNumber, Error> {
        let denominator = other.magnitude_squared();
        if denominator == 0.0 {
            return Err(Error::DivisionByZero);
        }
        Ok(ComplexNumber {
            real: (self.real * other.real + self.imaginary * other.imaginary) / denominator,
            imaginary: (self.imaginary * other.real - self.real * other.imaginary) / denominator,
        })
    }

    /// Loose comparison for display and debugging only. Arithmetic, equality
    /// and hashing all stay exact.
    pub fn approx_eq(&self, other: &ComplexNumber, tolerance: f64) -> bool {
        (self.real - other.real).abs() <= tolerance
            && (self.imaginary - other.imaginary).abs() <= tolerance
    }
}

impl std::ops::Add<ComplexNumber> for ComplexNumber {
    type Output = ComplexNumber;

    fn add(self, other: ComplexNumber) -> ComplexNumber {
        ComplexNumber {
            real: self.real + other.real,
            imaginary: self.imaginary + other.imaginary,
        }
    }
}

impl std::ops::Sub<ComplexNumber> for ComplexNumber {
    type Output = ComplexNumber;

    fn sub(self, other: ComplexNumber) -> ComplexNumber {
        ComplexNumber {
            real: self.real - other.real,
            imaginary: self.imaginary - other.imaginary,
        }
    }
}

impl std::ops::Mul<ComplexNumber> for ComplexNumber {
    type Output = ComplexNumber;

    fn mul(self, other: ComplexNumber) -> ComplexNumber {
        ComplexNumber {
            real: self.real * other.real - self.imaginary * other.imaginary,
            imaginary: self.real * other.imaginary + self.imaginary * other.real,
        }
    }
}

impl std::ops::Mul<f64> for ComplexNumber {
    type Output = ComplexNumber;

    fn mul(self, other: f64) -> ComplexNumber {
        ComplexNumber {
            real: self.real * other,
            imaginary: self.imaginary * other,
        }
    }
}

impl std::ops::Mul<ComplexNumber> for f64 {
    type Output = ComplexNumber;

    fn mul(self, other: ComplexNumber) -> ComplexNumber {
        other * self
    }
}

/// Panics on a zero divisor; that is a contract violation in this crate's
/// geometry paths, not a recoverable condition. Use [`ComplexNumber::checked_div`]
/// where the divisor is not known to be nonzero.
impl std::ops::Div<ComplexNumber> for ComplexNumber {
    type Output = ComplexNumber;

    fn div(self, other: ComplexNumber) -> ComplexNumber {
        match self.checked_div(other) {
            Ok(quotient) => quotient,
            Err(_) => panic!("complex division by zero divisor"),
        }
    }
}

impl std::ops::AddAssign<ComplexNumber> for ComplexNumber {
    fn add_assign(&mut self, other: ComplexNumber) {
        *self = *self + other;
    }
}

impl std::ops::Neg for ComplexNumber {
    type Output = ComplexNumber;

    fn neg(self) -> ComplexNumber {
        ComplexNumber {
            real: -self.real,
            imaginary: -self.imaginary,
        }
    }
}

// Hashes the raw IEEE 754 bit patterns, consistent with the derived exact
// equality for every value the pipeline produces.
impl Hash for ComplexNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.real.to_bits().hash(state);
        self.imaginary.to_bits().hash(state);
    }
}

impl fmt::Display for ComplexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.approx_eq(&ComplexNumber::ZERO, DISPLAY_EPSILON) {
            write!(f, "0")
        } else if self.real.abs() <= DISPLAY_EPSILON {
            write!(f, "{}i", self.imaginary)
        } else if self.imaginary.abs() <= DISPLAY_EPSILON {
            write!(f, "{}", self.real)
        } else {
            write!(f, "{} + {}i", self.real, self.imaginary)
        }
    }
}
