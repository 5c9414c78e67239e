//! Single terms `c * x^a * y^b * z^c` over three fixed variables.
//!
//! The three exponents are packed into one decimal integer,
//! `degree = a * 100 + b * 10 + c`, so that comparing two terms by
//! degree is a single integer compare. Each exponent is confined to its
//! own digit and must stay in `0..=9`.

use core::fmt;
use core::ops::{Mul, Neg};
use core::str::FromStr;

use thiserror::Error;

use crate::traits::hash::{fold, StructuralHash};
use crate::utils::{approx_eq, is_negligible};

/// Largest exponent a single variable may carry.
pub const MAX_EXPONENT: u8 = 9;

/// Largest packed degree, `x^9 y^9 z^9`.
pub const MAX_DEGREE: u16 = 999;

/// Variable names in packing order (most significant digit first).
pub const VARIABLES: [char; 3] = ['x', 'y', 'z'];

/// Errors raised while parsing or combining terms and polynomials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolyError {
    /// Unexpected character or unreadable numeric literal.
    #[error("malformed term: {0}")]
    MalformedTerm(String),
    /// An exponent, or a sum of exponents, exceeds [`MAX_EXPONENT`].
    #[error("degree overflow: exponent {exponent} of `{var}` exceeds the maximum of 9")]
    DegreeOverflow { var: char, exponent: u32 },
    /// Term-level addition or subtraction of unequal degrees.
    #[error("cannot combine terms of degree {left} and {right}")]
    DegreeMismatch { left: u16, right: u16 },
}

/// A single monomial with a floating-point coefficient.
///
/// Two terms are equal when their degrees match and their coefficients
/// agree within [`TOLERANCE`](crate::utils::TOLERANCE).
///
/// # Example
///
/// ```
/// use polytab::Term;
///
/// let t: Term = "2x^6y^7z^8".parse().unwrap();
/// assert_eq!(t.degree(), 678);
/// assert_eq!(t.exponents(), [6, 7, 8]);
/// assert_eq!(t.coeff(), 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Term {
    degree: u16,
    coeff: f64,
}

impl Term {
    /// The additive identity: degree 0, coefficient 0.
    pub const ZERO: Self = Self {
        degree: 0,
        coeff: 0.0,
    };

    /// Create a term from a packed degree.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::DegreeOverflow`] if `degree` does not decode to
    /// three exponents in `0..=9`.
    pub fn new(degree: u16, coeff: f64) -> Result<Self, PolyError> {
        if degree > MAX_DEGREE {
            return Err(PolyError::DegreeOverflow {
                var: VARIABLES[0],
                exponent: u32::from(degree / 100),
            });
        }
        Ok(Self { degree, coeff })
    }

    /// Create a term from per-variable exponents `[x, y, z]`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::DegreeOverflow`] if any exponent exceeds 9.
    ///
    /// # Example
    ///
    /// ```
    /// use polytab::Term;
    ///
    /// let t = Term::from_exponents([1, 0, 2], -3.0).unwrap();
    /// assert_eq!(t.degree(), 102);
    /// assert!(Term::from_exponents([10, 0, 0], 1.0).is_err());
    /// ```
    pub fn from_exponents(exponents: [u8; 3], coeff: f64) -> Result<Self, PolyError> {
        let mut degree = 0u16;
        for (var, &e) in VARIABLES.iter().zip(exponents.iter()) {
            if e > MAX_EXPONENT {
                return Err(PolyError::DegreeOverflow {
                    var: *var,
                    exponent: u32::from(e),
                });
            }
            degree = degree * 10 + u16::from(e);
        }
        Ok(Self { degree, coeff })
    }

    /// Build a term whose degree is already known to be valid.
    #[inline]
    pub(crate) const fn from_raw(degree: u16, coeff: f64) -> Self {
        Self { degree, coeff }
    }

    /// The packed degree `x * 100 + y * 10 + z`.
    #[inline]
    pub const fn degree(&self) -> u16 {
        self.degree
    }

    /// The coefficient.
    #[inline]
    pub const fn coeff(&self) -> f64 {
        self.coeff
    }

    /// Exponents in `[x, y, z]` order.
    pub fn exponents(&self) -> [u8; 3] {
        [
            (self.degree / 100) as u8,
            ((self.degree / 10) % 10) as u8,
            (self.degree % 10) as u8,
        ]
    }

    /// Whether the coefficient vanishes under tolerance.
    #[inline]
    pub fn is_zero(&self) -> bool {
        is_negligible(self.coeff)
    }

    /// Add two terms of equal degree.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::DegreeMismatch`] if the degrees differ. Aligning
    /// degrees is the caller's job; polynomial arithmetic never hits this.
    pub fn checked_add(self, rhs: Self) -> Result<Self, PolyError> {
        self.same_degree(&rhs)?;
        Ok(Self::from_raw(self.degree, self.coeff + rhs.coeff))
    }

    /// Subtract two terms of equal degree.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::DegreeMismatch`] if the degrees differ.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, PolyError> {
        self.same_degree(&rhs)?;
        Ok(Self::from_raw(self.degree, self.coeff - rhs.coeff))
    }

    /// Multiply two terms, adding exponents variable by variable.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::DegreeOverflow`] if any resulting exponent
    /// exceeds 9.
    ///
    /// # Example
    ///
    /// ```
    /// use polytab::Term;
    ///
    /// let a: Term = "2x^4y^7z^5".parse().unwrap();
    /// let b: Term = "3x^4y^2z^2".parse().unwrap();
    /// assert_eq!(a.checked_mul(b).unwrap(), "6x^8y^9z^7".parse().unwrap());
    ///
    /// let c: Term = "x^9".parse().unwrap();
    /// assert!(c.checked_mul("x".parse().unwrap()).is_err());
    /// ```
    pub fn checked_mul(self, rhs: Self) -> Result<Self, PolyError> {
        let (l, r) = (self.exponents(), rhs.exponents());
        let mut exponents = [0u8; 3];
        for i in 0..3 {
            let e = l[i] + r[i];
            if e > MAX_EXPONENT {
                return Err(PolyError::DegreeOverflow {
                    var: VARIABLES[i],
                    exponent: u32::from(e),
                });
            }
            exponents[i] = e;
        }
        Self::from_exponents(exponents, self.coeff * rhs.coeff)
    }

    /// Evaluate the term at `(x, y, z)`.
    pub fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        let [a, b, c] = self.exponents();
        self.coeff * x.powi(i32::from(a)) * y.powi(i32::from(b)) * z.powi(i32::from(c))
    }

    /// Fold the degree into a running hash.
    ///
    /// The coefficient stays out: equality only bounds it within
    /// [`TOLERANCE`](crate::TOLERANCE), and no rounding grain can keep
    /// every tolerance-equal pair on the same side of a boundary.
    pub(crate) fn fold_into(&self, acc: u64) -> u64 {
        fold(acc, i64::from(self.degree))
    }

    fn same_degree(&self, rhs: &Self) -> Result<(), PolyError> {
        if self.degree == rhs.degree {
            Ok(())
        } else {
            Err(PolyError::DegreeMismatch {
                left: self.degree,
                right: rhs.degree,
            })
        }
    }
}

impl Default for Term {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.degree == other.degree && approx_eq(self.coeff, other.coeff)
    }
}

impl StructuralHash for Term {
    fn structural_hash(&self) -> u64 {
        self.fold_into(0)
    }
}

/// Scalar multiplication. A scalar that vanishes under tolerance yields
/// [`Term::ZERO`] rather than a zero-coefficient term of the old degree.
impl Mul<f64> for Term {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        if is_negligible(rhs) {
            return Self::ZERO;
        }
        Self::from_raw(self.degree, self.coeff * rhs)
    }
}

impl Neg for Term {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_raw(self.degree, -self.coeff)
    }
}

/// Left-to-right scanner over one term's text.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_space(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    /// Read a decimal coefficient such as `3`, `2.5` or `.5`.
    fn coefficient(&mut self) -> Result<f64, PolyError> {
        let literal = self.take_while(|c| c.is_ascii_digit() || c == '.');
        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(PolyError::MalformedTerm(format!(
                "invalid coefficient `{literal}` in `{}`",
                self.src
            ))),
        }
    }

    /// Read the digits after `^`.
    fn exponent(&mut self, var: char) -> Result<u32, PolyError> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(PolyError::MalformedTerm(format!(
                "expected exponent after `{var}^` in `{}`",
                self.src
            )));
        }
        let exponent = digits.bytes().fold(0u32, |acc, d| {
            acc.saturating_mul(10).saturating_add(u32::from(d - b'0'))
        });
        if exponent > u32::from(MAX_EXPONENT) {
            return Err(PolyError::DegreeOverflow { var, exponent });
        }
        Ok(exponent)
    }
}

/// Parse a single term: optional sign, optional coefficient (default 1),
/// then any sequence of `x`, `y`, `z` each optionally raised with `^n`.
/// Repeated variables add their exponents. `""` and `"0"` parse to
/// [`Term::ZERO`].
impl FromStr for Term {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "0" {
            return Ok(Self::ZERO);
        }

        let mut cursor = Cursor::new(s);
        cursor.skip_space();

        let negative = match cursor.peek() {
            Some('-') => {
                cursor.bump();
                true
            }
            Some('+') => {
                cursor.bump();
                false
            }
            _ => false,
        };
        cursor.skip_space();

        let mut coeff = 1.0;
        if cursor.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            coeff = cursor.coefficient()?;
            cursor.skip_space();
        }
        if negative {
            coeff = -coeff;
        }

        let mut exponents = [0u32; 3];
        while let Some(c) = cursor.peek() {
            let Some(var) = VARIABLES.iter().position(|&v| v == c) else {
                return Err(PolyError::MalformedTerm(format!(
                    "unexpected character `{c}` in `{s}`"
                )));
            };
            cursor.bump();
            cursor.skip_space();

            let mut exponent = 1;
            if cursor.peek() == Some('^') {
                cursor.bump();
                cursor.skip_space();
                exponent = cursor.exponent(c)?;
            }

            exponents[var] += exponent;
            if exponents[var] > u32::from(MAX_EXPONENT) {
                return Err(PolyError::DegreeOverflow {
                    var: c,
                    exponent: exponents[var],
                });
            }
            cursor.skip_space();
        }

        // Each entry is <= 9 here, so the narrowing is lossless.
        Self::from_exponents(exponents.map(|e| e as u8), coeff)
    }
}

/// Renders the coefficient (elided when it is 1 on a non-constant term,
/// a bare `-` when it is -1) followed by `x`, `y`, `z` with exponents
/// above 1 written as `^n`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.degree == 0 || !approx_eq(self.coeff.abs(), 1.0) {
            write!(f, "{}", self.coeff)?;
        } else if self.coeff < 0.0 {
            write!(f, "-")?;
        }

        for (var, e) in VARIABLES.iter().zip(self.exponents()) {
            match e {
                0 => {}
                1 => write!(f, "{var}")?,
                _ => write!(f, "{var}^{e}")?,
            }
        }
        Ok(())
    }
}
