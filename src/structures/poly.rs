use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;

use crate::structures::term::{PolyError, Term};
use crate::traits::hash::{fold, StructuralHash};
use crate::utils::is_negligible;

/// Polynomial in `x`, `y`, `z` with floating-point coefficients.
///
/// Terms are kept in canonical form: strictly descending by packed
/// degree, one term per degree, and no term whose coefficient vanishes
/// under tolerance. Every constructor and every arithmetic operation
/// returns a value in this form, so two polynomials with the same
/// symbolic value have the same term sequence.
///
/// The zero polynomial is represented as an empty term vector.
///
/// # Example
///
/// ```
/// use polytab::Polynomial;
///
/// let a: Polynomial = "x+y+z".parse().unwrap();
/// let b: Polynomial = "z+x+y".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "x+y+z");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Polynomial {
    terms: Vec<Term>,
}

impl Polynomial {
    /// Create the zero polynomial.
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// Create a constant polynomial.
    ///
    /// # Example
    ///
    /// ```
    /// use polytab::Polynomial;
    ///
    /// assert_eq!(Polynomial::constant(4.0).to_string(), "4");
    /// assert!(Polynomial::constant(0.0).is_zero());
    /// ```
    pub fn constant(c: f64) -> Self {
        Self::from_terms([Term::from_raw(0, c)])
    }

    /// Create a polynomial from terms in any order.
    ///
    /// Like terms are combined and vanishing terms dropped.
    pub fn from_terms<I: IntoIterator<Item = Term>>(terms: I) -> Self {
        let mut poly = Self {
            terms: terms.into_iter().collect(),
        };
        poly.canonicalize();
        poly
    }

    /// Check if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in descending degree order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The term of highest degree, `None` for the zero polynomial.
    pub fn leading_term(&self) -> Option<&Term> {
        self.terms.first()
    }

    /// Evaluate at `(x, y, z)`.
    pub fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.terms.iter().map(|t| t.eval(x, y, z)).sum()
    }

    /// Multiply two polynomials.
    ///
    /// Every left term is distributed over the right operand; each partial
    /// product is already canonical and is folded into the running sum
    /// with the linear merge.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::DegreeOverflow`] if any product term would
    /// carry an exponent above 9.
    ///
    /// # Example
    ///
    /// ```
    /// use polytab::Polynomial;
    ///
    /// let a: Polynomial = "x^3+x^1+1".parse().unwrap();
    /// let b: Polynomial = "x^2+1".parse().unwrap();
    /// let expected: Polynomial = "x^5+2x^3+x^2+x^1+1".parse().unwrap();
    /// assert_eq!(a.checked_mul(&b).unwrap(), expected);
    /// ```
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, PolyError> {
        let mut product = Self::zero();
        for l in &self.terms {
            let mut partial = Vec::with_capacity(rhs.len());
            for r in &rhs.terms {
                let t = l.checked_mul(*r)?;
                if !t.is_zero() {
                    partial.push(t);
                }
            }
            // No digit carries, so shifting every degree by `l.degree()`
            // keeps `rhs`'s strict descending order.
            product = product.merge(&Self { terms: partial }, 1.0);
        }
        Ok(product)
    }

    /// Multiply every coefficient by `k`.
    pub fn scale(&self, k: f64) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|&t| t * k)
            .filter(|t| !t.is_zero())
            .collect();
        Self { terms }
    }

    /// Sort descending by degree, then combine adjacent like terms.
    fn canonicalize(&mut self) {
        self.terms.sort_by(|a, b| b.degree().cmp(&a.degree()));

        let mut combined: Vec<Term> = Vec::with_capacity(self.terms.len());
        for t in self.terms.drain(..) {
            match combined.last_mut() {
                Some(last) if last.degree() == t.degree() => {
                    *last = Term::from_raw(last.degree(), last.coeff() + t.coeff());
                }
                _ => combined.push(t),
            }
        }
        combined.retain(|t| !t.is_zero());

        self.terms = combined;
    }

    /// Linear merge of two canonical term lists. `sign` is applied to
    /// every coefficient taken from `rhs`.
    fn merge(&self, rhs: &Self, sign: f64) -> Self {
        let (a, b) = (&self.terms, &rhs.terms);
        let mut terms = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            match a[i].degree().cmp(&b[j].degree()) {
                Ordering::Equal => {
                    let c = a[i].coeff() + sign * b[j].coeff();
                    if !is_negligible(c) {
                        terms.push(Term::from_raw(a[i].degree(), c));
                    }
                    i += 1;
                    j += 1;
                }
                Ordering::Greater => {
                    terms.push(a[i]);
                    i += 1;
                }
                Ordering::Less => {
                    terms.push(Term::from_raw(b[j].degree(), sign * b[j].coeff()));
                    j += 1;
                }
            }
        }
        terms.extend_from_slice(&a[i..]);
        terms.extend(
            b[j..]
                .iter()
                .map(|t| Term::from_raw(t.degree(), sign * t.coeff())),
        );

        Self { terms }
    }
}

impl From<Term> for Polynomial {
    fn from(t: Term) -> Self {
        Self::from_terms([t])
    }
}

/// Parse a polynomial such as `"3x^2y - 2.5z + 1"`.
///
/// The text is split into signed runs at each `+` or `-`, whitespace is
/// dropped, every run is parsed as a [`Term`], and the result is
/// canonicalized. `""` and `"0"` give the zero polynomial.
impl FromStr for Polynomial {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut runs: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut has_content = false;

        for c in s.chars() {
            match c {
                '+' | '-' => {
                    if has_content {
                        runs.push(core::mem::take(&mut current));
                    }
                    if c == '-' {
                        current.push('-');
                    }
                    has_content = false;
                }
                c if c.is_whitespace() => {}
                c => {
                    current.push(c);
                    has_content = true;
                }
            }
        }
        if has_content {
            runs.push(current);
        }

        let mut terms = Vec::with_capacity(runs.len());
        for run in &runs {
            let t: Term = run.parse()?;
            if !t.is_zero() {
                terms.push(t);
            }
        }
        Ok(Self::from_terms(terms))
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.terms.len() == other.terms.len()
            && self.terms.iter().zip(&other.terms).all(|(a, b)| a == b)
    }
}

/// Folds the term count, then each degree in canonical order.
///
/// Polynomials that differ only in coefficients share a hash and are told
/// apart by probing.
impl StructuralHash for Polynomial {
    fn structural_hash(&self) -> u64 {
        let acc = fold(0, self.terms.len() as i64);
        self.terms.iter().fold(acc, |acc, t| t.fold_into(acc))
    }
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Self::Output {
        self.merge(rhs, 1.0)
    }
}

impl Add<&Polynomial> for Polynomial {
    type Output = Self;

    fn add(self, rhs: &Polynomial) -> Self::Output {
        self.merge(rhs, 1.0)
    }
}

impl Add for Polynomial {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.merge(&rhs, 1.0)
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Self::Output {
        self.merge(rhs, -1.0)
    }
}

impl Sub<&Polynomial> for Polynomial {
    type Output = Self;

    fn sub(self, rhs: &Polynomial) -> Self::Output {
        self.merge(rhs, -1.0)
    }
}

impl Sub for Polynomial {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.merge(&rhs, -1.0)
    }
}

impl Neg for Polynomial {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let terms = self.terms.into_iter().map(|t| -t).collect();
        Self { terms }
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

/// Scalar multiplication: polynomial * f64
impl Mul<f64> for Polynomial {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<f64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 && t.coeff() > 0.0 {
                write!(f, "+")?;
            }
            write!(f, "{t}")?;
        }
        Ok(())
    }
}
