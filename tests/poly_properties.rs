use proptest::prelude::*;

use polytab::{PolyError, Polynomial, StructuralHash, Term};

// Small exponents keep every pairwise and triple product below the
// per-variable limit of 9; integer coefficients keep arithmetic exact.
fn arb_term() -> impl Strategy<Value = Term> {
    (
        proptest::array::uniform3(0u8..=3),
        (-20i32..=20).prop_filter("non-zero coefficient", |c| *c != 0),
    )
        .prop_map(|(e, c)| Term::from_exponents(e, f64::from(c)).unwrap())
}

fn arb_terms() -> impl Strategy<Value = Vec<Term>> {
    proptest::collection::vec(arb_term(), 0..8)
}

fn arb_poly() -> impl Strategy<Value = Polynomial> {
    arb_terms().prop_map(Polynomial::from_terms)
}

fn render_terms(terms: &[Term]) -> String {
    terms
        .iter()
        .map(Term::to_string)
        .collect::<Vec<_>>()
        .join("+")
}

fn is_canonical(p: &Polynomial) -> bool {
    let strictly_descending = p
        .terms()
        .windows(2)
        .all(|w| w[0].degree() > w[1].degree());
    strictly_descending && p.terms().iter().all(|t| !t.is_zero())
}

// ===== Canonical form =====

proptest! {
    #[test]
    fn parse_yields_canonical_form(terms in arb_terms()) {
        let p: Polynomial = render_terms(&terms).parse().unwrap();
        prop_assert!(is_canonical(&p));
    }
}

proptest! {
    #[test]
    fn parse_ignores_term_order(
        terms in arb_terms().prop_flat_map(|t| (Just(t.clone()), Just(t).prop_shuffle()))
    ) {
        let (original, shuffled) = terms;
        let a: Polynomial = render_terms(&original).parse().unwrap();
        let b: Polynomial = render_terms(&shuffled).parse().unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.structural_hash(), b.structural_hash());
    }
}

proptest! {
    #[test]
    fn parse_matches_from_terms(terms in arb_terms()) {
        let parsed: Polynomial = render_terms(&terms).parse().unwrap();
        prop_assert_eq!(parsed, Polynomial::from_terms(terms));
    }
}

proptest! {
    #[test]
    fn display_round_trips(p in arb_poly()) {
        let back: Polynomial = p.to_string().parse().unwrap();
        prop_assert_eq!(back, p);
    }
}

// ===== Addition and subtraction =====

proptest! {
    #[test]
    fn addition_commutative(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!(&a + &b, &b + &a);
    }
}

proptest! {
    #[test]
    fn addition_preserves_canonical_form(a in arb_poly(), b in arb_poly()) {
        prop_assert!(is_canonical(&(&a + &b)));
        prop_assert!(is_canonical(&(&a - &b)));
    }
}

proptest! {
    #[test]
    fn addition_matches_concatenated_parse(a in arb_terms(), b in arb_terms()) {
        let pa = Polynomial::from_terms(a.clone());
        let pb = Polynomial::from_terms(b.clone());
        let joined: Vec<Term> = a.into_iter().chain(b).collect();
        prop_assert_eq!(&pa + &pb, Polynomial::from_terms(joined));
    }
}

proptest! {
    #[test]
    fn subtraction_undoes_addition(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!(&(&a + &b) - &b, a);
    }
}

proptest! {
    #[test]
    fn subtraction_self_is_zero(a in arb_poly()) {
        prop_assert!((&a - &a).is_zero());
    }
}

proptest! {
    #[test]
    fn subtraction_is_negated_addition(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!(&a - &b, &a + &(-&b));
    }
}

// ===== Multiplication =====

proptest! {
    #[test]
    fn multiplication_commutative(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!(a.checked_mul(&b).unwrap(), b.checked_mul(&a).unwrap());
    }
}

proptest! {
    #[test]
    fn multiplication_distributes(a in arb_poly(), b in arb_poly(), c in arb_poly()) {
        let left = a.checked_mul(&(&b + &c)).unwrap();
        let right = a.checked_mul(&b).unwrap() + a.checked_mul(&c).unwrap();
        prop_assert_eq!(left, right);
    }
}

proptest! {
    #[test]
    fn multiplication_preserves_canonical_form(a in arb_poly(), b in arb_poly()) {
        prop_assert!(is_canonical(&a.checked_mul(&b).unwrap()));
    }
}

proptest! {
    #[test]
    fn multiplicative_identity(a in arb_poly()) {
        let one = Polynomial::constant(1.0);
        prop_assert_eq!(a.checked_mul(&one).unwrap(), a.clone());
        prop_assert_eq!(one.checked_mul(&a).unwrap(), a);
    }
}

proptest! {
    #[test]
    fn scalar_multiplication_matches_constant_product(a in arb_poly(), k in -5i32..=5) {
        let k = f64::from(k);
        prop_assert_eq!(&a * k, a.checked_mul(&Polynomial::constant(k)).unwrap());
    }
}

proptest! {
    #[test]
    fn multiplication_evaluates_pointwise(a in arb_poly(), b in arb_poly(), x in -2i32..=2, y in -2i32..=2) {
        let (x, y) = (f64::from(x), f64::from(y));
        let product = a.checked_mul(&b).unwrap();
        prop_assert_eq!(product.eval(x, y, 1.0), a.eval(x, y, 1.0) * b.eval(x, y, 1.0));
    }
}

proptest! {
    #[test]
    fn saturated_exponent_overflows(var in 0usize..3, e in 1u8..=9) {
        let mut high = [0u8; 3];
        high[var] = 9;
        let mut low = [0u8; 3];
        low[var] = e;
        let a = Polynomial::from(Term::from_exponents(high, 2.0).unwrap());
        let b = Polynomial::from(Term::from_exponents(low, 3.0).unwrap());
        let is_overflow = matches!(a.checked_mul(&b), Err(PolyError::DegreeOverflow { .. }));
        prop_assert!(is_overflow);
    }
}

// ===== Tolerance =====

proptest! {
    #[test]
    fn float_noise_keeps_equality_and_hash(a in arb_poly(), noise in -1e-12f64..1e-12) {
        let noisy = Polynomial::from_terms(
            a.terms().iter().map(|t| Term::new(t.degree(), t.coeff() + noise).unwrap()),
        );
        prop_assert_eq!(&noisy, &a);
        prop_assert_eq!(noisy.structural_hash(), a.structural_hash());
    }

    #[test]
    fn split_decimal_coefficients_hash_like_their_sum(a in 1u32..10_000, b in 1u32..10_000) {
        let split: Polynomial = format!("{}x+{}x", f64::from(a) / 1e4, f64::from(b) / 1e4)
            .parse()
            .unwrap();
        let whole: Polynomial = format!("{}x", f64::from(a + b) / 1e4).parse().unwrap();
        prop_assert_eq!(&split, &whole);
        prop_assert_eq!(split.structural_hash(), whole.structural_hash());
    }
}

#[test]
fn combination_example() {
    let p: Polynomial = "2x^6y^7z^8+2x^6y^7z^8+2x^6y^7z^8".parse().unwrap();
    assert_eq!(p.len(), 1);
    assert_eq!(p.terms()[0].degree(), 678);
    assert_eq!(p.terms()[0].coeff(), 6.0);
}

#[test]
fn cancellation_example() {
    let a: Polynomial = "3x^2y^3z^4".parse().unwrap();
    let b: Polynomial = "-3x^2y^3z^4".parse().unwrap();
    assert!((a + b).terms().is_empty());
}
