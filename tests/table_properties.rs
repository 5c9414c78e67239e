use proptest::prelude::*;

use polytab::{HashTable, Polynomial, Store, TableError, Term};

/// A fixed universe of distinct keys, `(i+1) + x^a y^b` for i in 0..40.
fn key(i: usize) -> Polynomial {
    let mono = Term::from_exponents([(i % 10) as u8, ((i / 10) % 10) as u8, 1], 1.0).unwrap();
    let constant = Term::new(0, (i + 1) as f64).unwrap();
    Polynomial::from_terms([mono, constant])
}

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, i32),
    Erase(usize),
    Find(usize),
    Update(usize, i32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..40, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        1 => (0usize..40).prop_map(Op::Erase),
        1 => (0usize..40).prop_map(Op::Find),
        1 => (0usize..40, any::<i32>()).prop_map(|(k, v)| Op::Update(k, v)),
    ]
}

/// Reference model: live entries in insertion order.
#[derive(Default)]
struct Model {
    entries: Vec<(usize, i32)>,
}

impl Model {
    fn get(&self, k: usize) -> Option<i32> {
        self.entries.iter().find(|(key, _)| *key == k).map(|(_, v)| *v)
    }

    fn remove(&mut self, k: usize) -> Option<i32> {
        let pos = self.entries.iter().position(|(key, _)| *key == k)?;
        Some(self.entries.remove(pos).1)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn table_matches_model(
        capacity in 1usize..8,
        seed in any::<u64>(),
        ops in proptest::collection::vec(arb_op(), 0..200),
    ) {
        let mut table = HashTable::with_seed(capacity, seed);
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let before = table.len();
                    let result = table.insert(key(k), v);
                    match model.get(k) {
                        Some(old) => {
                            prop_assert_eq!(result, Err(TableError::DuplicateKey));
                            prop_assert_eq!(table.len(), before);
                            prop_assert_eq!(table.find(&key(k)), Ok(&old));
                        }
                        None => {
                            prop_assert_eq!(result, Ok(()));
                            model.entries.push((k, v));
                            prop_assert_eq!(table.find(&key(k)), Ok(&v));
                        }
                    }
                }
                Op::Erase(k) => {
                    let expected = model.remove(k).ok_or(TableError::KeyNotFound);
                    prop_assert_eq!(table.erase(&key(k)), expected);
                    prop_assert_eq!(table.find(&key(k)), Err(TableError::KeyNotFound));
                }
                Op::Find(k) => {
                    let expected = model.get(k);
                    prop_assert_eq!(table.find(&key(k)).ok().copied(), expected);
                    prop_assert_eq!(table.contains_key(&key(k)), expected.is_some());
                }
                Op::Update(k, v) => match table.find_mut(&key(k)) {
                    Ok(slot) => {
                        *slot = v;
                        if let Some(entry) = model.entries.iter_mut().find(|(key, _)| *key == k) {
                            entry.1 = v;
                        }
                    }
                    Err(e) => {
                        prop_assert_eq!(e, TableError::KeyNotFound);
                        prop_assert!(model.get(k).is_none());
                    }
                },
            }

            prop_assert_eq!(table.len(), model.entries.len());
            prop_assert!(table.len() <= table.capacity());
        }

        // Iteration yields exactly the live entries, each once.
        let mut seen: Vec<(usize, i32)> = table
            .iter()
            .map(|(p, v)| ((0..40).find(|&i| key(i) == *p).unwrap(), *v))
            .collect();
        seen.sort_unstable();
        let mut expected = model.entries.clone();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }
}

proptest! {
    #[test]
    fn growth_preserves_size_and_values(seed in any::<u64>(), count in 1usize..40) {
        let mut table = HashTable::with_seed(1, seed);
        let mut capacities = vec![table.capacity()];
        for i in 0..count {
            table.insert(key(i), i).unwrap();
            capacities.push(table.capacity());
        }

        prop_assert_eq!(table.len(), count);
        prop_assert!(capacities.windows(2).all(|w| w[0] <= w[1]));
        for i in 0..count {
            prop_assert_eq!(table.find(&key(i)), Ok(&i));
        }
    }
}

proptest! {
    #[test]
    fn integer_keys(seed in any::<u64>(), keys in proptest::collection::hash_set(any::<i64>(), 0..100)) {
        let mut table = HashTable::with_seed(3, seed);
        for &k in &keys {
            table.insert(k, k.wrapping_mul(2)).unwrap();
        }
        for &k in &keys {
            prop_assert_eq!(table.find(&k), Ok(&k.wrapping_mul(2)));
        }
        prop_assert_eq!(table.iter().count(), keys.len());
    }
}

/// Drives any backend through the store contract.
fn exercise_store<S: Store<Polynomial, &'static str>>(store: &mut S) {
    let p: Polynomial = "x^2 + 2xy + y^2".parse().unwrap();
    let q: Polynomial = "y^2 + x^2 + 2yx".parse().unwrap();

    assert!(store.is_empty());
    store.insert(p.clone(), "square").unwrap();
    assert!(store.contains_key(&q));
    assert_eq!(store.insert(q.clone(), "again"), Err(TableError::DuplicateKey));

    *store.find_mut(&q).unwrap() = "binomial";
    assert_eq!(store.find(&p), Ok(&"binomial"));
    assert_eq!(store.len(), 1);

    assert_eq!(store.erase(&q), Ok("binomial"));
    assert_eq!(store.find(&p), Err(TableError::KeyNotFound));
    assert!(store.is_empty());
}

#[test]
fn hash_table_satisfies_store_contract() {
    exercise_store(&mut HashTable::new());
    exercise_store(&mut HashTable::with_seed(1, 99));
}

#[test]
fn tolerance_equal_keys_share_one_entry() {
    let mut table = HashTable::with_seed(16, 5);
    let split: Polynomial = "0.0003x+0.0012x".parse().unwrap();
    let whole: Polynomial = "0.0015x".parse().unwrap();

    table.insert(split, 1).unwrap();
    assert_eq!(table.find(&whole), Ok(&1));
    assert_eq!(table.insert(whole, 2), Err(TableError::DuplicateKey));
    assert_eq!(table.len(), 1);
}

#[test]
fn keys_differing_only_in_coefficients_stay_distinct() {
    let mut table = HashTable::with_seed(4, 11);
    for c in 1..=20 {
        table.insert(Polynomial::from(Term::new(110, f64::from(c)).unwrap()), c).unwrap();
    }
    assert_eq!(table.len(), 20);
    for c in 1..=20 {
        let key = Polynomial::from(Term::new(110, f64::from(c)).unwrap());
        assert_eq!(table.find(&key), Ok(&c));
    }
}

#[test]
fn arithmetic_results_as_keys() {
    let mut table = HashTable::with_seed(8, 2024);
    let a: Polynomial = "x^3+x+1".parse().unwrap();
    let b: Polynomial = "x^2+1".parse().unwrap();

    table.insert(a.checked_mul(&b).unwrap(), "product").unwrap();
    table.insert(&a + &b, "sum").unwrap();
    table.insert(&a - &a, "zero").unwrap();

    let expected: Polynomial = "x^5+2x^3+x^2+x+1".parse().unwrap();
    assert_eq!(table.find(&expected), Ok(&"product"));
    assert_eq!(table.find(&"x^3+x^2+x+2".parse().unwrap()), Ok(&"sum"));
    assert_eq!(table.find(&Polynomial::zero()), Ok(&"zero"));
}
