//! Polynomial Table
//!
//! This example walks through:
//! - Parsing polynomials written in any term order
//! - Merge-based addition, subtraction and multiplication
//! - Storing polynomials as keys of a `HashTable`, including growth
//!   and tombstone reuse (logged at debug/trace level)
//!
//! Run with: cargo run --example poly_table

use polytab::{HashTable, PolyError, Polynomial, TableError};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not install tracing subscriber: {e}");
    }

    println!("=== Canonical Polynomials in x, y, z ===\n");

    if let Err(e) = arithmetic() {
        eprintln!("arithmetic failed: {e}");
    }
    if let Err(e) = table() {
        eprintln!("table demo failed: {e}");
    }
}

/// Parse, combine and render polynomials
fn arithmetic() -> Result<(), PolyError> {
    println!("--- Arithmetic ---\n");

    let p: Polynomial = "x^1 + 1 + x^3".parse()?;
    let q: Polynomial = "1 + x^2".parse()?;
    println!("p = {p}");
    println!("q = {q}");
    println!("p + q = {}", &p + &q);
    println!("p - q = {}", &p - &q);
    println!("p * q = {}", p.checked_mul(&q)?);
    println!("2.5 * q = {}", &q * 2.5);

    let same: Polynomial = "2x^6y^7z^8 + 2x^6y^7z^8 + 2x^6y^7z^8".parse()?;
    println!("2x^6y^7z^8 three times = {same}");

    // Exponents are limited to 9 per variable.
    let high: Polynomial = "x^9 + y".parse()?;
    match high.checked_mul(&"x".parse()?) {
        Ok(r) => println!("(x^9 + y) * x = {r}"),
        Err(e) => println!("(x^9 + y) * x fails: {e}"),
    }
    match "3w + 1".parse::<Polynomial>() {
        Ok(r) => println!("parsed {r}"),
        Err(e) => println!("\"3w + 1\" fails: {e}"),
    }
    println!();
    Ok(())
}

/// Key a hash table by polynomials
fn table() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Hash Table ---\n");

    let mut table = HashTable::with_capacity(4);
    let names = ["x", "y", "z", "x+y", "x+z", "y+z", "x+y+z"];
    for (i, s) in names.iter().enumerate() {
        table.insert(s.parse::<Polynomial>()?, i)?;
    }
    println!(
        "{} entries in {} slots (params a={}, b={})",
        table.len(),
        table.capacity(),
        table.hash_params().a(),
        table.hash_params().b()
    );

    let alias: Polynomial = "z + y + x".parse()?;
    println!("find(z + y + x) = {}", table.find(&alias)?);

    if let Err(TableError::DuplicateKey) = table.insert(alias.clone(), 99) {
        println!("insert(z + y + x) rejected: already present");
    }

    *table.find_mut(&alias)? += 100;
    println!("after update: {}", table.find(&alias)?);

    let removed = table.erase(&"y".parse()?)?;
    println!("erased y (value {removed}), {} entries left", table.len());
    table.insert("y^2".parse()?, 7)?;

    println!("\nLive entries:");
    for (key, value) in &table {
        println!("  {key} -> {value}");
    }
    Ok(())
}
