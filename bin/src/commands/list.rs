//! List command implementation.
//!
//! This module handles listing symbol presets with optional filtering.

use crate::display::parse_category;
use anyhow::Result;
use footprint_lib::prelude::*;

/// List symbol presets with optional category filter or search pattern.
pub(crate) fn list_symbols(category: Option<&str>, search: Option<&str>) -> Result<()> {
    let registry = SymbolRegistry::global();

    let mut symbols: Vec<_> = match (category, search) {
        (Some(cat), _) => {
            let category = parse_category(cat)?;
            registry.by_category(category).collect()
        }
        (_, Some(pattern)) => registry.search(pattern),
        (None, None) => registry.all().collect(),
    };
    symbols.sort_by(|a, b| a.id().cmp(b.id()));

    if symbols.is_empty() {
        println!("No symbols found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<14} {:<10} {:>10} {:>10}",
        "ID", "NAME", "CATEGORY", "LEVEL", "DELTA"
    );
    println!("{}", "-".repeat(58));

    for symbol in &symbols {
        println!(
            "{:<10} {:<14} {:<10} {:>10} {:>10}",
            symbol.id(),
            symbol.name(),
            symbol.category(),
            symbol.format_price(symbol.price_level_size()),
            symbol.delta_threshold()
        );
    }

    println!("\nTotal: {} symbols", symbols.len());
    Ok(())
}
