//! Info command implementation.

use anyhow::{Context, Result};
use footprint_lib::prelude::*;

/// Show the details of a symbol preset and the cluster config it implies.
pub(crate) fn show_info(symbol_id: &str) -> Result<()> {
    let registry = SymbolRegistry::global();
    let symbol = registry
        .get(symbol_id)
        .with_context(|| format!("Unknown symbol: {symbol_id}"))?;
    let config = symbol.cluster_config();

    println!("Symbol:      {}", symbol.name());
    println!("ID:          {}", symbol.id());
    println!("Category:    {}", symbol.category());
    println!("Digits:      {}", symbol.digits());
    println!("Point:       {}", symbol.format_price(symbol.point()));
    println!("Base Volume: {}", symbol.base_volume());

    println!("\nCluster Defaults:");
    println!(
        "  Price Level Size: {}",
        symbol.format_price(config.price_level_size)
    );
    println!("  Delta Threshold:  {}", config.delta_threshold);
    println!(
        "  Points per Level: {:.0}",
        config.price_level_size / symbol.point()
    );

    Ok(())
}
