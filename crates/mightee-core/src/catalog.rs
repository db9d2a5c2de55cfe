//! # Catalog
//!
//! The static lookup table mapping a (product, packaging, variant)
//! selection to its inventory cell and unit price.
//!
//! ## Catalog Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            Inventory sheet, row 6, columns C through P                  │
//! │                                                                         │
//! │   C6 D6 E6   F6 G6 H6   I6 J6 K6   L6 M6 N6    O6    P6               │
//! │   ── ── ──   ── ── ──   ── ── ──   ── ── ──    ──    ──               │
//! │   Buko Juice            Buko Shake              Pizza Box              │
//! │   Cup        Bottle     Cup        Bottle       Supreme Others        │
//! │   S  M  L    S  M  L    S  M  L    S  M  L                            │
//! │   65 75 95   65 75 115  65 75 95   65 75 115    250   190             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Changing the product lineup means editing this table, not the logic.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CellAddress, Packaging, Product, Selection, Variant};

// =============================================================================
// Catalog Entry
// =============================================================================

/// Where a selection is tallied and what one unit costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub selection: Selection,
    pub cell: CellAddress,
    pub unit_price: Money,
}

// =============================================================================
// Static Table
// =============================================================================

/// The row every inventory tally lives on.
const TALLY_ROW: u32 = 6;

const fn entry(
    product: Product,
    packaging: Packaging,
    variant: Variant,
    col: u32,
    price_pesos: i64,
) -> CatalogEntry {
    CatalogEntry {
        selection: Selection::new(product, packaging, variant),
        cell: CellAddress::new(col, TALLY_ROW),
        unit_price: Money::from_pesos(price_pesos),
    }
}

/// Every selection reachable through the UI, in sheet column order.
///
/// Invariant: exactly one entry per reachable (product, packaging,
/// variant) combination.
pub static CATALOG: [CatalogEntry; 14] = [
    // Buko Juice - columns C..H
    entry(Product::BukoJuice, Packaging::Cup, Variant::Small, 3, 65),
    entry(Product::BukoJuice, Packaging::Cup, Variant::Medium, 4, 75),
    entry(Product::BukoJuice, Packaging::Cup, Variant::Large, 5, 95),
    entry(Product::BukoJuice, Packaging::Bottle, Variant::Small, 6, 65),
    entry(Product::BukoJuice, Packaging::Bottle, Variant::Medium, 7, 75),
    entry(Product::BukoJuice, Packaging::Bottle, Variant::Large, 8, 115),
    // Buko Shake - columns I..N
    entry(Product::BukoShake, Packaging::Cup, Variant::Small, 9, 65),
    entry(Product::BukoShake, Packaging::Cup, Variant::Medium, 10, 75),
    entry(Product::BukoShake, Packaging::Cup, Variant::Large, 11, 95),
    entry(Product::BukoShake, Packaging::Bottle, Variant::Small, 12, 65),
    entry(Product::BukoShake, Packaging::Bottle, Variant::Medium, 13, 75),
    entry(Product::BukoShake, Packaging::Bottle, Variant::Large, 14, 115),
    // Pizza - columns O..P
    entry(Product::Pizza, Packaging::Box, Variant::Supreme, 15, 250),
    entry(Product::Pizza, Packaging::Box, Variant::Others, 16, 190),
];

// =============================================================================
// Lookup
// =============================================================================

/// Resolves a selection to its catalog entry.
///
/// Fails with [`CoreError::SelectionNotFound`] if the combination is
/// absent: a contract violation given the fixed UI choices.
pub fn lookup(selection: Selection) -> CoreResult<&'static CatalogEntry> {
    CATALOG
        .iter()
        .find(|e| e.selection == selection)
        .ok_or(CoreError::SelectionNotFound(selection))
}

/// The packaging choices offered for a product.
pub fn packagings_for(product: Product) -> &'static [Packaging] {
    match product {
        Product::BukoJuice | Product::BukoShake => &[Packaging::Cup, Packaging::Bottle],
        Product::Pizza => &[Packaging::Box],
    }
}

/// The variant choices offered for a product (size for drinks, flavor
/// for pizza).
pub fn variants_for(product: Product) -> &'static [Variant] {
    match product {
        Product::BukoJuice | Product::BukoShake => {
            &[Variant::Small, Variant::Medium, Variant::Large]
        }
        Product::Pizza => &[Variant::Supreme, Variant::Others],
    }
}

/// Every cell the catalog tallies into. Daily partition copies are
/// zero-filled over exactly these.
pub fn tracked_cells() -> impl Iterator<Item = CellAddress> {
    CATALOG.iter().map(|e| e.cell)
}

// =============================================================================
// Unit Tests
// =============================================================================
