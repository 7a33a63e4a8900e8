// src/table/mod.rs

//! Recovering records from column-aligned text tables.
//!
//! Parsing happens in two separate stages:
//! - [`layout`] infers column boundaries from the header line, once per table.
//! - [`row`] slices each data line with that layout.

pub mod layout;
pub mod row;

pub use layout::{Column, FieldLayout};
pub use row::{parse_row, parse_table, Record, LIST_SEPARATOR};
