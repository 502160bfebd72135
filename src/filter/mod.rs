//! Client-side quick filtering of the product table.

mod columns;
mod quick;

pub use columns::{filter_products, Column};
pub use quick::{matches, FilterToken, QuickFilter};
