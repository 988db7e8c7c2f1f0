// Catalog boundary: loading, typed row parsing, and the spreadsheet builder.
// Everything past this module works on `models::Catalog`, never on raw rows.

pub mod loader;
pub mod parse;
pub mod sheet;

pub use loader::{CatalogSource, FileCatalogSource, JsonCatalogSource};
pub use parse::{parse_catalog_slice, parse_catalog_str, parse_catalog_value};
