//! Core library for the tabula-cleaner command line application.
//!
//! The library turns an uploaded spreadsheet or CSV file into a cleaned table
//! and serializes it again. Readers and writers live under
//! [`tabula::cleaner::io`], the table representations inside
//! [`tabula::cleaner::model`], the header and cell cleaning rules in
//! [`tabula::cleaner::clean`], format selection in [`tabula::cleaner::export`],
//! and the run orchestration under [`tabula::cleaner::sync`].

pub mod tabula;

pub use tabula::cleaner::{Result, ToolError, clean, error, export, io, model, preview, sync};
