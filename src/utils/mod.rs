//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`remap`] - Dense alphabet remapping for rank-table indexing
//! - [`cigar`] - Run-length edit scripts reported with every match
//! - [`encoding`] - Little-endian primitives for persisted tables
//!
//! ```
//! use edsearch::utils::{RemapTable, Cigar, EditOp};
//!
//! let table = RemapTable::build(b"acgt");
//! assert_eq!(table.remap(b"ga"), Some(vec![3, 1]));
//!
//! let cigar = Cigar::compress(&[EditOp::Match, EditOp::Match, EditOp::Deletion]);
//! assert_eq!(cigar.to_string(), "2M1D");
//! ```

pub mod cigar;
pub mod encoding;
pub mod remap;

pub use cigar::{Cigar, EditOp, ParseCigarError};
pub use remap::{RemapTable, SENTINEL};
