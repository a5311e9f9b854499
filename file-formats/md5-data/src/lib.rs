//! Shared parse plumbing for id Tech 4 MD5 file formats.
//!
//! The MD5 formats come in two flavors: declarative text files produced by
//! the export tools, and little-endian binary fast-path files generated
//! from them. This crate provides the plumbing both kinds of parser sit
//! on: a whitespace/brace tokenizer for the text side, and explicit
//! little-endian read/write extension traits for the binary side.

pub mod error;
pub mod io_ext;
pub mod lexer;

pub use error::{Md5DataError, Result};
pub use io_ext::{ReadExt, WriteExt};
pub use lexer::Lexer;
