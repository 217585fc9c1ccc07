//! A schema-driven, arity-aware command line argument parser.
//!
//! Declare the positional arguments, named options, and boolean flags a program expects,
//! then parse a raw token list against that schema into a name-keyed set of typed values.
//!
//! ### Example
//! ```
//! use clargs::{ArgumentSpec, Schema};
//!
//! let schema = Schema::new(vec![
//!     ArgumentSpec::variadic::<String>("inputs").required(),
//!     ArgumentSpec::option::<String>("output").alias("o"),
//!     ArgumentSpec::flag("optimized").alias("O"),
//! ]);
//!
//! let matches = schema
//!     .parse(&["program", "-o", "out.bin", "-O", "a.src", "b.src"])
//!     .unwrap();
//! assert_eq!(
//!     matches.get::<Vec<String>>("inputs"),
//!     Some(&vec!["a.src".to_string(), "b.src".to_string()])
//! );
//! assert_eq!(matches.get::<String>("output"), Some(&"out.bin".to_string()));
//! assert_eq!(matches.get::<bool>("optimized"), Some(&true));
//! ```
#![deny(missing_docs)]
mod api;
mod model;
mod parser;
mod value;

pub use api::*;
pub use model::Arity;
pub use parser::{HelpRenderer, Matches, ParseError};
pub use value::{ArgValue, ConversionError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
