//! Parses infix expressions in one real variable `x` into trees, evaluates them, and
//! differentiates them symbolically.
//!
//! ```
//! use graphcalc::{parse, Evaluable};
//!
//! let expression = parse("2*x+5*x*x").unwrap();
//! assert_eq!(expression.evaluate(1.0), 7.0);
//!
//! let derivative = expression.differentiate();
//! assert_eq!(derivative.evaluate(1.0), 12.0);
//! ```

#![no_std]
extern crate alloc;

pub mod error;
pub mod node;
pub mod numeric;
pub mod evaluate;
pub mod graph;

#[cfg(test)]
pub mod tests;

pub use crate::{
    error::{ParseError, ParseErrorReason},
    evaluate::Evaluable,
    node::{
        label::{BinaryOp, Label},
        tree::{Expression, NodeId, NodeRef},
        parser::{parse, parse_with_settings, Parser, ParserSettings},
        differentiate::{Differentiator, Unrefined},
    },
};

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
