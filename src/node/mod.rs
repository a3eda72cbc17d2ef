//! Expression trees and the operations which produce them.
//!
//! A tree is made of [labelled](label) nodes held in an [Expression](tree::Expression). Trees
//! are produced by the [parser](parser::parse) from text, and by [differentiating](differentiate)
//! another tree. Both kinds can be evaluated with [Evaluable](crate::Evaluable), and
//! differentiated again.

pub mod label;
pub mod tree;
pub mod parser;
pub mod differentiate;
