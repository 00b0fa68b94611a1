//! Workflow assembly helpers.
//!
//! This module groups the pieces that turn step specifications into a
//! [`Workflow`](crate::model::Workflow) and back: the step type registry, the
//! chain builder, the definition document conversions, static reference
//! diagnostics, and the conditional step's comparison grammar.

pub mod builder;
pub mod condition_syntax;
pub mod document;
pub mod references;
pub mod registry;
