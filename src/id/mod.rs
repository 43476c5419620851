//! # Identifier Generation
//!
//! Short, roughly time-ordered identifiers built from the current Unix
//! timestamp and a random component, rendered in base 36.
//!
//! ## Invariants
//! - Two ids generated one second or more apart compare in generation order
//! - One generator never issues the same id twice; separate generators
//!   rely on the width of the random component

pub mod errors;
pub mod generator;

pub use errors::{IdError, IdResult};
pub use generator::{new_id, Id, IdGenerator, SCALE};
