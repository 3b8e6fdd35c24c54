//! Minimal symbolic backend
//!
//! The combinatorial search only needs a narrow computer-algebra surface:
//! expand (forms are kept expanded by construction), substitute, exact zero
//! testing and small linear solves. This module provides exactly that:
//! sparse polynomials over ℚ, their fraction field, and the exterior algebra
//! over the frame, with deterministic iteration everywhere.

mod form;
mod poly;
mod ratio;

pub use form::{Blade, Form, FormDisplay, FrameIndex};
pub use poly::{Monomial, Poly, Symbol};
pub use ratio::Ratio;
