//! Concrete representation tables
//!
//! The construction engine is agnostic about where its letters and
//! representative points come from; this module supplies them for specific
//! group/representation pairs. Each table bundles a ready-made alphabet, the
//! three representative points and the frame generator names used for
//! rendering.

mod su3_so3;

pub use su3_so3::su3_so3_r3;

use crate::alphabet::Alphabet;
use crate::orbit::RepresentationInfo;

/// A ready-to-construct representation: letters, points and frame names.
#[derive(Debug)]
pub struct RepresentationTable {
    /// The letter arena.
    pub alphabet: Alphabet,
    /// Special, principal and generic representative points.
    pub info: RepresentationInfo,
    /// Frame generator names, indexed by `FrameIndex`.
    pub frame: Vec<String>,
}
