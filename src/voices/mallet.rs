//! Mallet voice - a general-purpose struck body.
//!
//! Sits between wood and metal: harmonic partials, medium decay, a mallet
//! that is neither felt nor steel. A good starting point for your own
//! modal sounds.
//!
//! # How It Works
//!
//! 1. Click excitation, softened by a medium-hardness mallet
//! 2. 64 harmonic modes (structure 0, no stretch)
//! 3. Slightly dark tilt so the fundamental leads
//!
//! # Variations
//!
//! - Raise stretch = inharmonic, more metallic
//! - Raise damping = shorter upper partials, more wooden
//! - Move position towards 0.5 = hollow, odd partials only

use crate::dsp::ResonatorParams;
use crate::graph::mallet::{MalletConfig, MalletNode};

/// Create a general mallet voice.
///
/// Returns a struck resonator that follows note pitch.
pub fn mallet() -> MalletNode {
    MalletNode::new(MalletConfig::default()).with_params(ResonatorParams {
        structure: 0.0,
        brightness: 0.7,
        damping: 0.5,
        stretch: 0.0,
        loss: 0.3,
    })
}
