//! Bell voice - bright, inharmonic, long ring.
//!
//! # How It Works
//!
//! 1. Hard mallet reaches the whole mode spectrum
//! 2. Stretched partials (stiff body) for the metallic clang
//! 3. Low loss and light damping for a long tail
//!
//! # Variations
//!
//! - More structure = denser, gong-like partials
//! - Fewer modes (resolution 16-32) = simpler chime

use crate::dsp::ResonatorParams;
use crate::graph::mallet::{MalletConfig, MalletNode};

/// Create a bell voice.
pub fn bell() -> MalletNode {
    MalletNode::new(MalletConfig {
        position: 0.1,
        resolution: 96,
        hardness: 0.9,
        level: 0.7,
        ..MalletConfig::default()
    })
    .with_params(ResonatorParams {
        structure: 0.3,
        brightness: 1.0,
        damping: 0.1,
        stretch: 0.6,
        loss: 0.1,
    })
}
