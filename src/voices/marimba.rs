//! Marimba voice - soft, woody, short.
//!
//! # How It Works
//!
//! 1. Soft mallet: only the lowest partials get excited
//! 2. Heavy damping kills the upper modes quickly
//! 3. High loss keeps the fundamental decay under a second
//!
//! # Variations
//!
//! - Harder mallet = xylophone-like click
//! - Lower loss = longer, vibraphone-style ring

use crate::dsp::ResonatorParams;
use crate::graph::mallet::{MalletConfig, MalletNode};

/// Create a marimba voice.
pub fn marimba() -> MalletNode {
    MalletNode::new(MalletConfig {
        position: 0.22,
        resolution: 24,
        hardness: 0.25,
        ..MalletConfig::default()
    })
    .with_params(ResonatorParams {
        structure: 0.0,
        brightness: 0.4,
        damping: 0.9,
        stretch: 0.0,
        loss: 0.6,
    })
}
