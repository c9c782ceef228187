pub mod dsp;
pub mod graph; // Playable voice nodes
pub mod voices; // Preset bodies and mallets

pub use dsp::{Resonator, ResonatorParams};
pub use graph::{GraphNode, MalletNode, RenderCtx};

/// Largest block a node renders in one pass. Longer requests are chunked.
pub const MAX_BLOCK_SIZE: usize = 2048;
