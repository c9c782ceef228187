//! Playable wrappers around the DSP primitives.
//!
//! Graph nodes add what an instrument needs on top of `dsp`: note events,
//! pitch in Hz, and block rendering of any length. The audio thread only
//! ever sees `GraphNode`.

/// Struck/excited modal voice.
pub mod mallet;
/// Core traits shared by all graph nodes.
pub mod node;

pub use mallet::{ExcitationMode, MalletConfig, MalletNode};
pub use node::{GraphNode, RenderCtx};
