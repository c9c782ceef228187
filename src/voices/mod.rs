//! Pre-built modal voices.
//!
//! Each voice is a `MalletNode` with a configured body and mallet. Use these
//! as starting points for your own sounds, or study them to learn how the
//! resonator controls shape a timbre.
//!
//! # Example
//!
//! ```
//! use modal_dsp::graph::GraphNode;
//! use modal_dsp::graph::RenderCtx;
//! use modal_dsp::voices;
//!
//! let mut bell = voices::bell();
//! let ctx = RenderCtx::from_note(48_000.0, 72, 100.0);
//! bell.note_on(&ctx);
//!
//! let mut block = [0.0f32; 256];
//! bell.render_block(&mut block, &ctx);
//! ```

mod bell;
mod mallet;
mod marimba;

pub use bell::bell;
pub use mallet::mallet;
pub use marimba::marimba;
