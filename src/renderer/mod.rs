//! WebGPU rendering module
//!
//! The frame is built on the CPU as a flat triangle list in playfield pixels,
//! then uploaded and drawn in a single pass.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, playfield_to_ndc};
pub use shapes::{RenderOptions, build_frame};
pub use vertex::Vertex;
