//! WebGPU presentation adapter
//!
//! `scene` builds a screen-space triangle list from the game state;
//! `pipeline` uploads and draws it.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::{Palette, build_frame, build_splash};
pub use vertex::Vertex;
