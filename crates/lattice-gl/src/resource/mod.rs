//! GPU resources and the draw-call chain.
//!
//! Everything here is created once at setup through [`ResourceFactory`] and
//! driven every frame through [`ShaderProgram::activate`]:
//! use → uniforms → attributes → optional index buffer → draw.

mod buffer;
mod error;
mod factory;
mod program;
mod texture;

pub use buffer::{Element, GpuBuffer, IndexBuffer, VertexBuffer};
pub use error::ResourceError;
pub use factory::ResourceFactory;
pub use program::{DrawCall, ShaderProgram};
pub use texture::Texture;
