//! Lattice GL crate.
//!
//! A small resource layer over a handle-based graphics context: compile and
//! link shader programs, upload vertex and index data, create textures, and
//! assemble each frame's draw as one chained call. Also carries the frame
//! loop and winit runtime that drive those draws.

pub mod gl;
pub mod resource;

pub mod core;
pub mod window;
pub mod time;

pub mod logging;

pub use gl::GraphicsContext;
pub use resource::{
    DrawCall, GpuBuffer, IndexBuffer, ResourceError, ResourceFactory, ShaderProgram, Texture,
    VertexBuffer,
};
