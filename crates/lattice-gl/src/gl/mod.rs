//! Graphics context boundary.
//!
//! This module is responsible for:
//! - the `GraphicsContext` trait the resource layer is written against
//! - the small value types passed across it (stages, targets, topologies)
//! - the `glow::Context` implementation used in production

mod backend;
mod context;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use context::GraphicsContext;
pub use types::{
    AttributeLayout, BufferKind, BufferUsage, ElementType, Filter, ShaderStage, Topology,
    UniformValue,
};
