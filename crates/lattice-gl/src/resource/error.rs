use thiserror::Error;

use crate::gl::ShaderStage;

/// Failures raised while creating or driving GPU resources.
///
/// Unresolved uniform names are deliberately absent: writing to a uniform the
/// shader compiler optimised away is a no-op, not an error.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A shader stage did not compile. `log` carries the driver diagnostics.
    #[error("could not compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    /// Both stages compiled but the program did not link.
    #[error("could not link shader program: {log}")]
    ShaderLink { log: String },

    /// The linked program has no active attribute with this name.
    #[error("invalid attribute location: \"{name}\"")]
    InvalidAttribute { name: String },

    /// The context could not allocate an object.
    #[error("failed to allocate {what}: {reason}")]
    Allocation { what: &'static str, reason: String },
}

impl ResourceError {
    pub(crate) fn allocation(what: &'static str) -> impl FnOnce(String) -> Self {
        move |reason| ResourceError::Allocation { what, reason }
    }
}
