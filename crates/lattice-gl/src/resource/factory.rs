use std::rc::Rc;

use image::DynamicImage;

use crate::gl::{BufferUsage, GraphicsContext};

use super::{IndexBuffer, ResourceError, ShaderProgram, Texture, VertexBuffer};

/// Creates programs, buffers and textures bound to one graphics context.
///
/// The factory keeps nothing it creates; each resource shares the context
/// handle and owns its own GPU objects.
pub struct ResourceFactory<C: GraphicsContext> {
    gl: Rc<C>,
}

impl<C: GraphicsContext> Clone for ResourceFactory<C> {
    fn clone(&self) -> Self {
        Self {
            gl: Rc::clone(&self.gl),
        }
    }
}

impl<C: GraphicsContext> ResourceFactory<C> {
    pub fn new(gl: C) -> Self {
        Self { gl: Rc::new(gl) }
    }

    pub fn from_shared(gl: Rc<C>) -> Self {
        Self { gl }
    }

    /// The underlying context, for state the resource layer does not cover
    /// (clearing, viewport, blending).
    pub fn context(&self) -> &Rc<C> {
        &self.gl
    }

    pub fn program(
        &self,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<ShaderProgram<C>, ResourceError> {
        ShaderProgram::new(self.gl.clone(), vertex_src, fragment_src)
    }

    pub fn array(&self, data: &[f32]) -> Result<VertexBuffer<C>, ResourceError> {
        self.array_with_usage(data, BufferUsage::Static)
    }

    pub fn array_with_usage(
        &self,
        data: &[f32],
        usage: BufferUsage,
    ) -> Result<VertexBuffer<C>, ResourceError> {
        VertexBuffer::new(self.gl.clone(), data, usage)
    }

    pub fn index(&self, data: &[u32]) -> Result<IndexBuffer<C>, ResourceError> {
        self.index_with_usage(data, BufferUsage::Static)
    }

    pub fn index_with_usage(
        &self,
        data: &[u32],
        usage: BufferUsage,
    ) -> Result<IndexBuffer<C>, ResourceError> {
        IndexBuffer::new(self.gl.clone(), data, usage)
    }

    /// Creates a texture from any decoded image; non-RGBA8 images are converted.
    pub fn texture(&self, image: &DynamicImage) -> Result<Texture<C>, ResourceError> {
        match image {
            DynamicImage::ImageRgba8(rgba) => Texture::new(self.gl.clone(), rgba),
            other => Texture::new(self.gl.clone(), &other.to_rgba8()),
        }
    }
}
