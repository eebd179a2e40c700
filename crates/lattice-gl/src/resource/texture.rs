use std::rc::Rc;

use image::RgbaImage;

use crate::gl::{Filter, GraphicsContext};

use super::ResourceError;

/// An immutable 2D RGBA texture with a full mipmap chain.
///
/// Rows are uploaded bottom-up so that texture coordinate `v = 0` maps to the
/// bottom of the source image. Sampling is linear when magnifying and
/// trilinear when minifying. To change the image, create a new texture.
pub struct Texture<C: GraphicsContext> {
    gl: Rc<C>,
    handle: C::Texture,
    width: u32,
    height: u32,
}

impl<C: GraphicsContext> Texture<C> {
    /// Uploads `image` and generates mipmaps. The texture is left bound.
    pub fn new(gl: Rc<C>, image: &RgbaImage) -> Result<Self, ResourceError> {
        let handle = gl
            .create_texture()
            .map_err(ResourceError::allocation("texture"))?;

        let (width, height) = image.dimensions();
        let flipped = image::imageops::flip_vertical(image);

        gl.bind_texture(Some(handle));
        gl.tex_image_rgba8(width, height, flipped.as_raw());
        gl.tex_filters(Filter::Linear, Filter::LinearMipmapLinear);
        gl.generate_mipmap();

        log::debug!("created {width}x{height} texture {handle:?}");

        Ok(Self {
            gl,
            handle,
            width,
            height,
        })
    }

    /// Binds on the active texture unit.
    pub fn bind(&self) {
        self.gl.bind_texture(Some(self.handle));
    }

    /// Selects texture unit `unit`, then binds.
    pub fn bind_unit(&self, unit: u32) {
        self.gl.active_texture(unit);
        self.bind();
    }

    pub fn unbind(&self) {
        self.gl.bind_texture(None);
    }

    pub fn handle(&self) -> C::Texture {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl<C: GraphicsContext> Drop for Texture<C> {
    fn drop(&mut self) {
        self.gl.delete_texture(self.handle);
    }
}
