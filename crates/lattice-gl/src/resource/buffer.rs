use std::marker::PhantomData;
use std::rc::Rc;

use bytemuck::Pod;

use crate::gl::{AttributeLayout, BufferKind, BufferUsage, ElementType, GraphicsContext};

use super::ResourceError;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for u32 {}
}

/// Scalar types a `GpuBuffer` can hold.
///
/// The element type also fixes the binding slot: `f32` data feeds vertex
/// attributes, `u32` data feeds indexed draws.
pub trait Element: Pod + sealed::Sealed {
    const DATA_TYPE: ElementType;
    const KIND: BufferKind;
}

impl Element for f32 {
    const DATA_TYPE: ElementType = ElementType::F32;
    const KIND: BufferKind = BufferKind::Attribute;
}

impl Element for u32 {
    const DATA_TYPE: ElementType = ElementType::U32;
    const KIND: BufferKind = BufferKind::Index;
}

/// Vertex attribute data.
pub type VertexBuffer<C> = GpuBuffer<C, f32>;

/// Element indices.
pub type IndexBuffer<C> = GpuBuffer<C, u32>;

/// One GPU data buffer with a fixed element type.
///
/// The buffer tracks its logical element count. Uploads of the same count
/// overwrite the existing storage in place and keep the handle; uploads of a
/// different count allocate a fresh handle and release the old one.
pub struct GpuBuffer<C: GraphicsContext, T: Element> {
    gl: Rc<C>,
    handle: C::Buffer,
    len: usize,
    usage: BufferUsage,
    _element: PhantomData<T>,
}

impl<C: GraphicsContext, T: Element> GpuBuffer<C, T> {
    /// Allocates storage sized to `data` and uploads it.
    pub fn new(gl: Rc<C>, data: &[T], usage: BufferUsage) -> Result<Self, ResourceError> {
        let handle = gl
            .create_buffer()
            .map_err(ResourceError::allocation("buffer"))?;

        let buffer = Self {
            gl,
            handle,
            len: data.len(),
            usage,
            _element: PhantomData,
        };
        buffer.upload_full(handle, data);

        log::debug!(
            "created {:?} buffer {:?} with {} elements",
            T::KIND,
            handle,
            data.len()
        );
        Ok(buffer)
    }

    /// Uploads `data`, reallocating only when the element count changes.
    pub fn update(&mut self, data: &[T]) -> Result<(), ResourceError> {
        if data.len() == self.len {
            self.bind();
            self.gl
                .buffer_sub_data(T::KIND, 0, bytemuck::cast_slice(data));
            self.unbind();
            return Ok(());
        }

        let handle = self
            .gl
            .create_buffer()
            .map_err(ResourceError::allocation("buffer"))?;
        self.upload_full(handle, data);

        log::trace!(
            "reallocated {:?} buffer {:?} -> {:?} ({} -> {} elements)",
            T::KIND,
            self.handle,
            handle,
            self.len,
            data.len()
        );

        let old = std::mem::replace(&mut self.handle, handle);
        self.gl.delete_buffer(old);
        self.len = data.len();
        Ok(())
    }

    /// Uploads `len` zeroed elements under the same policy as `update`.
    pub fn resize(&mut self, len: usize) -> Result<(), ResourceError> {
        self.update(&vec![T::zeroed(); len])
    }

    /// Binds this buffer on the slot matching its element type.
    pub fn bind(&self) {
        self.gl.bind_buffer(T::KIND, Some(self.handle));
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(T::KIND, None);
    }

    /// Describes this buffer's layout for `slot`.
    ///
    /// `stride` and `offset` count elements, not bytes. The buffer must be
    /// bound on the attribute slot.
    pub fn attribute_pointer(&self, slot: u32, components: u32, stride: usize, offset: usize) {
        let width = T::DATA_TYPE.size_bytes();
        self.gl.attribute_pointer(
            slot,
            AttributeLayout {
                components,
                data_type: T::DATA_TYPE,
                stride_bytes: stride * width,
                offset_bytes: offset * width,
            },
        );
    }

    /// Logical element count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current GPU handle. Changes whenever an upload changes the element count.
    pub fn handle(&self) -> C::Buffer {
        self.handle
    }

    pub fn kind(&self) -> BufferKind {
        T::KIND
    }

    pub fn data_type(&self) -> ElementType {
        T::DATA_TYPE
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn upload_full(&self, handle: C::Buffer, data: &[T]) {
        self.gl.bind_buffer(T::KIND, Some(handle));
        self.gl
            .buffer_data(T::KIND, bytemuck::cast_slice(data), self.usage);
        self.gl.bind_buffer(T::KIND, None);
    }
}

impl<C: GraphicsContext, T: Element> Drop for GpuBuffer<C, T> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.handle);
    }
}
