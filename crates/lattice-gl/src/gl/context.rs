use std::fmt::Debug;

use super::types::{
    AttributeLayout, BufferKind, BufferUsage, ElementType, Filter, ShaderStage, Topology,
    UniformValue,
};

/// Stateful, handle-based graphics API the resource layer drives.
///
/// The shape follows GL: objects are opaque handles, and most calls act on
/// whatever is currently bound. Implementations are expected to be
/// single-threaded; resources share the context through `Rc`.
///
/// Creation calls return `Err(String)` with the driver's reason when the
/// underlying object could not be allocated.
pub trait GraphicsContext {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type Buffer: Copy + Eq + Debug;
    type Texture: Copy + Eq + Debug;
    type UniformLocation: Clone + Debug;

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;

    /// Uploads `source` and compiles it. Returns the compile status.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool;

    fn shader_info_log(&self, shader: Self::Shader) -> String;

    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;

    /// Attaches both stages and links. Returns the link status.
    fn link_program(
        &self,
        program: Self::Program,
        vertex: Self::Shader,
        fragment: Self::Shader,
    ) -> bool;

    fn program_info_log(&self, program: Self::Program) -> String;

    fn delete_program(&self, program: Self::Program);

    fn use_program(&self, program: Option<Self::Program>);

    // ── program inputs ────────────────────────────────────────────────────

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    /// Writes to a uniform of the currently used program.
    fn set_uniform(&self, location: &Self::UniformLocation, value: UniformValue);

    fn enable_attribute(&self, slot: u32);

    fn disable_attribute(&self, slot: u32);

    /// Describes the buffer currently bound to `BufferKind::Attribute` for `slot`.
    fn attribute_pointer(&self, slot: u32, layout: AttributeLayout);

    /// Feeds a constant value to a slot whose array is disabled.
    fn constant_attribute_vec3(&self, slot: u32, value: [f32; 3]);

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<Self::Buffer>);

    /// (Re)allocates storage for the buffer bound to `kind` and fills it.
    fn buffer_data(&self, kind: BufferKind, data: &[u8], usage: BufferUsage);

    /// Overwrites part of the storage of the buffer bound to `kind`.
    fn buffer_sub_data(&self, kind: BufferKind, offset_bytes: usize, data: &[u8]);

    fn delete_buffer(&self, buffer: Self::Buffer);

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&self) -> Result<Self::Texture, String>;

    /// Binds a 2D texture on the active unit.
    fn bind_texture(&self, texture: Option<Self::Texture>);

    fn active_texture(&self, unit: u32);

    /// Uploads tightly packed RGBA8 rows, first row first, to the bound texture.
    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]);

    fn tex_filters(&self, mag: Filter, min: Filter);

    fn generate_mipmap(&self);

    fn delete_texture(&self, texture: Self::Texture);

    // ── draws ─────────────────────────────────────────────────────────────

    fn draw_arrays(&self, topology: Topology, first: u32, count: u32);

    /// Indexed draw reading from the buffer bound to `BufferKind::Index`.
    fn draw_elements(
        &self,
        topology: Topology,
        count: u32,
        index_type: ElementType,
        offset_bytes: usize,
    );
}
