//! `GraphicsContext` over `glow`.
//!
//! Every call is a thin forwarding wrapper. glow marks the whole API `unsafe`
//! because it cannot check that the GL context is current on this thread; the
//! host that created the `glow::Context` owns that guarantee.

use glow::HasContext;

use super::context::GraphicsContext;
use super::types::{
    AttributeLayout, BufferKind, BufferUsage, ElementType, Filter, ShaderStage, Topology,
    UniformValue,
};

fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn target_enum(kind: BufferKind) -> u32 {
    match kind {
        BufferKind::Attribute => glow::ARRAY_BUFFER,
        BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn usage_enum(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Static => glow::STATIC_DRAW,
        BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
        BufferUsage::Stream => glow::STREAM_DRAW,
    }
}

fn element_enum(ty: ElementType) -> u32 {
    match ty {
        ElementType::F32 => glow::FLOAT,
        ElementType::U32 => glow::UNSIGNED_INT,
    }
}

fn topology_enum(topology: Topology) -> u32 {
    match topology {
        Topology::Points => glow::POINTS,
        Topology::Lines => glow::LINES,
        Topology::LineStrip => glow::LINE_STRIP,
        Topology::LineLoop => glow::LINE_LOOP,
        Topology::Triangles => glow::TRIANGLES,
        Topology::TriangleStrip => glow::TRIANGLE_STRIP,
        Topology::TriangleFan => glow::TRIANGLE_FAN,
    }
}

fn filter_enum(filter: Filter) -> i32 {
    let value = match filter {
        Filter::Nearest => glow::NEAREST,
        Filter::Linear => glow::LINEAR,
        Filter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
        Filter::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
        Filter::NearestMipmapLinear => glow::NEAREST_MIPMAP_LINEAR,
        Filter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
    };
    value as i32
}

/// Converts a size, count or offset to GL's signed int, or logs and returns
/// `None` when it does not fit.
fn gl_int<T>(value: T, what: &str) -> Option<i32>
where
    T: TryInto<i32> + Copy + std::fmt::Display,
{
    match value.try_into() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("{what} {value} exceeds GL int range, call skipped");
            None
        }
    }
}

fn texture_unit_enum(unit: u32) -> Option<u32> {
    let value = glow::TEXTURE0.checked_add(unit);
    if value.is_none() {
        log::warn!("texture unit {unit} out of range, call skipped");
    }
    value
}

impl GraphicsContext for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type Texture = glow::Texture;
    type UniformLocation = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage_enum(stage)) }
    }

    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool {
        unsafe {
            HasContext::shader_source(self, shader, source);
            HasContext::compile_shader(self, shader);
            HasContext::get_shader_compile_status(self, shader)
        }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { HasContext::get_shader_info_log(self, shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn link_program(
        &self,
        program: Self::Program,
        vertex: Self::Shader,
        fragment: Self::Shader,
    ) -> bool {
        unsafe {
            HasContext::attach_shader(self, program, vertex);
            HasContext::attach_shader(self, program, fragment);
            HasContext::link_program(self, program);
            HasContext::get_program_link_status(self, program)
        }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { HasContext::get_program_info_log(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { HasContext::get_uniform_location(self, program, name) }
    }

    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { HasContext::get_attrib_location(self, program, name) }
    }

    fn set_uniform(&self, location: &Self::UniformLocation, value: UniformValue) {
        let location = Some(location);
        unsafe {
            match value {
                UniformValue::Mat4(m) => {
                    HasContext::uniform_matrix_4_f32_slice(self, location, false, &m)
                }
                UniformValue::Int(v) => HasContext::uniform_1_i32(self, location, v),
                UniformValue::Float(v) => HasContext::uniform_1_f32(self, location, v),
                UniformValue::Vec3(v) => HasContext::uniform_3_f32_slice(self, location, &v),
                UniformValue::Vec4(v) => HasContext::uniform_4_f32_slice(self, location, &v),
            }
        }
    }

    fn enable_attribute(&self, slot: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, slot) }
    }

    fn disable_attribute(&self, slot: u32) {
        unsafe { HasContext::disable_vertex_attrib_array(self, slot) }
    }

    fn attribute_pointer(&self, slot: u32, layout: AttributeLayout) {
        let (Some(components), Some(stride), Some(offset)) = (
            gl_int(layout.components, "attribute components"),
            gl_int(layout.stride_bytes, "attribute stride"),
            gl_int(layout.offset_bytes, "attribute offset"),
        ) else {
            return;
        };
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                slot,
                components,
                element_enum(layout.data_type),
                false,
                stride,
                offset,
            )
        }
    }

    fn constant_attribute_vec3(&self, slot: u32, value: [f32; 3]) {
        let [x, y, z] = value;
        unsafe { HasContext::vertex_attrib_3_f32(self, slot, x, y, z) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, target_enum(kind), buffer) }
    }

    fn buffer_data(&self, kind: BufferKind, data: &[u8], usage: BufferUsage) {
        unsafe { HasContext::buffer_data_u8_slice(self, target_enum(kind), data, usage_enum(usage)) }
    }

    fn buffer_sub_data(&self, kind: BufferKind, offset_bytes: usize, data: &[u8]) {
        let Some(offset) = gl_int(offset_bytes, "buffer offset") else {
            return;
        };
        unsafe { HasContext::buffer_sub_data_u8_slice(self, target_enum(kind), offset, data) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { HasContext::create_texture(self) }
    }

    fn bind_texture(&self, texture: Option<Self::Texture>) {
        unsafe { HasContext::bind_texture(self, glow::TEXTURE_2D, texture) }
    }

    fn active_texture(&self, unit: u32) {
        let Some(unit) = texture_unit_enum(unit) else {
            return;
        };
        unsafe { HasContext::active_texture(self, unit) }
    }

    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        let (Some(width), Some(height)) = (
            gl_int(width, "texture width"),
            gl_int(height, "texture height"),
        ) else {
            return;
        };
        unsafe {
            HasContext::tex_image_2d(
                self,
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            )
        }
    }

    fn tex_filters(&self, mag: Filter, min: Filter) {
        unsafe {
            HasContext::tex_parameter_i32(
                self,
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                filter_enum(mag),
            );
            HasContext::tex_parameter_i32(
                self,
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                filter_enum(min),
            );
        }
    }

    fn generate_mipmap(&self) {
        unsafe { HasContext::generate_mipmap(self, glow::TEXTURE_2D) }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { HasContext::delete_texture(self, texture) }
    }

    fn draw_arrays(&self, topology: Topology, first: u32, count: u32) {
        let (Some(first), Some(count)) = (gl_int(first, "first vertex"), gl_int(count, "draw count"))
        else {
            return;
        };
        unsafe { HasContext::draw_arrays(self, topology_enum(topology), first, count) }
    }

    fn draw_elements(
        &self,
        topology: Topology,
        count: u32,
        index_type: ElementType,
        offset_bytes: usize,
    ) {
        let (Some(count), Some(offset)) = (
            gl_int(count, "draw count"),
            gl_int(offset_bytes, "index offset"),
        ) else {
            return;
        };
        unsafe {
            HasContext::draw_elements(
                self,
                topology_enum(topology),
                count,
                element_enum(index_type),
                offset,
            )
        }
    }
}
