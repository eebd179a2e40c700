use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::gl::{GraphicsContext, ShaderStage, Topology, UniformValue};

use super::ResourceError;
use super::buffer::{IndexBuffer, VertexBuffer};

/// A linked vertex + fragment shader pair.
///
/// Only successfully linked programs exist as values: construction either
/// returns a usable program or an error, and releases every handle it created
/// on the way to that error.
///
/// Uniform and attribute names are resolved on first use and cached for the
/// lifetime of the program.
pub struct ShaderProgram<C: GraphicsContext> {
    gl: Rc<C>,
    vertex: C::Shader,
    fragment: C::Shader,
    program: C::Program,
    uniforms: RefCell<HashMap<String, Option<C::UniformLocation>>>,
    attributes: RefCell<HashMap<String, Option<u32>>>,
}

impl<C: GraphicsContext> ShaderProgram<C> {
    /// Compiles both stages and links them.
    pub fn new(gl: Rc<C>, vertex_src: &str, fragment_src: &str) -> Result<Self, ResourceError> {
        let vertex = compile(&*gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile(&*gl, ShaderStage::Fragment, fragment_src) {
            Ok(shader) => shader,
            Err(e) => {
                gl.delete_shader(vertex);
                return Err(e);
            }
        };

        let program = match link(&*gl, vertex, fragment) {
            Ok(program) => program,
            Err(e) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(e);
            }
        };

        log::debug!("linked shader program {program:?}");

        Ok(Self {
            gl,
            vertex,
            fragment,
            program,
            uniforms: RefCell::default(),
            attributes: RefCell::default(),
        })
    }

    /// Makes this the current program and starts a draw chain.
    pub fn activate(&self) -> DrawCall<'_, C> {
        self.gl.use_program(Some(self.program));
        DrawCall {
            program: self,
            index: None,
        }
    }

    /// Clears the current program.
    pub fn deactivate(&self) -> &Self {
        self.gl.use_program(None);
        self
    }

    /// Writes a uniform of this program, which must be current.
    ///
    /// Names that do not resolve to an active uniform are ignored: shader
    /// compilers routinely strip uniforms the program never reads.
    pub fn set_uniform(&self, name: &str, value: UniformValue) -> &Self {
        if let Some(location) = self.uniform_location(name) {
            self.gl.set_uniform(&location, value);
        } else {
            log::trace!("uniform `{name}` is not active; write skipped");
        }
        self
    }

    /// Feeds `buffer` to the attribute `name`.
    ///
    /// Unlike uniforms, an attribute must exist: a missing one means the
    /// caller and the shader disagree about the vertex layout.
    pub fn bind_attribute(
        &self,
        name: &str,
        buffer: &VertexBuffer<C>,
        components: u32,
        stride: usize,
        offset: usize,
    ) -> Result<&Self, ResourceError> {
        let slot = self.attribute_slot(name)?;
        self.gl.enable_attribute(slot);
        buffer.bind();
        buffer.attribute_pointer(slot, components, stride, offset);
        Ok(self)
    }

    /// Disables the array for attribute `name` and feeds it a constant.
    pub fn constant_attribute(&self, name: &str, value: [f32; 3]) -> Result<&Self, ResourceError> {
        let slot = self.attribute_slot(name)?;
        self.gl.disable_attribute(slot);
        self.gl.constant_attribute_vec3(slot, value);
        Ok(self)
    }

    /// Dispatches one draw with the current state.
    ///
    /// With `index`, the buffer is bound for the duration of one indexed draw
    /// of `count` elements and unbound afterwards. Without it, `count`
    /// vertices are drawn starting at 0.
    pub fn draw(&self, topology: Topology, count: u32, index: Option<&IndexBuffer<C>>) {
        match index {
            Some(index) => {
                index.bind();
                self.gl.draw_elements(topology, count, index.data_type(), 0);
                index.unbind();
            }
            None => self.gl.draw_arrays(topology, 0, count),
        }
    }

    pub fn handle(&self) -> C::Program {
        self.program
    }

    fn uniform_location(&self, name: &str) -> Option<C::UniformLocation> {
        if let Some(cached) = self.uniforms.borrow().get(name) {
            return cached.clone();
        }
        let location = self.gl.uniform_location(self.program, name);
        self.uniforms
            .borrow_mut()
            .insert(name.to_string(), location.clone());
        location
    }

    fn attribute_slot(&self, name: &str) -> Result<u32, ResourceError> {
        let cached = self.attributes.borrow().get(name).copied();
        let slot = match cached {
            Some(slot) => slot,
            None => {
                let slot = self.gl.attribute_location(self.program, name);
                self.attributes.borrow_mut().insert(name.to_string(), slot);
                slot
            }
        };
        slot.ok_or_else(|| ResourceError::InvalidAttribute {
            name: name.to_string(),
        })
    }
}

impl<C: GraphicsContext> Drop for ShaderProgram<C> {
    fn drop(&mut self) {
        self.gl.delete_program(self.program);
        self.gl.delete_shader(self.vertex);
        self.gl.delete_shader(self.fragment);
    }
}

fn compile<C: GraphicsContext>(
    gl: &C,
    stage: ShaderStage,
    source: &str,
) -> Result<C::Shader, ResourceError> {
    let shader = gl
        .create_shader(stage)
        .map_err(ResourceError::allocation("shader"))?;

    if gl.compile_shader(shader, source) {
        return Ok(shader);
    }

    let log = gl.shader_info_log(shader);
    gl.delete_shader(shader);
    log::error!("{stage} shader failed to compile: {log}");
    Err(ResourceError::ShaderCompile { stage, log })
}

fn link<C: GraphicsContext>(
    gl: &C,
    vertex: C::Shader,
    fragment: C::Shader,
) -> Result<C::Program, ResourceError> {
    let program = gl
        .create_program()
        .map_err(ResourceError::allocation("program"))?;

    if gl.link_program(program, vertex, fragment) {
        return Ok(program);
    }

    let log = gl.program_info_log(program);
    gl.delete_program(program);
    log::error!("shader program failed to link: {log}");
    Err(ResourceError::ShaderLink { log })
}

/// One frame's draw request against an active program.
///
/// Produced by [`ShaderProgram::activate`] and consumed by [`DrawCall::draw`],
/// so an attached index buffer can never outlive the draw it was meant for.
///
/// ```ignore
/// program
///     .activate()
///     .matrix4("model", &model)
///     .uniform_i32("sampler", 0)
///     .attribute("position", &vertices, 3, 8, 0)?
///     .attribute("uv", &vertices, 2, 8, 6)?
///     .index(&indices)
///     .draw(Topology::TriangleStrip, 4);
/// ```
#[must_use = "a draw call does nothing until `draw` is called"]
pub struct DrawCall<'a, C: GraphicsContext> {
    program: &'a ShaderProgram<C>,
    index: Option<&'a IndexBuffer<C>>,
}

impl<'a, C: GraphicsContext> DrawCall<'a, C> {
    /// Sets a column-major 4×4 matrix uniform.
    pub fn matrix4(self, name: &str, value: &[f32; 16]) -> Self {
        self.uniform(name, UniformValue::Mat4(*value))
    }

    /// Sets an `int` uniform; also selects the unit a sampler reads.
    pub fn uniform_i32(self, name: &str, value: i32) -> Self {
        self.uniform(name, UniformValue::Int(value))
    }

    /// Sets a `float` uniform.
    pub fn uniform_f32(self, name: &str, value: f32) -> Self {
        self.uniform(name, UniformValue::Float(value))
    }

    /// Sets a `vec3` uniform.
    pub fn uniform_vec3(self, name: &str, value: [f32; 3]) -> Self {
        self.uniform(name, UniformValue::Vec3(value))
    }

    /// Sets a `vec4` uniform.
    pub fn uniform_vec4(self, name: &str, value: [f32; 4]) -> Self {
        self.uniform(name, UniformValue::Vec4(value))
    }

    /// Sets a uniform by name. Names the program does not declare, or that
    /// the driver optimized away, are ignored and the chain continues.
    pub fn uniform(self, name: &str, value: UniformValue) -> Self {
        self.program.set_uniform(name, value);
        self
    }

    /// See [`ShaderProgram::bind_attribute`].
    pub fn attribute(
        self,
        name: &str,
        buffer: &VertexBuffer<C>,
        components: u32,
        stride: usize,
        offset: usize,
    ) -> Result<Self, ResourceError> {
        self.program
            .bind_attribute(name, buffer, components, stride, offset)?;
        Ok(self)
    }

    /// See [`ShaderProgram::constant_attribute`].
    pub fn constant_vec3(self, name: &str, value: [f32; 3]) -> Result<Self, ResourceError> {
        self.program.constant_attribute(name, value)?;
        Ok(self)
    }

    /// Uses `buffer` as the index buffer of this draw. A later call replaces it.
    pub fn index(mut self, buffer: &'a IndexBuffer<C>) -> Self {
        self.index = Some(buffer);
        self
    }

    pub fn draw(self, topology: Topology, count: u32) {
        self.program.draw(topology, count, self.index);
    }
}
