//! In-memory `GraphicsContext` for unit tests.
//!
//! Records every state-changing call and keeps just enough object state to
//! answer queries: shader "compilation" checks for a `main` entry point and
//! balanced delimiters, linking matches fragment inputs against vertex
//! outputs, and `in`/`uniform` declarations become the active inputs.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::context::GraphicsContext;
use super::types::{
    AttributeLayout, BufferKind, BufferUsage, ElementType, Filter, ShaderStage, Topology,
    UniformValue,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    UseProgram(Option<u32>),
    SetUniform { program: u32, name: String, value: UniformValue },
    EnableAttribute(u32),
    DisableAttribute(u32),
    AttributePointer { slot: u32, layout: AttributeLayout },
    ConstantAttribute { slot: u32, value: [f32; 3] },
    BindBuffer { kind: BufferKind, buffer: Option<u32> },
    BufferData { kind: BufferKind, buffer: Option<u32>, bytes: usize, usage: BufferUsage },
    BufferSubData { kind: BufferKind, buffer: Option<u32>, offset: usize, bytes: usize },
    DeleteBuffer(u32),
    BindTexture(Option<u32>),
    ActiveTexture(u32),
    TexImage { texture: Option<u32>, width: u32, height: u32 },
    TexFilters { mag: Filter, min: Filter },
    GenerateMipmap,
    DeleteTexture(u32),
    DeleteShader(u32),
    DeleteProgram(u32),
    DrawArrays { topology: Topology, first: u32, count: u32 },
    DrawElements {
        topology: Topology,
        count: u32,
        index_type: ElementType,
        offset: usize,
        buffer: Option<u32>,
    },
}

impl Call {
    pub(crate) fn is_draw(&self) -> bool {
        matches!(self, Call::DrawArrays { .. } | Call::DrawElements { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FakeUniform {
    pub program: u32,
    pub name: String,
}

#[derive(Debug, Default)]
struct Declarations {
    inputs: Vec<String>,
    outputs: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Debug)]
struct FakeShader {
    compiled: bool,
    log: String,
    decls: Declarations,
}

#[derive(Debug, Default)]
struct FakeProgram {
    log: String,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct FakeContext {
    next_id: Cell<u32>,
    fail_allocations: Cell<bool>,
    calls: RefCell<Vec<Call>>,

    shaders: RefCell<HashMap<u32, FakeShader>>,
    programs: RefCell<HashMap<u32, FakeProgram>>,
    uniform_values: RefCell<HashMap<(u32, String), UniformValue>>,

    bound_buffers: RefCell<HashMap<BufferKind, u32>>,
    buffers: RefCell<HashMap<u32, Vec<u8>>>,

    bound_texture: Cell<Option<u32>>,
    textures: RefCell<HashMap<u32, Vec<u8>>>,
}

impl Default for FakeContext {
    fn default() -> Self {
        Self {
            next_id: Cell::new(1),
            fail_allocations: Cell::new(false),
            calls: RefCell::default(),
            shaders: RefCell::default(),
            programs: RefCell::default(),
            uniform_values: RefCell::default(),
            bound_buffers: RefCell::default(),
            buffers: RefCell::default(),
            bound_texture: Cell::new(None),
            textures: RefCell::default(),
        }
    }
}

impl FakeContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `create_*` call fail.
    pub(crate) fn fail_allocations(&self, fail: bool) {
        self.fail_allocations.set(fail);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn draws(&self) -> Vec<Call> {
        self.calls.borrow().iter().filter(|c| c.is_draw()).cloned().collect()
    }

    pub(crate) fn uniform(&self, program: u32, name: &str) -> Option<UniformValue> {
        self.uniform_values
            .borrow()
            .get(&(program, name.to_string()))
            .copied()
    }

    pub(crate) fn buffer_contents(&self, buffer: u32) -> Option<Vec<u8>> {
        self.buffers.borrow().get(&buffer).cloned()
    }

    pub(crate) fn texture_pixels(&self, texture: u32) -> Option<Vec<u8>> {
        self.textures.borrow().get(&texture).cloned()
    }

    pub(crate) fn live_shaders(&self) -> usize {
        self.shaders.borrow().len()
    }

    pub(crate) fn live_programs(&self) -> usize {
        self.programs.borrow().len()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self, what: &str) -> Result<u32, String> {
        if self.fail_allocations.get() {
            return Err(format!("out of memory creating {what}"));
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Ok(id)
    }

    fn bound(&self, kind: BufferKind) -> Option<u32> {
        self.bound_buffers.borrow().get(&kind).copied()
    }
}

fn check_syntax(source: &str) -> Result<(), String> {
    if !source.contains("void main") {
        return Err("ERROR: 0:1: 'main' : no entry point defined".to_string());
    }
    for (open, close) in [('{', '}'), ('(', ')')] {
        let mut depth = 0i32;
        for ch in source.chars() {
            if ch == open {
                depth += 1;
            } else if ch == close {
                depth -= 1;
            }
            if depth < 0 {
                return Err(format!("ERROR: syntax error, unexpected '{close}'"));
            }
        }
        if depth != 0 {
            return Err(format!("ERROR: syntax error, unbalanced '{open}'"));
        }
    }
    Ok(())
}

fn parse_declarations(source: &str) -> Declarations {
    let mut decls = Declarations::default();
    for line in source.lines() {
        let line = line.trim().trim_end_matches(';');
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            continue;
        }
        let name = tokens[tokens.len() - 1].to_string();
        match tokens[0] {
            "in" | "attribute" => decls.inputs.push(name),
            "out" => decls.outputs.push(name),
            "uniform" => decls.uniforms.push(name),
            _ => {}
        }
    }
    decls
}

impl GraphicsContext for FakeContext {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type Texture = u32;
    type UniformLocation = FakeUniform;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.allocate(&format!("{stage} shader"))?;
        self.shaders.borrow_mut().insert(
            id,
            FakeShader {
                compiled: false,
                log: String::new(),
                decls: Declarations::default(),
            },
        );
        Ok(id)
    }

    fn compile_shader(&self, shader: u32, source: &str) -> bool {
        let mut shaders = self.shaders.borrow_mut();
        let Some(entry) = shaders.get_mut(&shader) else {
            return false;
        };
        match check_syntax(source) {
            Ok(()) => {
                entry.compiled = true;
                entry.log.clear();
                entry.decls = parse_declarations(source);
            }
            Err(log) => {
                entry.compiled = false;
                entry.log = log;
            }
        }
        entry.compiled
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.shaders
            .borrow()
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.shaders.borrow_mut().remove(&shader);
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.allocate("program")?;
        self.programs.borrow_mut().insert(id, FakeProgram::default());
        Ok(id)
    }

    fn link_program(&self, program: u32, vertex: u32, fragment: u32) -> bool {
        let shaders = self.shaders.borrow();
        let mut programs = self.programs.borrow_mut();
        let Some(entry) = programs.get_mut(&program) else {
            return false;
        };
        let (Some(vs), Some(fs)) = (shaders.get(&vertex), shaders.get(&fragment)) else {
            entry.log = "link error: missing shader stage".to_string();
            return false;
        };
        if !vs.compiled || !fs.compiled {
            entry.log = "link error: attached shader is not compiled".to_string();
            return false;
        }
        if let Some(missing) = fs
            .decls
            .inputs
            .iter()
            .find(|name| !vs.decls.outputs.contains(name))
        {
            entry.log = format!("link error: fragment input `{missing}` has no vertex output");
            return false;
        }

        let mut uniforms = vs.decls.uniforms.clone();
        for name in &fs.decls.uniforms {
            if !uniforms.contains(name) {
                uniforms.push(name.clone());
            }
        }
        entry.attributes = vs.decls.inputs.clone();
        entry.uniforms = uniforms;
        entry.log.clear();
        true
    }

    fn program_info_log(&self, program: u32) -> String {
        self.programs
            .borrow()
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        self.programs.borrow_mut().remove(&program);
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<FakeUniform> {
        let programs = self.programs.borrow();
        let entry = programs.get(&program)?;
        entry.uniforms.iter().any(|u| u == name).then(|| FakeUniform {
            program,
            name: name.to_string(),
        })
    }

    fn attribute_location(&self, program: u32, name: &str) -> Option<u32> {
        let programs = self.programs.borrow();
        let entry = programs.get(&program)?;
        entry
            .attributes
            .iter()
            .position(|a| a == name)
            .map(|slot| slot as u32)
    }

    fn set_uniform(&self, location: &FakeUniform, value: UniformValue) {
        self.uniform_values
            .borrow_mut()
            .insert((location.program, location.name.clone()), value);
        self.record(Call::SetUniform {
            program: location.program,
            name: location.name.clone(),
            value,
        });
    }

    fn enable_attribute(&self, slot: u32) {
        self.record(Call::EnableAttribute(slot));
    }

    fn disable_attribute(&self, slot: u32) {
        self.record(Call::DisableAttribute(slot));
    }

    fn attribute_pointer(&self, slot: u32, layout: AttributeLayout) {
        self.record(Call::AttributePointer { slot, layout });
    }

    fn constant_attribute_vec3(&self, slot: u32, value: [f32; 3]) {
        self.record(Call::ConstantAttribute { slot, value });
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.allocate("buffer")?;
        self.buffers.borrow_mut().insert(id, Vec::new());
        Ok(id)
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<u32>) {
        let mut bound = self.bound_buffers.borrow_mut();
        match buffer {
            Some(id) => bound.insert(kind, id),
            None => bound.remove(&kind),
        };
        drop(bound);
        self.record(Call::BindBuffer { kind, buffer });
    }

    fn buffer_data(&self, kind: BufferKind, data: &[u8], usage: BufferUsage) {
        let buffer = self.bound(kind);
        if let Some(id) = buffer {
            self.buffers.borrow_mut().insert(id, data.to_vec());
        }
        self.record(Call::BufferData {
            kind,
            buffer,
            bytes: data.len(),
            usage,
        });
    }

    fn buffer_sub_data(&self, kind: BufferKind, offset_bytes: usize, data: &[u8]) {
        let buffer = self.bound(kind);
        if let Some(id) = buffer {
            if let Some(storage) = self.buffers.borrow_mut().get_mut(&id) {
                let end = offset_bytes + data.len();
                if end <= storage.len() {
                    storage[offset_bytes..end].copy_from_slice(data);
                }
            }
        }
        self.record(Call::BufferSubData {
            kind,
            buffer,
            offset: offset_bytes,
            bytes: data.len(),
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.buffers.borrow_mut().remove(&buffer);
        self.record(Call::DeleteBuffer(buffer));
    }

    fn create_texture(&self) -> Result<u32, String> {
        let id = self.allocate("texture")?;
        self.textures.borrow_mut().insert(id, Vec::new());
        Ok(id)
    }

    fn bind_texture(&self, texture: Option<u32>) {
        self.bound_texture.set(texture);
        self.record(Call::BindTexture(texture));
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        let texture = self.bound_texture.get();
        if let Some(id) = texture {
            self.textures.borrow_mut().insert(id, pixels.to_vec());
        }
        self.record(Call::TexImage {
            texture,
            width,
            height,
        });
    }

    fn tex_filters(&self, mag: Filter, min: Filter) {
        self.record(Call::TexFilters { mag, min });
    }

    fn generate_mipmap(&self) {
        self.record(Call::GenerateMipmap);
    }

    fn delete_texture(&self, texture: u32) {
        self.textures.borrow_mut().remove(&texture);
        self.record(Call::DeleteTexture(texture));
    }

    fn draw_arrays(&self, topology: Topology, first: u32, count: u32) {
        self.record(Call::DrawArrays {
            topology,
            first,
            count,
        });
    }

    fn draw_elements(
        &self,
        topology: Topology,
        count: u32,
        index_type: ElementType,
        offset_bytes: usize,
    ) {
        let buffer = self.bound(BufferKind::Index);
        self.record(Call::DrawElements {
            topology,
            count,
            index_type,
            offset: offset_bytes,
            buffer,
        });
    }
}

/// Minimal shader pair exercising attributes, varyings and uniforms.
pub(crate) const VERTEX_SRC: &str = "\
#version 300 es
in vec4 position;
in vec3 color;
in vec2 uv;
uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;
out vec3 vColor;
out vec2 vUV;
void main() {
  gl_Position = projection * view * model * position;
  vColor = color;
  vUV = uv;
}";

pub(crate) const FRAGMENT_SRC: &str = "\
#version 300 es
precision mediump float;
in vec3 vColor;
in vec2 vUV;
uniform sampler2D sampler;
uniform vec4 tint;
out vec4 color;
void main() {
  color = texture(sampler, vUV) * vec4(vColor, 1) * tint;
}";
