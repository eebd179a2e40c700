use std::fmt;

/// Shader stage compiled independently before linking.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Binding slot a buffer is attached to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferKind {
    /// Per-vertex attribute data (`ARRAY_BUFFER`).
    Attribute,
    /// Element indices (`ELEMENT_ARRAY_BUFFER`).
    Index,
}

/// Scalar type stored in a buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ElementType {
    F32,
    U32,
}

impl ElementType {
    /// Width of one element in bytes.
    #[inline]
    pub const fn size_bytes(self) -> usize {
        match self {
            ElementType::F32 => std::mem::size_of::<f32>(),
            ElementType::U32 => std::mem::size_of::<u32>(),
        }
    }
}

/// Upload frequency hint passed with every full allocation.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    #[default]
    Static,
    /// Rewritten regularly, e.g. per-frame animation data.
    Dynamic,
    /// Written once, drawn a handful of times.
    Stream,
}

/// Primitive assembly mode for a draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Texture sampling filter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Filter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

/// How an attribute slot reads its bound buffer.
///
/// Stride and offset are already expressed in bytes here; element-based
/// conversion happens in `GpuBuffer::attribute_pointer`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeLayout {
    pub components: u32,
    pub data_type: ElementType,
    pub stride_bytes: usize,
    pub offset_bytes: usize,
}

/// Value written to a uniform location.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    /// Column-major 4x4 matrix.
    Mat4([f32; 16]),
    Int(i32),
    Float(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}
