//! Vertex layout descriptors handed to [`Shaders::apply_program`](crate::Shaders::apply_program).

use std::ffi::c_void;

use crate::error::{Result, ShaderError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexType {
    Position,
    /// Texture coordinate set `0..=3`.
    TexCoord(u8),
    Color,
}

/// Component type of a vertex element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementSize {
    UnsignedByte,
    #[default]
    Float,
}

impl ElementSize {
    pub fn gl_type(self) -> u32 {
        match self {
            ElementSize::UnsignedByte => gl::UNSIGNED_BYTE,
            ElementSize::Float => gl::FLOAT,
        }
    }

    /// Unsigned bytes are colors in `0..=255` and get normalized to `0.0..=1.0`.
    pub fn normalized(self) -> bool {
        matches!(self, ElementSize::UnsignedByte)
    }

    /// Bytes per component.
    pub fn bytes(self) -> usize {
        match self {
            ElementSize::UnsignedByte => 1,
            ElementSize::Float => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexElement {
    pub vertex_type: VertexType,
    pub element_size: ElementSize,
    /// Number of components, `1..=4`.
    pub size: i32,
    /// Byte offset of the element inside one vertex.
    pub offset: usize,
}

impl VertexElement {
    pub fn new(
        vertex_type: VertexType,
        element_size: ElementSize,
        size: i32,
        offset: usize,
    ) -> Self {
        VertexElement {
            vertex_type,
            element_size,
            size,
            offset,
        }
    }

    /// Bytes GL reads for this element in one vertex.
    pub fn byte_len(&self) -> usize {
        usize::try_from(self.size).unwrap_or(0) * self.element_size.bytes()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexDefinition {
    pub elements: Vec<VertexElement>,
    /// Size of one vertex in bytes, used as the attribute stride.
    pub vertex_byte_size: usize,
}

impl VertexDefinition {
    pub fn new(vertex_byte_size: usize) -> Self {
        VertexDefinition {
            elements: Vec::new(),
            vertex_byte_size,
        }
    }

    pub fn with(mut self, element: VertexElement) -> Self {
        self.elements.push(element);
        self
    }
}

/// Where attribute pointers point.
#[derive(Clone, Copy, Debug)]
pub enum VertexSource<'a> {
    /// Offsets into the currently bound `GL_ARRAY_BUFFER`.
    Buffer,
    /// Client-side vertex memory. It has to outlive every draw call issued
    /// while the program is applied.
    Client(&'a [u8]),
}

impl VertexSource<'_> {
    /// Attribute pointer for `element`. A client element has to fit entirely
    /// inside the slice.
    pub(crate) fn pointer(&self, element: &VertexElement) -> Result<*const c_void> {
        let offset = element.offset;
        match *self {
            VertexSource::Buffer => Ok(offset as *const c_void),
            VertexSource::Client(data) => {
                let size = element.byte_len();
                match offset.checked_add(size) {
                    Some(end) if offset < data.len() && end <= data.len() => {
                        Ok(data[offset..].as_ptr() as *const c_void)
                    }
                    _ => Err(ShaderError::VertexOutOfBounds {
                        offset,
                        size,
                        len: data.len(),
                    }),
                }
            }
        }
    }
}
