use crate::gl_api::gl_error_name;
use crate::shader_version::ShaderStage;

pub type Result<T> = std::result::Result<T, ShaderError>;

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("invalid shader definition: {0}")]
    InvalidDefinition(String),

    #[error("GL error during {context}: {} (0x{code:X})", describe(.code))]
    Gl { context: &'static str, code: u32 },

    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("program failed to link: {log}")]
    Link { log: String },

    #[error("unknown or released shader handle")]
    InvalidHandle,

    /// A client-memory vertex element does not fit inside the vertex data.
    #[error("{size}-byte vertex element at offset {offset} overruns {len} bytes of vertex data")]
    VertexOutOfBounds { offset: usize, size: usize, len: usize },
}

fn describe(code: &u32) -> &'static str {
    gl_error_name(*code)
}
