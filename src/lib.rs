//! Stock GLSL programs and vertex-layout binding for legacy drawing APIs
//! reimplemented on OpenGL.
//!
//! [`Shaders`] compiles [`ShaderDefinition`]s into linked programs, keeps them
//! behind [`ShaderHandle`]s, and binds a program's attributes to a
//! [`VertexDefinition`] before drawing. [`Shaders::init`] compiles the
//! [`StockShader`]s every context needs; [`Shaders::cleanup`] deletes
//! everything again.
#![warn(clippy::all)]

// Re-export dependencies.
pub use gl;
#[cfg(feature = "sdl2")]
pub use sdl2;

mod config;
mod definition;
mod error;
pub mod gl_api;
mod gl_utils;
mod handle;
mod shader_version;
mod shaders;
mod vertex;

#[cfg(test)]
mod mock_gl;

pub use config::ShaderConfig;
pub use definition::{ShaderDefinition, StockShader, MAX_TEXCOORDS, MAX_TEXTURES};
pub use error::{Result, ShaderError};
pub use gl_api::{gl_error_name, Gl, NativeGl};
pub use handle::ShaderHandle;
pub use shader_version::{ShaderStage, ShaderVersion};
pub use shaders::{Locations, ShaderInfo, Shaders};
pub use vertex::{ElementSize, VertexDefinition, VertexElement, VertexSource, VertexType};

/// Loads the GL function table from SDL and compiles the stock programs.
/// On failure nothing compiled is left behind.
///
/// The window's GL context has to be current; it must stay current whenever
/// the returned [`Shaders`] is used.
#[cfg(feature = "sdl2")]
pub fn with_sdl2(
    video_subsystem: &sdl2::VideoSubsystem,
    config: ShaderConfig,
) -> Result<Shaders<NativeGl>> {
    #[allow(unsafe_code)]
    let native = unsafe {
        NativeGl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _)
    };

    Shaders::with_stock_programs(native, config)
}
