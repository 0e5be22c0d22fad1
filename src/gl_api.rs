#![allow(unsafe_code)]

use std::ffi::c_void;

use gl::types::{GLint, GLuint};

use crate::gl_utils;

/// The slice of the OpenGL API used to build and bind programs.
///
/// Object names are the raw `GLuint`s GL hands out, `0` meaning "none".
/// Location lookups return `None` where GL reports `-1`.
pub trait Gl {
    fn get_error(&self) -> u32;
    fn get_string(&self, parameter: u32) -> Option<String>;

    fn create_program(&self) -> GLuint;
    fn delete_program(&self, program: GLuint);
    fn create_shader(&self, shader_type: u32) -> GLuint;
    fn delete_shader(&self, shader: GLuint);
    fn shader_source(&self, shader: GLuint, source: &str);
    fn compile_shader(&self, shader: GLuint);
    fn get_shader_compile_status(&self, shader: GLuint) -> bool;
    fn get_shader_info_log(&self, shader: GLuint) -> String;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn get_program_link_status(&self, program: GLuint) -> bool;
    fn get_program_info_log(&self, program: GLuint) -> String;

    fn get_attrib_location(&self, program: GLuint, name: &str) -> Option<u32>;
    fn get_uniform_location(&self, program: GLuint, name: &str) -> Option<GLint>;

    fn use_program(&self, program: GLuint);
    fn uniform_1_i32(&self, location: GLint, value: i32);
    fn uniform_matrix_4_f32(&self, location: GLint, value: &[f32; 16]);

    fn enable_vertex_attrib_array(&self, index: u32);
    fn disable_vertex_attrib_array(&self, index: u32);

    /// `pointer` is either a byte offset into the bound `GL_ARRAY_BUFFER`
    /// or an address in client memory that must stay valid until drawing.
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        pointer: *const c_void,
    );
}

/// [`Gl`] backed by the global function pointers of the `gl` crate.
#[derive(Debug)]
pub struct NativeGl {
    _private: (),
}

impl NativeGl {
    /// Loads the GL function table through `loader`.
    ///
    /// # Safety
    ///
    /// The context `loader` resolves symbols for must be current on this
    /// thread for as long as the returned value is used.
    pub unsafe fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        NativeGl { _private: () }
    }
}

impl Gl for NativeGl {
    fn get_error(&self) -> u32 {
        unsafe { gl::GetError() }
    }

    fn get_string(&self, parameter: u32) -> Option<String> {
        unsafe { gl_utils::get_parameter_string(parameter) }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn create_shader(&self, shader_type: u32) -> GLuint {
        unsafe { gl::CreateShader(shader_type) }
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        unsafe { gl_utils::shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }

    fn get_shader_compile_status(&self, shader: GLuint) -> bool {
        unsafe { gl_utils::get_shader_compile_status(shader) }
    }

    fn get_shader_info_log(&self, shader: GLuint) -> String {
        unsafe { gl_utils::get_shader_info_log(shader) }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn get_program_link_status(&self, program: GLuint) -> bool {
        unsafe { gl_utils::get_program_link_status(program) }
    }

    fn get_program_info_log(&self, program: GLuint) -> String {
        unsafe { gl_utils::get_program_info_log(program) }
    }

    fn get_attrib_location(&self, program: GLuint, name: &str) -> Option<u32> {
        unsafe { gl_utils::get_attrib_location(program, name) }
    }

    fn get_uniform_location(&self, program: GLuint, name: &str) -> Option<GLint> {
        unsafe { gl_utils::get_uniform_location(program, name) }
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn uniform_1_i32(&self, location: GLint, value: i32) {
        unsafe { gl::Uniform1i(location, value) }
    }

    fn uniform_matrix_4_f32(&self, location: GLint, value: &[f32; 16]) {
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::DisableVertexAttribArray(index) }
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        pointer: *const c_void,
    ) {
        unsafe {
            gl_utils::vertex_attrib_pointer(index, size, data_type, normalized, stride, pointer)
        }
    }
}

/// Name of a `glGetError` code, for log and error messages.
pub fn gl_error_name(code: u32) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::CONTEXT_LOST => "GL_CONTEXT_LOST",
        0x8031 => "GL_TABLE_TOO_LARGE1",
        _ => "<unknown>",
    }
}
