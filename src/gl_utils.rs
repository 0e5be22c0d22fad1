#![allow(unsafe_code)]

use std::ffi::{c_void, CStr, CString};

use gl::{
    types::{GLchar, GLint, GLuint},
    INFO_LOG_LENGTH, LINK_STATUS,
};

pub unsafe fn get_parameter_string(parameter: u32) -> Option<String> {
    let raw_ptr = gl::GetString(parameter);
    if raw_ptr.is_null() {
        return None;
    }
    Some(
        CStr::from_ptr(raw_ptr as *const GLchar)
            .to_string_lossy()
            .into_owned(),
    )
}

pub unsafe fn shader_source(shader: GLuint, source: &str) {
    gl::ShaderSource(
        shader,
        1,
        &(source.as_ptr() as *const GLchar),
        &(source.len() as GLint),
    );
}

pub unsafe fn get_shader_compile_status(shader: GLuint) -> bool {
    let mut status = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
    status == gl::TRUE as GLint
}

pub unsafe fn get_shader_info_log(shader: GLuint) -> String {
    let mut length = 0;
    gl::GetShaderiv(shader, INFO_LOG_LENGTH, &mut length);
    if length <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; length as usize];
    gl::GetShaderInfoLog(shader, length, &mut length, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(length.max(0) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}

pub unsafe fn get_program_link_status(program: GLuint) -> bool {
    let mut status = 0;
    gl::GetProgramiv(program, LINK_STATUS, &mut status);
    status == gl::TRUE as GLint
}

pub unsafe fn get_program_info_log(program: GLuint) -> String {
    let mut length = 0;
    gl::GetProgramiv(program, INFO_LOG_LENGTH, &mut length);
    if length <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; length as usize];
    gl::GetProgramInfoLog(program, length, &mut length, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(length.max(0) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}

// A name with an interior NUL can't exist in GLSL, so it resolves to nothing.
pub unsafe fn get_uniform_location(program: GLuint, name: &str) -> Option<GLint> {
    let name = CString::new(name).ok()?;
    let location = gl::GetUniformLocation(program, name.as_ptr());
    if location < 0 {
        None
    } else {
        Some(location)
    }
}

pub unsafe fn get_attrib_location(program: GLuint, name: &str) -> Option<u32> {
    let name = CString::new(name).ok()?;
    let location = gl::GetAttribLocation(program, name.as_ptr());
    if location < 0 {
        None
    } else {
        Some(location as u32)
    }
}

pub unsafe fn vertex_attrib_pointer(
    index: u32,
    size: i32,
    data_type: u32,
    normalized: bool,
    stride: i32,
    pointer: *const c_void,
) {
    gl::VertexAttribPointer(
        index,
        size,
        data_type,
        if normalized { gl::TRUE } else { gl::FALSE },
        stride,
        pointer,
    );
}
