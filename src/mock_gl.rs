//! Recording [`Gl`] used by the unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::ffi::c_void;
use std::rc::Rc;

use gl::types::{GLint, GLuint};

use crate::gl_api::Gl;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    CreateProgram(GLuint),
    DeleteProgram(GLuint),
    CreateShader { shader_type: u32, shader: GLuint },
    DeleteShader(GLuint),
    ShaderSource(GLuint),
    CompileShader(GLuint),
    AttachShader { program: GLuint, shader: GLuint },
    LinkProgram(GLuint),
    UseProgram(GLuint),
    Uniform1i { location: GLint, value: i32 },
    UniformMatrix4 { location: GLint, value: [f32; 16] },
    EnableAttrib(u32),
    DisableAttrib(u32),
    AttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        pointer: usize,
    },
}

/// Calls after which an injected error is raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    CreateProgram,
    CreateShader,
    ShaderSource,
    CompileShader,
    AttachShader,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    next_name: GLuint,
    pending_errors: VecDeque<u32>,
    inject: Vec<(Op, u32)>,
    shader_types: HashMap<GLuint, u32>,
    sources: HashMap<GLuint, String>,
    failing_stages: Vec<u32>,
    link_fails: bool,
    attribs: HashMap<String, u32>,
    uniforms: HashMap<String, GLint>,
    shading_language_version: Option<String>,
    live_programs: BTreeSet<GLuint>,
    live_shaders: BTreeSet<GLuint>,
}

/// Clones share one recording, so a test can keep a view on a `MockGl`
/// it handed over.
#[derive(Clone)]
pub(crate) struct MockGl {
    state: Rc<RefCell<State>>,
}

impl MockGl {
    pub fn new() -> Self {
        MockGl {
            state: Rc::new(RefCell::new(State {
                next_name: 1,
                shading_language_version: Some("1.20".to_owned()),
                ..State::default()
            })),
        }
    }

    /// Locations matching the stock programs' interfaces.
    pub fn with_stock_locations() -> Self {
        let gl = Self::new();
        gl.set_attrib("position", 0);
        gl.set_attrib("color", 1);
        gl.set_attrib("texcoord", 2);
        gl.set_uniform("texture0", 0);
        gl.set_uniform("modelView", 1);
        gl.set_uniform("projection", 2);
        gl
    }

    pub fn set_attrib(&self, name: &str, location: u32) {
        self.state.borrow_mut().attribs.insert(name.to_owned(), location);
    }

    pub fn set_uniform(&self, name: &str, location: GLint) {
        self.state.borrow_mut().uniforms.insert(name.to_owned(), location);
    }

    pub fn set_shading_language_version(&self, version: Option<&str>) {
        self.state.borrow_mut().shading_language_version = version.map(str::to_owned);
    }

    pub fn fail_compile(&self, shader_type: u32) {
        self.state.borrow_mut().failing_stages.push(shader_type);
    }

    pub fn fail_link(&self) {
        self.state.borrow_mut().link_fails = true;
    }

    /// Raise `code` from `glGetError` after the next `op`.
    pub fn inject_error(&self, op: Op, code: u32) {
        self.state.borrow_mut().inject.push((op, code));
    }

    /// Queue an error that is already pending before anything runs.
    pub fn push_pending_error(&self, code: u32) {
        self.state.borrow_mut().pending_errors.push_back(code);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn source_of(&self, shader: GLuint) -> Option<String> {
        self.state.borrow().sources.get(&shader).cloned()
    }

    pub fn live_programs(&self) -> BTreeSet<GLuint> {
        self.state.borrow().live_programs.clone()
    }

    pub fn live_shaders(&self) -> BTreeSet<GLuint> {
        self.state.borrow().live_shaders.clone()
    }

    /// Shader objects by type, for checking which stages were created.
    pub fn shader_types(&self) -> BTreeMap<GLuint, u32> {
        self.state.borrow().shader_types.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn after(&self, op: Op) {
        let mut state = self.state.borrow_mut();
        if let Some(i) = state.inject.iter().position(|(o, _)| *o == op) {
            let (_, code) = state.inject.remove(i);
            state.pending_errors.push_back(code);
        }
    }

    fn next_name(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let name = state.next_name;
        state.next_name += 1;
        name
    }
}

impl Gl for MockGl {
    fn get_error(&self) -> u32 {
        self.state
            .borrow_mut()
            .pending_errors
            .pop_front()
            .unwrap_or(gl::NO_ERROR)
    }

    fn get_string(&self, parameter: u32) -> Option<String> {
        assert_eq!(parameter, gl::SHADING_LANGUAGE_VERSION);
        self.state.borrow().shading_language_version.clone()
    }

    fn create_program(&self) -> GLuint {
        let program = self.next_name();
        self.state.borrow_mut().live_programs.insert(program);
        self.record(Call::CreateProgram(program));
        self.after(Op::CreateProgram);
        program
    }

    fn delete_program(&self, program: GLuint) {
        self.state.borrow_mut().live_programs.remove(&program);
        self.record(Call::DeleteProgram(program));
    }

    fn create_shader(&self, shader_type: u32) -> GLuint {
        let shader = self.next_name();
        {
            let mut state = self.state.borrow_mut();
            state.live_shaders.insert(shader);
            state.shader_types.insert(shader, shader_type);
        }
        self.record(Call::CreateShader { shader_type, shader });
        self.after(Op::CreateShader);
        shader
    }

    fn delete_shader(&self, shader: GLuint) {
        self.state.borrow_mut().live_shaders.remove(&shader);
        self.record(Call::DeleteShader(shader));
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        self.state.borrow_mut().sources.insert(shader, source.to_owned());
        self.record(Call::ShaderSource(shader));
        self.after(Op::ShaderSource);
    }

    fn compile_shader(&self, shader: GLuint) {
        self.record(Call::CompileShader(shader));
        self.after(Op::CompileShader);
    }

    fn get_shader_compile_status(&self, shader: GLuint) -> bool {
        let state = self.state.borrow();
        let shader_type = state.shader_types.get(&shader).copied().unwrap_or_default();
        !state.failing_stages.contains(&shader_type)
    }

    fn get_shader_info_log(&self, shader: GLuint) -> String {
        format!("0:1(1): error: shader {} is broken", shader)
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.record(Call::AttachShader { program, shader });
        self.after(Op::AttachShader);
    }

    fn link_program(&self, program: GLuint) {
        self.record(Call::LinkProgram(program));
    }

    fn get_program_link_status(&self, _program: GLuint) -> bool {
        !self.state.borrow().link_fails
    }

    fn get_program_info_log(&self, _program: GLuint) -> String {
        "error: unresolved varying".to_owned()
    }

    fn get_attrib_location(&self, _program: GLuint, name: &str) -> Option<u32> {
        self.state.borrow().attribs.get(name).copied()
    }

    fn get_uniform_location(&self, _program: GLuint, name: &str) -> Option<GLint> {
        self.state.borrow().uniforms.get(name).copied()
    }

    fn use_program(&self, program: GLuint) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_1_i32(&self, location: GLint, value: i32) {
        self.record(Call::Uniform1i { location, value });
    }

    fn uniform_matrix_4_f32(&self, location: GLint, value: &[f32; 16]) {
        self.record(Call::UniformMatrix4 {
            location,
            value: *value,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::DisableAttrib(index));
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
        self.record(Call::AttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            pointer: pointer as usize,
        });
    }
}
