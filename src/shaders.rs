use gl::types::{GLint, GLuint};

use crate::config::ShaderConfig;
use crate::definition::{
    ShaderDefinition, StockShader, COLOR_ATTRIBUTE, MAX_TEXCOORDS, MAX_TEXTURES, MODEL_VIEW_UNIFORM,
    POSITION_ATTRIBUTE, PROJECTION_UNIFORM, TEXCOORD_ATTRIBUTES, TEXTURE_UNIFORMS,
};
use crate::error::{Result, ShaderError};
use crate::gl_api::{gl_error_name, Gl};
use crate::handle::{HandleTable, ShaderHandle};
use crate::shader_version::{ShaderStage, ShaderVersion};
use crate::vertex::{VertexDefinition, VertexSource, VertexType};

// Drivers queue at most a handful of errors; stop early on a broken one.
const MAX_STALE_ERRORS: usize = 16;

/// Resolved inputs of a linked program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Locations {
    pub position: Option<u32>,
    pub textures: [Option<GLint>; MAX_TEXTURES],
    pub texcoords: [Option<u32>; MAX_TEXCOORDS],
    pub color: Option<u32>,
    pub model_view: Option<GLint>,
    pub projection: Option<GLint>,
}

impl Locations {
    /// Attribute fed by elements of `vertex_type`, if the program has one.
    pub fn attribute(&self, vertex_type: VertexType) -> Option<u32> {
        match vertex_type {
            VertexType::Position => self.position,
            VertexType::TexCoord(set) => self.texcoords.get(set as usize).copied().flatten(),
            VertexType::Color => self.color,
        }
    }
}

/// A compiled program and the GL objects it owns.
#[derive(Debug)]
pub struct ShaderInfo {
    texture_count: usize,
    texcoord_count: usize,
    has_color: bool,
    vertex_shader: GLuint,
    fragment_shader: GLuint,
    program: GLuint,
    locations: Locations,
}

impl ShaderInfo {
    pub fn program(&self) -> GLuint {
        self.program
    }

    pub fn vertex_shader(&self) -> Option<GLuint> {
        Some(self.vertex_shader).filter(|&id| id != 0)
    }

    pub fn fragment_shader(&self) -> Option<GLuint> {
        Some(self.fragment_shader).filter(|&id| id != 0)
    }

    pub fn texture_count(&self) -> usize {
        self.texture_count
    }

    pub fn texcoord_count(&self) -> usize {
        self.texcoord_count
    }

    pub fn has_color(&self) -> bool {
        self.has_color
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }
}

/// GL objects of a compile in progress, deleted again if it fails.
#[derive(Default)]
struct Objects {
    program: GLuint,
    vertex_shader: GLuint,
    fragment_shader: GLuint,
}

/// Compiled programs of one GL context, including the stock ones.
///
/// All methods issue GL calls and must run with that context current.
pub struct Shaders<G: Gl> {
    gl: G,
    config: ShaderConfig,
    version: ShaderVersion,
    programs: HandleTable<ShaderInfo>,
    stock: [Option<ShaderHandle>; StockShader::COUNT],
}

impl<G: Gl> Shaders<G> {
    /// Builds a `Shaders` and compiles the stock programs.
    ///
    /// If any stock program fails, whatever did compile is deleted before
    /// the error is returned.
    pub fn with_stock_programs(gl: G, config: ShaderConfig) -> Result<Self> {
        let mut shaders = Shaders::new(gl, config);
        if let Err(err) = shaders.init() {
            shaders.cleanup();
            return Err(err);
        }
        Ok(shaders)
    }

    pub fn new(gl: G, config: ShaderConfig) -> Self {
        let version = config
            .shader_version
            .unwrap_or_else(|| ShaderVersion::detect(&gl));
        tracing::debug!("compiling shaders as {:?}", version);
        Shaders {
            gl,
            config,
            version,
            programs: HandleTable::default(),
            stock: [None; StockShader::COUNT],
        }
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn config(&self) -> &ShaderConfig {
        &self.config
    }

    pub fn shader_version(&self) -> ShaderVersion {
        self.version
    }

    pub fn info(&self, handle: ShaderHandle) -> Option<&ShaderInfo> {
        self.programs.get(handle)
    }

    /// Number of live programs, stock ones included.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Compiles and links `definition` and resolves its inputs.
    ///
    /// On failure every GL object created on the way is deleted again.
    pub fn compile_definition(&mut self, definition: &ShaderDefinition) -> Result<ShaderHandle> {
        definition.validate()?;
        self.discard_stale_errors();

        let mut objects = Objects::default();
        if let Err(err) = self.build(definition, &mut objects) {
            tracing::debug!("discarding program {}: {}", objects.program, err);
            self.delete_objects(&objects);
            return Err(err);
        }

        let locations = self.resolve_locations(objects.program, definition);
        let handle = self.programs.insert(ShaderInfo {
            texture_count: definition.texture_count,
            texcoord_count: definition.texcoord_count,
            has_color: definition.has_color,
            vertex_shader: objects.vertex_shader,
            fragment_shader: objects.fragment_shader,
            program: objects.program,
            locations,
        });
        tracing::debug!("compiled program {} as {:?}", objects.program, handle);
        Ok(handle)
    }

    /// Deletes a program and its shaders. Returns `false` for unknown handles.
    pub fn delete_shader(&mut self, handle: ShaderHandle) -> bool {
        let info = match self.programs.remove(handle) {
            Some(info) => info,
            None => return false,
        };

        for slot in self.stock.iter_mut() {
            if *slot == Some(handle) {
                *slot = None;
            }
        }

        self.delete_objects(&Objects {
            program: info.program,
            vertex_shader: info.vertex_shader,
            fragment_shader: info.fragment_shader,
        });
        tracing::debug!("deleted program {} ({:?})", info.program, handle);
        true
    }

    /// Makes `handle` the current program and points its attributes at the
    /// elements of `definition`.
    ///
    /// Sampler `i` is bound to texture unit `i` for the first
    /// `texture_count` samplers the program has. Elements whose input the
    /// program lacks are skipped.
    pub fn apply_program(
        &self,
        handle: ShaderHandle,
        source: VertexSource<'_>,
        definition: Option<&VertexDefinition>,
        texture_count: usize,
    ) -> Result<()> {
        let info = self.programs.get(handle).ok_or(ShaderError::InvalidHandle)?;

        // Resolve every pointer up front so a bad element leaves GL untouched.
        let mut bindings = Vec::new();
        let mut stride = 0;
        if let Some(definition) = definition {
            stride = i32::try_from(definition.vertex_byte_size).map_err(|_| {
                ShaderError::InvalidDefinition(format!(
                    "vertex size of {} bytes exceeds the largest GL stride",
                    definition.vertex_byte_size
                ))
            })?;
            for element in &definition.elements {
                if let Some(index) = info.locations.attribute(element.vertex_type) {
                    bindings.push((index, element, source.pointer(element)?));
                }
            }
        }

        tracing::trace!(
            "applying program {} with {} attributes",
            info.program,
            bindings.len()
        );
        self.gl.use_program(info.program);

        let texture_count = texture_count.min(info.texture_count);
        for (unit, location) in info.locations.textures[..texture_count].iter().enumerate() {
            if let Some(location) = *location {
                self.gl.uniform_1_i32(location, unit as i32);
            }
        }

        for (index, element, pointer) in bindings {
            self.gl.enable_vertex_attrib_array(index);
            self.gl.vertex_attrib_pointer(
                index,
                element.size,
                element.element_size.gl_type(),
                element.element_size.normalized(),
                stride,
                pointer,
            );
        }
        Ok(())
    }

    /// Undoes [`apply_program`](Self::apply_program) for the same layout.
    pub fn clear_program(
        &self,
        handle: ShaderHandle,
        definition: Option<&VertexDefinition>,
    ) -> Result<()> {
        let info = self.programs.get(handle).ok_or(ShaderError::InvalidHandle)?;

        if let Some(definition) = definition {
            for element in &definition.elements {
                if let Some(index) = info.locations.attribute(element.vertex_type) {
                    self.gl.disable_vertex_attrib_array(index);
                }
            }
        }

        tracing::trace!("cleared program {}", info.program);
        self.gl.use_program(0);
        Ok(())
    }

    /// Uploads column-major `modelView` and `projection` matrices to the
    /// program, leaving it current.
    pub fn set_matrices(
        &self,
        handle: ShaderHandle,
        model_view: &[f32; 16],
        projection: &[f32; 16],
    ) -> Result<()> {
        let info = self.programs.get(handle).ok_or(ShaderError::InvalidHandle)?;
        self.gl.use_program(info.program);
        if let Some(location) = info.locations.model_view {
            self.gl.uniform_matrix_4_f32(location, model_view);
        }
        if let Some(location) = info.locations.projection {
            self.gl.uniform_matrix_4_f32(location, projection);
        }
        Ok(())
    }

    /// Compiles every [`StockShader`], replacing any compiled before.
    ///
    /// A stock program that fails is logged and left unavailable; the first
    /// such error is returned once all of them were attempted.
    pub fn init(&mut self) -> Result<()> {
        let mut first_error = None;
        for stock in StockShader::ALL {
            if let Some(old) = self.stock[stock.index()] {
                self.delete_shader(old);
            }

            match self.compile_definition(&stock.definition()) {
                Ok(handle) => self.stock[stock.index()] = Some(handle),
                Err(err) => {
                    tracing::error!("failed to compile stock shader {:?}: {}", stock, err);
                    first_error.get_or_insert(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn stock_program(&self, stock: StockShader) -> Option<ShaderHandle> {
        self.stock[stock.index()]
    }

    /// Deletes the stock programs and anything else still alive.
    pub fn cleanup(&mut self) {
        for stock in StockShader::ALL {
            if let Some(handle) = self.stock[stock.index()].take() {
                self.delete_shader(handle);
            }
        }

        for handle in self.programs.handles() {
            tracing::warn!("deleting leftover program {:?}", handle);
            self.delete_shader(handle);
        }
    }

    fn build(&self, definition: &ShaderDefinition, objects: &mut Objects) -> Result<()> {
        objects.program = self.gl.create_program();
        self.check("glCreateProgram")?;

        if let Some(source) = &definition.vertex_source {
            self.compile_stage(
                ShaderStage::Vertex,
                source,
                objects.program,
                &mut objects.vertex_shader,
            )?;
        }
        if let Some(source) = &definition.fragment_source {
            self.compile_stage(
                ShaderStage::Fragment,
                source,
                objects.program,
                &mut objects.fragment_shader,
            )?;
        }

        self.gl.link_program(objects.program);
        self.check("glLinkProgram")?;
        if !self.gl.get_program_link_status(objects.program) {
            return Err(ShaderError::Link {
                log: self.gl.get_program_info_log(objects.program),
            });
        }
        Ok(())
    }

    fn compile_stage(
        &self,
        stage: ShaderStage,
        source: &str,
        program: GLuint,
        shader: &mut GLuint,
    ) -> Result<()> {
        *shader = self.gl.create_shader(stage.gl_enum());
        self.check("glCreateShader")?;

        self.gl.shader_source(*shader, &self.version.apply(stage, source));
        self.check("glShaderSource")?;

        self.gl.compile_shader(*shader);
        self.check("glCompileShader")?;
        if !self.gl.get_shader_compile_status(*shader) {
            return Err(ShaderError::Compile {
                stage,
                log: self.gl.get_shader_info_log(*shader),
            });
        }

        self.gl.attach_shader(program, *shader);
        self.check("glAttachShader")
    }

    fn resolve_locations(&self, program: GLuint, definition: &ShaderDefinition) -> Locations {
        let gl = &self.gl;
        let mut locations = Locations {
            position: gl.get_attrib_location(program, POSITION_ATTRIBUTE),
            model_view: gl.get_uniform_location(program, MODEL_VIEW_UNIFORM),
            projection: gl.get_uniform_location(program, PROJECTION_UNIFORM),
            ..Locations::default()
        };
        if locations.position.is_none() {
            tracing::warn!("program {} has no `{}` attribute", program, POSITION_ATTRIBUTE);
        }

        let textures = locations.textures.iter_mut().zip(TEXTURE_UNIFORMS);
        for (slot, name) in textures.take(definition.texture_count) {
            *slot = gl.get_uniform_location(program, name);
            if slot.is_none() {
                tracing::warn!("program {} has no `{}` uniform", program, name);
            }
        }
        let texcoords = locations.texcoords.iter_mut().zip(TEXCOORD_ATTRIBUTES);
        for (slot, name) in texcoords.take(definition.texcoord_count) {
            *slot = gl.get_attrib_location(program, name);
            if slot.is_none() {
                tracing::warn!("program {} has no `{}` attribute", program, name);
            }
        }
        if definition.has_color {
            locations.color = gl.get_attrib_location(program, COLOR_ATTRIBUTE);
            if locations.color.is_none() {
                tracing::warn!("program {} has no `{}` attribute", program, COLOR_ATTRIBUTE);
            }
        }
        locations
    }

    fn check(&self, context: &'static str) -> Result<()> {
        if !self.config.check_errors {
            return Ok(());
        }
        match self.gl.get_error() {
            gl::NO_ERROR => Ok(()),
            code => Err(ShaderError::Gl { context, code }),
        }
    }

    fn discard_stale_errors(&self) {
        if !self.config.check_errors {
            return;
        }
        for _ in 0..MAX_STALE_ERRORS {
            match self.gl.get_error() {
                gl::NO_ERROR => return,
                code => tracing::trace!("discarding stale {}", gl_error_name(code)),
            }
        }
    }

    fn delete_objects(&self, objects: &Objects) {
        if objects.vertex_shader != 0 {
            self.gl.delete_shader(objects.vertex_shader);
        }
        if objects.fragment_shader != 0 {
            self.gl.delete_shader(objects.fragment_shader);
        }
        if objects.program != 0 {
            self.gl.delete_program(objects.program);
        }
    }
}

impl<G: Gl> Drop for Shaders<G> {
    fn drop(&mut self) {
        if !self.programs.is_empty() {
            tracing::warn!(
                "{} shader programs dropped without cleanup, their GL objects leak",
                self.programs.len()
            );
        }
    }
}
