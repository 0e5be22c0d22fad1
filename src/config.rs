use crate::shader_version::ShaderVersion;

/// Settings for [`Shaders`](crate::Shaders).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaderConfig {
    /// Dialect to compile for. `None` asks the context.
    pub shader_version: Option<ShaderVersion>,

    /// Poll `glGetError` after every step of a compile.
    /// Compile and link status are checked regardless.
    pub check_errors: bool,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        ShaderConfig {
            shader_version: None,
            check_errors: true,
        }
    }
}

impl ShaderConfig {
    pub fn with_shader_version(mut self, version: ShaderVersion) -> Self {
        self.shader_version = Some(version);
        self
    }

    pub fn with_error_checks(mut self, check_errors: bool) -> Self {
        self.check_errors = check_errors;
        self
    }
}
