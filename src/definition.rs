use std::borrow::Cow;

use crate::error::{Result, ShaderError};

pub const MAX_TEXTURES: usize = 4;
pub const MAX_TEXCOORDS: usize = 4;

pub(crate) const POSITION_ATTRIBUTE: &str = "position";
pub(crate) const COLOR_ATTRIBUTE: &str = "color";
pub(crate) const TEXTURE_UNIFORMS: [&str; MAX_TEXTURES] =
    ["texture0", "texture1", "texture2", "texture3"];
pub(crate) const TEXCOORD_ATTRIBUTES: [&str; MAX_TEXCOORDS] =
    ["texcoord", "texcoord2", "texcoord3", "texcoord4"];
pub(crate) const MODEL_VIEW_UNIFORM: &str = "modelView";
pub(crate) const PROJECTION_UNIFORM: &str = "projection";

/// Sources and interface of a program.
///
/// After linking, the program's inputs are looked up by name:
/// `position`, `texture0`..`texture3` (for `texture_count`),
/// `texcoord`, `texcoord2`..`texcoord4` (for `texcoord_count`),
/// `color` (when `has_color`), `modelView` and `projection`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderDefinition {
    pub vertex_source: Option<Cow<'static, str>>,
    pub fragment_source: Option<Cow<'static, str>>,
    pub texture_count: usize,
    pub texcoord_count: usize,
    pub has_color: bool,
}

impl ShaderDefinition {
    pub fn new(
        vertex_source: impl Into<Cow<'static, str>>,
        fragment_source: impl Into<Cow<'static, str>>,
    ) -> Self {
        ShaderDefinition {
            vertex_source: Some(vertex_source.into()),
            fragment_source: Some(fragment_source.into()),
            texture_count: 0,
            texcoord_count: 0,
            has_color: false,
        }
    }

    pub fn textures(mut self, count: usize) -> Self {
        self.texture_count = count;
        self
    }

    pub fn texcoords(mut self, count: usize) -> Self {
        self.texcoord_count = count;
        self
    }

    pub fn color(mut self, has_color: bool) -> Self {
        self.has_color = has_color;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.texture_count > MAX_TEXTURES {
            return Err(ShaderError::InvalidDefinition(format!(
                "{} textures requested, at most {} supported",
                self.texture_count, MAX_TEXTURES
            )));
        }
        if self.texcoord_count > MAX_TEXCOORDS {
            return Err(ShaderError::InvalidDefinition(format!(
                "{} texcoord sets requested, at most {} supported",
                self.texcoord_count, MAX_TEXCOORDS
            )));
        }
        if self.vertex_source.is_none() && self.fragment_source.is_none() {
            return Err(ShaderError::InvalidDefinition(
                "neither a vertex nor a fragment shader given".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Programs compiled by [`Shaders::init`](crate::Shaders::init).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StockShader {
    /// Vertex color only.
    BasicNoTex,
    /// One texture modulated by vertex color.
    BasicTex1,
}

impl StockShader {
    pub const COUNT: usize = 2;
    pub const ALL: [StockShader; StockShader::COUNT] =
        [StockShader::BasicNoTex, StockShader::BasicTex1];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn definition(self) -> ShaderDefinition {
        match self {
            StockShader::BasicNoTex => {
                ShaderDefinition::new(BASIC_NOTEX_VS, BASIC_NOTEX_FS).color(true)
            }
            StockShader::BasicTex1 => ShaderDefinition::new(BASIC_TEX1_VS, BASIC_TEX1_FS)
                .textures(1)
                .texcoords(1)
                .color(true),
        }
    }
}

const BASIC_NOTEX_VS: &str = r#"
attribute vec4 position;
attribute vec4 color;
uniform mat4 modelView;
uniform mat4 projection;
varying vec4 outColor;
void main() {
    gl_Position = projection * (modelView * position);
    outColor = color;
}
"#;

const BASIC_NOTEX_FS: &str = r#"
#ifdef GL_ES
precision mediump float;
#endif
varying vec4 outColor;
void main() {
    gl_FragColor = outColor;
}
"#;

const BASIC_TEX1_VS: &str = r#"
attribute vec4 position;
attribute vec2 texcoord;
attribute vec4 color;
uniform mat4 modelView;
uniform mat4 projection;
varying vec2 outTexcoord;
varying vec4 outColor;
void main() {
    gl_Position = projection * (modelView * position);
    outColor = color;
    outTexcoord = texcoord;
}
"#;

const BASIC_TEX1_FS: &str = r#"
#ifdef GL_ES
precision mediump float;
#endif
uniform sampler2D texture0;
varying vec2 outTexcoord;
varying vec4 outColor;
void main() {
    gl_FragColor = texture2D(texture0, outTexcoord) * outColor;
}
"#;
