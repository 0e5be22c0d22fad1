//! GLSL dialect selection.
//!
//! Shader sources are written against GLSL ES 1.00 (`attribute`, `varying`,
//! `gl_FragColor`, `texture2D`). Each [`ShaderVersion`] supplies the header
//! that lets the same text compile on the context's shading language.

use std::fmt;

use crate::gl_api::Gl;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderVersion {
    /// Sources are passed to GL untouched.
    Raw,
    /// Desktop GLSL 1.20 (OpenGL 2.1).
    Gl120,
    /// Desktop GLSL 1.40 (OpenGL 3.1).
    Gl140,
    /// Desktop GLSL 1.50 and later (OpenGL 3.2+ core profiles, including macOS).
    Gl150,
    /// GLSL ES 1.00 (OpenGL ES 2.0, WebGL 1).
    Es100,
    /// GLSL ES 3.00 and later (OpenGL ES 3.0, WebGL 2).
    Es300,
}

impl ShaderVersion {
    /// Picks the dialect for the current context.
    pub fn detect(gl: &impl Gl) -> Self {
        match gl.get_string(gl::SHADING_LANGUAGE_VERSION) {
            Some(version) => {
                let detected = Self::parse(&version);
                tracing::debug!(
                    "GL_SHADING_LANGUAGE_VERSION {:?} -> {:?}",
                    version,
                    detected
                );
                detected
            }
            None => {
                tracing::warn!("GL_SHADING_LANGUAGE_VERSION unavailable, assuming GLSL 1.20");
                ShaderVersion::Gl120
            }
        }
    }

    /// Parses a `GL_SHADING_LANGUAGE_VERSION` string such as `"4.60 NVIDIA"`
    /// or `"OpenGL ES GLSL ES 3.00"`.
    pub fn parse(version: &str) -> Self {
        let is_es = version.contains(" ES ");
        let numbers = version
            .split_whitespace()
            .find(|word| word.starts_with(|c: char| c.is_ascii_digit()));

        let (major, minor) = match numbers.and_then(parse_major_minor) {
            Some(parsed) => parsed,
            None if is_es => return ShaderVersion::Es100,
            None => return ShaderVersion::Gl120,
        };

        if is_es {
            if major >= 3 {
                ShaderVersion::Es300
            } else {
                ShaderVersion::Es100
            }
        } else if (major, minor) >= (1, 50) {
            ShaderVersion::Gl150
        } else if (major, minor) >= (1, 40) {
            ShaderVersion::Gl140
        } else {
            ShaderVersion::Gl120
        }
    }

    /// Text prepended to every `stage` source.
    pub fn prefix(self, stage: ShaderStage) -> &'static str {
        use ShaderStage::*;
        match (self, stage) {
            (ShaderVersion::Raw, _) => "",
            (ShaderVersion::Gl120, _) => "#version 120\n",
            (ShaderVersion::Es100, _) => "#version 100\n",
            (ShaderVersion::Gl140, Vertex) => concat!(
                "#version 140\n",
                "#define attribute in\n",
                "#define varying out\n",
            ),
            (ShaderVersion::Gl140, Fragment) => concat!(
                "#version 140\n",
                "#define varying in\n",
                "#define texture2D texture\n",
                "out vec4 fragColor;\n",
                "#define gl_FragColor fragColor\n",
            ),
            (ShaderVersion::Gl150, Vertex) => concat!(
                "#version 150\n",
                "#define attribute in\n",
                "#define varying out\n",
            ),
            (ShaderVersion::Gl150, Fragment) => concat!(
                "#version 150\n",
                "#define varying in\n",
                "#define texture2D texture\n",
                "out vec4 fragColor;\n",
                "#define gl_FragColor fragColor\n",
            ),
            (ShaderVersion::Es300, Vertex) => concat!(
                "#version 300 es\n",
                "#define attribute in\n",
                "#define varying out\n",
            ),
            (ShaderVersion::Es300, Fragment) => concat!(
                "#version 300 es\n",
                "precision mediump float;\n",
                "#define varying in\n",
                "#define texture2D texture\n",
                "out vec4 fragColor;\n",
                "#define gl_FragColor fragColor\n",
            ),
        }
    }

    pub(crate) fn apply(self, stage: ShaderStage, source: &str) -> String {
        let prefix = self.prefix(stage);
        let mut full = String::with_capacity(prefix.len() + source.len());
        full.push_str(prefix);
        full.push_str(source);
        full
    }
}

// "1.0.17" and "4.60" both count: only the first two components matter.
fn parse_major_minor(word: &str) -> Option<(u32, u32)> {
    let mut parts = word.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts
        .next()
        .map(|minor| {
            let digits: String = minor.chars().take_while(char::is_ascii_digit).collect();
            // "1.4" means 1.40, not 1.04.
            match digits.len() {
                0 => 0,
                1 => digits.parse::<u32>().unwrap_or(0) * 10,
                _ => digits[..2].parse().unwrap_or(0),
            }
        })
        .unwrap_or(0);
    Some((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_gl::MockGl;

    #[test]
    fn parses_desktop_versions() {
        assert_eq!(ShaderVersion::parse("4.60 NVIDIA"), ShaderVersion::Gl150);
        assert_eq!(ShaderVersion::parse("4.10"), ShaderVersion::Gl150);
        assert_eq!(ShaderVersion::parse("1.50"), ShaderVersion::Gl150);
        assert_eq!(ShaderVersion::parse("1.40"), ShaderVersion::Gl140);
        assert_eq!(ShaderVersion::parse("1.4"), ShaderVersion::Gl140);
        assert_eq!(ShaderVersion::parse("1.30"), ShaderVersion::Gl120);
        assert_eq!(ShaderVersion::parse("1.20 Mesa"), ShaderVersion::Gl120);
    }

    #[test]
    fn parses_es_versions() {
        assert_eq!(
            ShaderVersion::parse("OpenGL ES GLSL ES 3.00"),
            ShaderVersion::Es300
        );
        assert_eq!(
            ShaderVersion::parse("OpenGL ES GLSL ES 3.20 build 1.9"),
            ShaderVersion::Es300
        );
        assert_eq!(
            ShaderVersion::parse("OpenGL ES GLSL ES 1.0.17"),
            ShaderVersion::Es100
        );
        assert_eq!(
            ShaderVersion::parse("WebGL GLSL ES 1.0 (OpenGL ES GLSL ES 1.0 Chromium)"),
            ShaderVersion::Es100
        );
    }

    #[test]
    fn garbage_falls_back_to_glsl_120() {
        assert_eq!(ShaderVersion::parse(""), ShaderVersion::Gl120);
        assert_eq!(ShaderVersion::parse("unknown driver"), ShaderVersion::Gl120);
    }

    #[test]
    fn detect_queries_the_context() {
        let gl = MockGl::new();
        gl.set_shading_language_version(Some("OpenGL ES GLSL ES 3.00"));
        assert_eq!(ShaderVersion::detect(&gl), ShaderVersion::Es300);

        gl.set_shading_language_version(None);
        assert_eq!(ShaderVersion::detect(&gl), ShaderVersion::Gl120);
    }

    #[test]
    fn new_interface_prefixes_rename_legacy_keywords() {
        let vertex = ShaderVersion::Gl140.apply(
            ShaderStage::Vertex,
            "attribute vec4 position;\n",
        );
        assert!(vertex.starts_with("#version 140\n"));
        assert!(vertex.contains("#define attribute in\n"));
        assert!(vertex.ends_with("attribute vec4 position;\n"));

        let fragment = ShaderVersion::Es300.prefix(ShaderStage::Fragment);
        assert!(fragment.starts_with("#version 300 es\nprecision mediump float;\n"));
        assert!(fragment.contains("#define gl_FragColor fragColor\n"));
    }

    #[test]
    fn raw_leaves_sources_alone() {
        assert_eq!(
            ShaderVersion::Raw.apply(ShaderStage::Vertex, "void main() {}"),
            "void main() {}"
        );
    }

    #[test]
    fn core_profile_contexts_get_glsl_150() {
        let vertex = ShaderVersion::Gl150.prefix(ShaderStage::Vertex);
        assert!(vertex.starts_with("#version 150\n#define attribute in\n"));

        let fragment = ShaderVersion::Gl150.prefix(ShaderStage::Fragment);
        assert!(fragment.starts_with("#version 150\n"));
        assert!(fragment.contains("#define gl_FragColor fragColor\n"));
    }
}
