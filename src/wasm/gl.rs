//! Shader program, buffer and texture helpers shared by the lessons.

use js_sys::{Float32Array, Uint16Array};
use web_sys::{
    HtmlImageElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlTexture, WebGlUniformLocation,
};

use crate::error::{DemoError, Result};

/// A value uploaded to one uniform slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
    Mat4([f32; 16]),
}

/// Sources and bindings of a program, in the order values will be supplied.
pub struct ProgramDesc<'a> {
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
    /// Attribute name and component count, one per vertex buffer.
    pub attributes: &'a [(&'a str, i32)],
    pub uniforms: &'a [&'a str],
}

struct Attribute {
    location: Option<u32>,
    size: i32,
}

/// A linked program plus the locations of its declared attributes and uniforms.
pub struct ShaderProgram {
    gl: GL,
    program: WebGlProgram,
    attributes: Vec<Attribute>,
    uniforms: Vec<Option<WebGlUniformLocation>>,
}

impl ShaderProgram {
    pub fn new(gl: &GL, desc: ProgramDesc<'_>) -> Result<Self> {
        let vertex = compile_shader(gl, GL::VERTEX_SHADER, desc.vertex_source)?;
        let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, desc.fragment_source)?;
        let program = link_program(gl, &vertex, &fragment)?;

        let attributes = desc
            .attributes
            .iter()
            .map(|&(name, size)| {
                let location = u32::try_from(gl.get_attrib_location(&program, name)).ok();
                if location.is_none() {
                    log::warn!("attribute `{name}` is not active in the program");
                }
                Attribute { location, size }
            })
            .collect();

        let uniforms = desc
            .uniforms
            .iter()
            .map(|&name| {
                let location = gl.get_uniform_location(&program, name);
                if location.is_none() {
                    log::warn!("uniform `{name}` is not active in the program");
                }
                location
            })
            .collect();

        log::debug!(
            "linked program with {} attributes, {} uniforms",
            desc.attributes.len(),
            desc.uniforms.len()
        );
        Ok(Self {
            gl: gl.clone(),
            program,
            attributes,
            uniforms,
        })
    }

    pub fn use_program(&self) {
        self.gl.use_program(Some(&self.program));
    }

    /// Binds one vertex buffer per declared attribute, then the index buffer.
    pub fn set_attributes(&self, vbos: &[WebGlBuffer], ibo: Option<&WebGlBuffer>) {
        let gl = &self.gl;
        for (attribute, vbo) in self.attributes.iter().zip(vbos) {
            let Some(location) = attribute.location else {
                continue;
            };
            gl.bind_buffer(GL::ARRAY_BUFFER, Some(vbo));
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, attribute.size, GL::FLOAT, false, 0, 0);
        }
        if let Some(ibo) = ibo {
            gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(ibo));
        }
    }

    /// Uploads `values` in declaration order.
    pub fn set_uniforms(&self, values: &[Uniform]) -> Result<()> {
        if values.len() != self.uniforms.len() {
            return Err(DemoError::UniformCount {
                expected: self.uniforms.len(),
                got: values.len(),
            });
        }
        let gl = &self.gl;
        for (location, value) in self.uniforms.iter().zip(values) {
            let location = location.as_ref();
            match value {
                Uniform::Float(v) => gl.uniform1f(location, *v),
                Uniform::Int(v) => gl.uniform1i(location, *v),
                Uniform::Vec2(v) => gl.uniform2fv_with_f32_array(location, v),
                Uniform::Vec4(v) => gl.uniform4fv_with_f32_array(location, v),
                Uniform::Mat4(m) => gl.uniform_matrix4fv_with_f32_array(location, false, m),
            }
        }
        Ok(())
    }
}

fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader> {
    let stage = if shader_type == GL::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };
    let shader = gl
        .create_shader(shader_type)
        .ok_or(DemoError::ResourceCreation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error".to_string());
        gl.delete_shader(Some(&shader));
        Err(DemoError::ShaderCompile { stage, log })
    }
}

fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or(DemoError::ResourceCreation("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error".to_string());
        gl.delete_program(Some(&program));
        Err(DemoError::ProgramLink(log))
    }
}

/// Uploads `data` into a new static `ARRAY_BUFFER`.
pub fn create_vbo(gl: &GL, data: &[f32]) -> Result<WebGlBuffer> {
    let vbo = gl
        .create_buffer()
        .ok_or(DemoError::ResourceCreation("vertex buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vbo));
    let view = Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    gl.bind_buffer(GL::ARRAY_BUFFER, None);
    Ok(vbo)
}

/// Uploads `data` into a new static `ELEMENT_ARRAY_BUFFER`.
pub fn create_ibo(gl: &GL, data: &[u16]) -> Result<WebGlBuffer> {
    let ibo = gl
        .create_buffer()
        .ok_or(DemoError::ResourceCreation("index buffer"))?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&ibo));
    let view = Uint16Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, None);
    Ok(ibo)
}

/// Creates a mipmapped, linearly filtered, edge-clamped texture from a
/// decoded image.
pub fn texture_from_image(gl: &GL, image: &HtmlImageElement) -> Result<WebGlTexture> {
    let texture = gl
        .create_texture()
        .ok_or(DemoError::ResourceCreation("texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    )?;
    gl.generate_mipmap(GL::TEXTURE_2D);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    gl.bind_texture(GL::TEXTURE_2D, None);
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlCanvasElement;

    use super::*;
    use crate::wasm::dom;

    wasm_bindgen_test_configure!(run_in_browser);

    const VERTEX: &str = "attribute vec3 position;
uniform float scale;
void main() { gl_Position = vec4(position * scale, 1.0); }";
    const FRAGMENT: &str = "precision mediump float;
uniform vec4 tint;
void main() { gl_FragColor = tint; }";

    /// A WebGL2 context on a detached canvas, or `None` where the test
    /// browser has no GPU backend.
    fn context() -> Option<GL> {
        let canvas = dom::document()
            .ok()?
            .create_element("canvas")
            .ok()?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let gl = dom::webgl_context(&canvas, false);
        if gl.is_err() {
            log::warn!("no webgl2 in this browser, skipping");
        }
        gl.ok()
    }

    fn program(gl: &GL) -> ShaderProgram {
        ShaderProgram::new(
            gl,
            ProgramDesc {
                vertex_source: VERTEX,
                fragment_source: FRAGMENT,
                attributes: &[("position", 3), ("unused", 2)],
                uniforms: &["scale", "tint"],
            },
        )
        .unwrap()
    }

    #[wasm_bindgen_test]
    fn wrong_uniform_count_is_rejected() {
        let Some(gl) = context() else { return };
        let program = program(&gl);
        program.use_program();

        assert_eq!(
            program.set_uniforms(&[]),
            Err(DemoError::UniformCount {
                expected: 2,
                got: 0
            })
        );
        assert_eq!(
            program.set_uniforms(&[Uniform::Float(1.0)]),
            Err(DemoError::UniformCount {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            program.set_uniforms(&[Uniform::Float(2.0), Uniform::Vec4([1.0, 0.0, 0.0, 1.0])]),
            Ok(())
        );
    }

    #[wasm_bindgen_test]
    fn inactive_attributes_have_no_location() {
        let Some(gl) = context() else { return };
        let program = program(&gl);

        assert!(program.attributes[0].location.is_some());
        assert!(program.attributes[1].location.is_none());

        let vbo = create_vbo(&gl, &[0.0; 9]).unwrap();
        let uvs = create_vbo(&gl, &[0.0; 6]).unwrap();
        program.set_attributes(&[vbo, uvs], None);
    }

    #[wasm_bindgen_test]
    fn compile_errors_name_the_stage() {
        let Some(gl) = context() else { return };
        let result = ShaderProgram::new(
            &gl,
            ProgramDesc {
                vertex_source: "void main() { not glsl }",
                fragment_source: FRAGMENT,
                attributes: &[],
                uniforms: &[],
            },
        );
        assert!(matches!(
            result,
            Err(DemoError::ShaderCompile { stage: "vertex", .. })
        ));
    }
}
