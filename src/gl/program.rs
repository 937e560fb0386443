use web_sys::{WebGlProgram, WebGlShader};

use crate::{error::Error, gl::GL};

#[derive(Debug)]
pub(crate) struct ShaderProgram {
    pub(crate) program: WebGlProgram,
}

impl ShaderProgram {
    pub(crate) fn create(
        gl: &GL,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, Error> {
        let program = gl.create_program().ok_or(Error::shader_program_creation_failed())?;

        // compile shaders
        let vertex_shader = compile_shader(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment_shader = compile_shader(gl, ShaderStage::Fragment, fragment_source)?;

        // attach shaders and link program
        gl.attach_shader(&program, &vertex_shader);
        gl.attach_shader(&program, &fragment_shader);
        gl.link_program(&program);
        check_link_status(gl, &program)?;

        // delete shaders (no longer needed after linking)
        gl.delete_shader(Some(&vertex_shader));
        gl.delete_shader(Some(&fragment_shader));

        Ok(ShaderProgram { program })
    }

    /// Use the shader program.
    pub(crate) fn use_program(&self, gl: &GL) {
        gl.use_program(Some(&self.program));
    }
}

fn compile_shader(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader, Error> {
    let shader = gl
        .create_shader(stage.into())
        .ok_or(Error::shader_creation_failed(stage.name()))?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let status = gl.get_shader_parameter(&shader, GL::COMPILE_STATUS);
    if status.as_bool() != Some(true) {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        return Err(Error::compile_failed(stage.name(), log));
    }

    Ok(shader)
}

fn check_link_status(gl: &GL, program: &WebGlProgram) -> Result<(), Error> {
    let status = gl.get_program_parameter(program, GL::LINK_STATUS);
    if status.as_bool() != Some(true) {
        let log = gl.get_program_info_log(program).unwrap_or_default();
        return Err(Error::link_failed(log));
    }

    Ok(())
}

/// Enum representing the type of shader.
#[derive(Debug, Clone, Copy)]
enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl From<ShaderStage> for u32 {
    fn from(stage: ShaderStage) -> u32 {
        match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        }
    }
}
