use crate::{error::Error, gl::GL};

/// Uploads a float slice to a WebGL buffer.
///
/// # Parameters
/// * `gl` - WebGL context
/// * `target` - Buffer target (e.g., GL::ARRAY_BUFFER)
/// * `data` - Float data to upload
/// * `usage` - Usage hint (e.g., GL::STATIC_DRAW)
///
/// # Safety
/// The `Float32Array` view aliases wasm memory; no allocation may happen
/// between creating the view and handing it to WebGL.
pub(crate) fn buffer_upload_f32(gl: &GL, target: u32, data: &[f32], usage: u32) {
    unsafe {
        let view = js_sys::Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(target, &view, usage);
    }
}

/// Creates an array buffer and wires it to a vertex attribute.
///
/// The buffer is left bound; the attribute reads tightly packed floats
/// (`size` components per vertex, stride 0). Call while the target VAO is
/// bound so the association is recorded.
pub(crate) fn create_vertex_buffer(
    gl: &GL,
    attrib: u32,
    size: i32,
    label: &'static str,
) -> Result<web_sys::WebGlBuffer, Error> {
    let buffer = gl.create_buffer().ok_or(Error::buffer_creation_failed(label))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));

    gl.enable_vertex_attrib_array(attrib);
    gl.vertex_attrib_pointer_with_i32(attrib, size, GL::FLOAT, false, 0, 0);

    Ok(buffer)
}
