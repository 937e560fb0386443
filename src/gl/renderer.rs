use web_sys::{HtmlCanvasElement, HtmlImageElement, WebGlBuffer, WebGlUniformLocation, WebGlVertexArrayObject};

use crate::{
    error::Error,
    gl::{buffer_upload_f32, create_vertex_buffer, ShaderProgram, Texture, TextureId, GL},
    js,
    mat4::Mat4,
    scene::{Category, Drawable, LightSource, Scene},
};

/// Maximum number of light sources; must match the fragment shader's
/// uniform array size.
pub const MAX_LIGHT_SOURCES: usize = 4;

// vertex attribute locations fixed in the vertex shader
mod attrib {
    pub const POSITION: u32 = 0;
    pub const NORMAL: u32 = 1;
    pub const TEXCOORD: u32 = 2;
}

/// WebGL2 renderer for dirty-tracked scene state.
///
/// The renderer owns every device-side resource: the shader program, the
/// vertex buffers holding the concatenated drawable geometry, and the
/// textures referenced by [`TextureId`]. Each [`render`](Self::render) call
/// consumes the scene's pending change-set, refreshes only the stale
/// derived state, and then issues one draw call per drawable in insertion
/// order.
#[derive(Debug)]
pub struct SceneRenderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    shader: ShaderProgram,
    buffers: MeshBuffers,
    textures: Vec<Texture>,
    uniforms: Uniforms,
    /// Derived `projection * view`, recomputed when the camera changes.
    view_projection: Mat4,
}

#[derive(Debug)]
struct MeshBuffers {
    vao: WebGlVertexArrayObject,
    positions: WebGlBuffer,
    normals: WebGlBuffer,
    texcoords: WebGlBuffer,
}

#[derive(Debug)]
struct Uniforms {
    world_view_projection: WebGlUniformLocation,
    world_inverse_transpose: WebGlUniformLocation,
    light_count: WebGlUniformLocation,
    sampler: WebGlUniformLocation,
}

impl SceneRenderer {
    const FRAGMENT_GLSL: &'static str = include_str!("../shaders/mesh.frag");
    const VERTEX_GLSL: &'static str = include_str!("../shaders/mesh.vert");

    /// Creates a renderer by querying for a canvas element.
    ///
    /// # Parameters
    /// * `canvas_id` - CSS selector for the canvas element (e.g., "canvas" or "#viewport")
    ///
    /// # Errors
    /// * `Error::Initialization` - canvas not found or WebGL2 unavailable
    /// * `Error::Compile` / `Error::Link` - shader boundary failure; fatal, no partial renderer
    pub fn create(canvas_id: &str) -> Result<Self, Error> {
        let canvas = js::get_canvas_by_id(canvas_id)?;
        Self::create_with_canvas(canvas)
    }

    /// Creates a renderer from an existing HTML canvas element.
    pub fn create_with_canvas(canvas: HtmlCanvasElement) -> Result<Self, Error> {
        let gl = js::get_webgl2_context(&canvas)?;

        gl.viewport(0, 0, canvas.width() as i32, canvas.height() as i32);
        gl.clear_color(0.2, 0.2, 0.2, 1.0);
        gl.enable(GL::DEPTH_TEST);
        gl.enable(GL::CULL_FACE);

        let shader = ShaderProgram::create(&gl, Self::VERTEX_GLSL, Self::FRAGMENT_GLSL)?;
        shader.use_program(&gl);

        let buffers = MeshBuffers::create(&gl)?;
        let uniforms = Uniforms::locate(&gl, &shader)?;

        Ok(Self {
            gl,
            canvas,
            shader,
            buffers,
            textures: Vec::new(),
            uniforms,
            view_projection: Mat4::identity(),
        })
    }

    /// Uploads a decoded image and returns the capability token for it.
    pub fn create_texture(&mut self, image: &HtmlImageElement) -> Result<TextureId, Error> {
        let texture = Texture::from_image(&self.gl, image)?;
        Ok(self.register(texture))
    }

    /// Uploads raw RGBA bytes (`width * height * 4` long) as a texture.
    pub fn create_texture_from_pixels(
        &mut self,
        width: i32,
        height: i32,
        pixels: &[u8],
    ) -> Result<TextureId, Error> {
        let texture = Texture::from_rgba_pixels(&self.gl, width, height, pixels)?;
        Ok(self.register(texture))
    }

    fn register(&mut self, texture: Texture) -> TextureId {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(texture);
        id
    }

    /// Renders one frame.
    ///
    /// Stale derived state is refreshed first, each category's marker
    /// retired as its GPU work succeeds:
    /// * camera - recompute `view_projection = projection * transform.inverse()`
    /// * lights - re-upload count, negated-and-normalized directions, colors
    /// * drawables - concatenate all models and replace the vertex buffers
    ///
    /// Then, unconditionally, one draw call per drawable in insertion order
    /// with its `u_world_view_projection` and `u_world_inverse_transpose`.
    ///
    /// A [`Error::SingularMatrix`] or [`Error::Domain`] aborts this frame
    /// only; markers not yet retired stay raised, so the caller may fix the
    /// scene and retry on the next cycle. Nothing is caught or masked here.
    pub fn render(&mut self, scene: &mut Scene) -> Result<(), Error> {
        let changes = scene.changes();

        if changes.contains(Category::Camera) {
            let camera = scene.camera();
            let view = camera.transform.inverse()?;
            self.view_projection = camera.projection.multiply(&view);
            scene.mark_clean(Category::Camera);
        }

        if changes.contains(Category::LightSources) {
            self.upload_lights(scene.light_sources())?;
            scene.mark_clean(Category::LightSources);
        }

        if changes.contains(Category::Drawables) {
            self.upload_geometry(scene.drawables());
            scene.mark_clean(Category::Drawables);
        }

        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        let mut offset = 0;
        for drawable in scene.drawables() {
            let world_view_projection = self.view_projection.multiply(&drawable.transform);
            // inverse-transpose keeps normals correct under non-uniform scale
            let normal_matrix = drawable.transform.inverse()?.transpose();

            self.gl.uniform_matrix4fv_with_f32_array(
                Some(&self.uniforms.world_view_projection),
                false,
                &world_view_projection.data,
            );
            self.gl.uniform_matrix4fv_with_f32_array(
                Some(&self.uniforms.world_inverse_transpose),
                false,
                &normal_matrix.data,
            );

            self.bind_texture(drawable.texture)?;

            let count = drawable.model.vertex_count() as i32;
            self.gl.draw_arrays(GL::TRIANGLES, offset, count);
            offset += count;
        }

        Ok(())
    }

    /// Resizes the canvas and updates the viewport.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.gl.viewport(0, 0, width, height);
    }

    /// Returns a reference to the HTML canvas element used for rendering.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Returns the current canvas dimensions as a tuple.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.canvas.width() as i32, self.canvas.height() as i32)
    }

    fn upload_lights(&self, light_sources: &[LightSource]) -> Result<(), Error> {
        if light_sources.len() > MAX_LIGHT_SOURCES {
            return Err(Error::too_many_lights(light_sources.len(), MAX_LIGHT_SOURCES));
        }

        self.gl.uniform1i(Some(&self.uniforms.light_count), light_sources.len() as i32);

        for (idx, light) in light_sources.iter().enumerate() {
            // the shader wants the direction towards the light
            let reverse_direction = (-light.direction).normalize()?;

            let direction_loc = self.light_uniform(idx, "reverse_direction")?;
            self.gl
                .uniform3fv_with_f32_array(Some(&direction_loc), &reverse_direction.to_array());

            let color_loc = self.light_uniform(idx, "color")?;
            self.gl.uniform4fv_with_f32_array(Some(&color_loc), &light.color.to_array());
        }

        Ok(())
    }

    fn light_uniform(&self, idx: usize, field: &str) -> Result<WebGlUniformLocation, Error> {
        let name = format!("u_light_sources[{idx}].{field}");
        self.gl
            .get_uniform_location(&self.shader.program, &name)
            .ok_or_else(|| Error::uniform_location_failed(&name))
    }

    /// Replaces the vertex buffer contents with the concatenation of every
    /// drawable's streams, in drawable order.
    fn upload_geometry(&self, drawables: &[Drawable]) {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut texcoords = Vec::new();

        for drawable in drawables {
            positions.extend_from_slice(&drawable.model.positions);
            normals.extend_from_slice(&drawable.model.normals);
            texcoords.extend_from_slice(&drawable.model.texcoords);
        }

        let gl = &self.gl;
        gl.bind_vertex_array(Some(&self.buffers.vao));

        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffers.positions));
        buffer_upload_f32(gl, GL::ARRAY_BUFFER, &positions, GL::STATIC_DRAW);

        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffers.normals));
        buffer_upload_f32(gl, GL::ARRAY_BUFFER, &normals, GL::STATIC_DRAW);

        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffers.texcoords));
        buffer_upload_f32(gl, GL::ARRAY_BUFFER, &texcoords, GL::STATIC_DRAW);
    }

    fn bind_texture(&self, id: TextureId) -> Result<(), Error> {
        let texture = self
            .textures
            .get(id.0 as usize)
            .ok_or(Error::unknown_texture(id.0))?;

        texture.bind(&self.gl, 0);
        self.gl.uniform1i(Some(&self.uniforms.sampler), 0);

        Ok(())
    }
}

impl MeshBuffers {
    fn create(gl: &GL) -> Result<Self, Error> {
        let vao = gl.create_vertex_array().ok_or(Error::vertex_array_creation_failed())?;
        gl.bind_vertex_array(Some(&vao));

        let positions = create_vertex_buffer(gl, attrib::POSITION, 3, "position")?;
        let normals = create_vertex_buffer(gl, attrib::NORMAL, 3, "normal")?;
        let texcoords = create_vertex_buffer(gl, attrib::TEXCOORD, 2, "texcoord")?;

        // unbind VAO to prevent accidental modification
        gl.bind_vertex_array(None);

        Ok(Self { vao, positions, normals, texcoords })
    }
}

impl Uniforms {
    fn locate(gl: &GL, shader: &ShaderProgram) -> Result<Self, Error> {
        let locate = |name: &'static str| {
            gl.get_uniform_location(&shader.program, name)
                .ok_or(Error::uniform_location_failed(name))
        };

        Ok(Self {
            world_view_projection: locate("u_world_view_projection")?,
            world_inverse_transpose: locate("u_world_inverse_transpose")?,
            light_count: locate("u_light_count")?,
            sampler: locate("u_sampler")?,
        })
    }
}
