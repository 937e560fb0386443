use web_sys::{HtmlImageElement, WebGlTexture};

use crate::{error::Error, gl::GL};

/// Opaque capability token for a renderer-owned texture.
///
/// Handed out by [`crate::SceneRenderer`] when a texture is created; the
/// device-side `WebGlTexture` itself never leaves the renderer. Scene data
/// carries only these copyable tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub(crate) u32);

#[derive(Debug)]
pub(crate) struct Texture {
    gl_texture: WebGlTexture,
}

impl Texture {
    /// Creates a texture from a decoded image element.
    ///
    /// Image decoding is the host's concern; the element must have finished
    /// loading before this is called.
    pub(crate) fn from_image(gl: &GL, image: &HtmlImageElement) -> Result<Self, Error> {
        let gl_texture = gl.create_texture().ok_or(Error::texture_creation_failed())?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&gl_texture));

        gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
            GL::TEXTURE_2D,
            0, // level
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            image,
        )
        .map_err(|_| Error::texture_creation_failed())?;
        gl.generate_mipmap(GL::TEXTURE_2D);

        Ok(Self { gl_texture })
    }

    /// Creates a texture from raw RGBA bytes, `width * height * 4` long.
    pub(crate) fn from_rgba_pixels(
        gl: &GL,
        width: i32,
        height: i32,
        pixels: &[u8],
    ) -> Result<Self, Error> {
        let gl_texture = gl.create_texture().ok_or(Error::texture_creation_failed())?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&gl_texture));

        #[rustfmt::skip]
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0, // level
            GL::RGBA as i32,
            width, height,
            0, // border
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            Some(pixels),
        )
        .map_err(|_| Error::texture_creation_failed())?;
        gl.generate_mipmap(GL::TEXTURE_2D);

        Ok(Self { gl_texture })
    }

    pub(crate) fn bind(&self, gl: &GL, texture_unit: u32) {
        gl.active_texture(GL::TEXTURE0 + texture_unit);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.gl_texture));
    }

    pub(crate) fn delete(&self, gl: &GL) {
        gl.delete_texture(Some(&self.gl_texture));
    }
}
