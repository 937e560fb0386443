mod buffer;
mod program;
mod renderer;
mod texture;

pub(crate) use buffer::*;
pub(crate) use program::*;
pub use renderer::*;
pub(crate) use texture::Texture;
pub use texture::TextureId;

pub(crate) type GL = web_sys::WebGl2RenderingContext;
