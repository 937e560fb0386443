mod error;
mod gl;
mod mat4;
mod obj;
mod scene;
mod vec;

pub(crate) mod js;

pub use crate::{
    error::Error,
    gl::{SceneRenderer, TextureId, MAX_LIGHT_SOURCES},
    mat4::Mat4,
    obj::{flat_normals, parse_obj, Model},
    scene::{Camera, Category, ChangeSet, Drawable, LightSource, Scene, SceneChange},
    vec::{Vec2, Vec3, Vec4},
};

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    // load-to-render plumbing without a GPU: parse, stage, dirty-track
    #[test]
    fn test_parsed_model_feeds_scene_state() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";
        let model = Rc::new(parse_obj(source).unwrap());

        let camera = Camera {
            transform: Mat4::identity(),
            projection: Mat4::perspective(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 100.0),
        };
        let mut scene = Scene::new(camera);
        scene.mark_clean(Category::Camera);
        scene.mark_clean(Category::LightSources);
        scene.mark_clean(Category::Drawables);

        let changes = scene.apply(SceneChange::Drawables(vec![Drawable {
            model: model.clone(),
            texture: TextureId(0),
            transform: Mat4::translation(0.0, 0.0, -5.0),
        }]));

        // only the drawables category needs a re-upload
        assert!(changes.contains(Category::Drawables));
        assert!(!changes.contains(Category::Camera));
        assert!(!changes.contains(Category::LightSources));

        assert_eq!(scene.drawables()[0].model.vertex_count(), 3);
    }
}
