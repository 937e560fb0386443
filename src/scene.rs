//! CPU-side scene state with explicit change tracking.
//!
//! The scene is pure data plus staleness metadata: it never talks to the
//! GPU. Mutation happens through [`Scene::apply`], which replaces one
//! category wholesale and raises its dirty marker; the render cycle reads
//! the pending [`ChangeSet`] and retires categories one by one as their
//! device-side state is refreshed. The protocol assumes a single writer and
//! a single reader in strict alternation.

use std::rc::Rc;

use crate::{
    gl::TextureId,
    mat4::Mat4,
    obj::Model,
    vec::{Vec3, Vec4},
};

/// Eye pose and projection. The view matrix is always derived as
/// `transform.inverse()`, never stored.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Object-to-world pose of the eye.
    pub transform: Mat4,
    pub projection: Mat4,
}

/// Directional light. The direction need not be normalized; the renderer
/// negates and normalizes it on upload.
#[derive(Debug, Clone, Copy)]
pub struct LightSource {
    pub direction: Vec3,
    /// RGBA, 0..1 or HDR.
    pub color: Vec4,
}

/// One mesh instance with its own world transform and texture.
#[derive(Debug, Clone)]
pub struct Drawable {
    pub model: Rc<Model>,
    pub texture: TextureId,
    /// Object-to-world transform.
    pub transform: Mat4,
}

/// Scene categories tracked independently for GPU-side staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Camera,
    LightSources,
    Drawables,
}

/// Set of categories whose device-side state is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeSet {
    camera: bool,
    light_sources: bool,
    drawables: bool,
}

impl ChangeSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self { camera: true, light_sources: true, drawables: true }
    }

    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::Camera => self.camera,
            Category::LightSources => self.light_sources,
            Category::Drawables => self.drawables,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.camera || self.light_sources || self.drawables)
    }

    fn insert(&mut self, category: Category) {
        match category {
            Category::Camera => self.camera = true,
            Category::LightSources => self.light_sources = true,
            Category::Drawables => self.drawables = true,
        }
    }

    fn remove(&mut self, category: Category) {
        match category {
            Category::Camera => self.camera = false,
            Category::LightSources => self.light_sources = false,
            Category::Drawables => self.drawables = false,
        }
    }
}

/// A wholesale replacement of one scene category.
///
/// Old values are dropped, never mutated in place; sub-structures shared
/// with the caller (models) stay behind `Rc` and are immutable.
#[derive(Debug, Clone)]
pub enum SceneChange {
    Camera(Camera),
    LightSources(Vec<LightSource>),
    Drawables(Vec<Drawable>),
}

/// Current scene snapshot plus the pending change-set.
#[derive(Debug)]
pub struct Scene {
    camera: Camera,
    light_sources: Vec<LightSource>,
    drawables: Vec<Drawable>,
    changes: ChangeSet,
}

impl Scene {
    /// Creates a scene with no lights or drawables. Everything starts
    /// dirty so the first render uploads the full state.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            light_sources: Vec::new(),
            drawables: Vec::new(),
            changes: ChangeSet::all(),
        }
    }

    /// Replaces one category and raises its dirty marker.
    ///
    /// Returns the pending change-set after the replacement, making the
    /// dirty protocol an explicit value rather than a setter side effect.
    pub fn apply(&mut self, change: SceneChange) -> ChangeSet {
        match change {
            SceneChange::Camera(camera) => {
                self.camera = camera;
                self.changes.insert(Category::Camera);
            },
            SceneChange::LightSources(light_sources) => {
                self.light_sources = light_sources;
                self.changes.insert(Category::LightSources);
            },
            SceneChange::Drawables(drawables) => {
                self.drawables = drawables;
                self.changes.insert(Category::Drawables);
            },
        }
        self.changes
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn light_sources(&self) -> &[LightSource] {
        &self.light_sources
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    /// The categories whose device-side state is stale.
    pub fn changes(&self) -> ChangeSet {
        self.changes
    }

    /// Retires one category after its device-side state has been refreshed.
    ///
    /// Called by the render cycle per category as the corresponding GPU work
    /// succeeds; a failed frame leaves the remaining markers raised so the
    /// next cycle retries them.
    pub fn mark_clean(&mut self, category: Category) {
        self.changes.remove(category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera { transform: Mat4::identity(), projection: Mat4::identity() }
    }

    fn test_drawable(transform: Mat4) -> Drawable {
        Drawable { model: Rc::new(Model::default()), texture: TextureId(0), transform }
    }

    #[test]
    fn test_new_scene_is_fully_dirty() {
        let scene = Scene::new(test_camera());

        assert_eq!(scene.changes(), ChangeSet::all());
        assert!(scene.light_sources().is_empty());
        assert!(scene.drawables().is_empty());
    }

    #[test]
    fn test_apply_marks_only_its_category() {
        let mut scene = Scene::new(test_camera());
        scene.mark_clean(Category::Camera);
        scene.mark_clean(Category::LightSources);
        scene.mark_clean(Category::Drawables);

        let changes = scene.apply(SceneChange::Camera(test_camera()));

        assert!(changes.contains(Category::Camera));
        assert!(!changes.contains(Category::LightSources));
        assert!(!changes.contains(Category::Drawables));
    }

    #[test]
    fn test_mark_clean_retires_one_category() {
        let mut scene = Scene::new(test_camera());

        scene.mark_clean(Category::Camera);

        let changes = scene.changes();
        assert!(!changes.contains(Category::Camera));
        assert!(changes.contains(Category::LightSources));
        assert!(changes.contains(Category::Drawables));
    }

    #[test]
    fn test_apply_replaces_wholesale() {
        let mut scene = Scene::new(test_camera());

        scene.apply(SceneChange::Drawables(vec![
            test_drawable(Mat4::identity()),
            test_drawable(Mat4::identity()),
        ]));
        scene.apply(SceneChange::Drawables(vec![test_drawable(Mat4::translation(
            1.0, 0.0, 0.0,
        ))]));

        assert_eq!(scene.drawables().len(), 1);
        assert_eq!(scene.drawables()[0].transform, Mat4::translation(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_apply_lights_raises_flag_after_clean() {
        let mut scene = Scene::new(test_camera());
        scene.mark_clean(Category::LightSources);

        let changes = scene.apply(SceneChange::LightSources(vec![LightSource {
            direction: Vec3::new(0.0, -1.0, 0.0),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }]));

        assert!(changes.contains(Category::LightSources));
        assert_eq!(scene.light_sources().len(), 1);
    }

    #[test]
    fn test_change_set_algebra() {
        assert!(ChangeSet::none().is_empty());
        assert!(!ChangeSet::all().is_empty());

        let mut set = ChangeSet::none();
        set.insert(Category::Drawables);
        assert!(set.contains(Category::Drawables));
        assert!(!set.contains(Category::Camera));

        set.remove(Category::Drawables);
        assert!(set.is_empty());
    }
}
