use std::{cell::RefCell, f32::consts::FRAC_PI_2, rc::Rc};

use objscene::{
    parse_obj, Camera, Drawable, Error, LightSource, Mat4, Model, Scene, SceneChange,
    SceneRenderer, TextureId, Vec3, Vec4,
};
use wasm_bindgen::{closure::Closure, JsCast};
use web_time::Instant;

const CUBE_OBJ: &str = include_str!("../demos/cube.obj");

fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    run().unwrap()
}

fn run() -> Result<(), Error> {
    let mut renderer = SceneRenderer::create("canvas")?;
    let texture = renderer.create_texture_from_pixels(8, 8, &checkerboard_pixels())?;
    let model = Rc::new(parse_obj(CUBE_OBJ)?);

    let (width, height) = renderer.canvas_size();
    let mut scene = Scene::new(Camera {
        transform: Mat4::identity(),
        projection: Mat4::perspective(FRAC_PI_2, width as f32 / height as f32, 1.0, 100.0),
    });

    scene.apply(SceneChange::LightSources(vec![
        LightSource {
            direction: Vec3::new(-0.5, -0.7, -1.0),
            color: Vec4::new(0.2, 1.0, 0.2, 1.0),
        },
        LightSource {
            direction: Vec3::new(0.8, -0.2, -0.4),
            color: Vec4::new(0.4, 0.4, 0.9, 1.0),
        },
    ]));

    let app = App {
        renderer,
        scene,
        model,
        texture,
        angle: 0.0,
        last_frame: Instant::now(),
    };
    start_loop(Rc::new(RefCell::new(app)));

    Ok(())
}

struct App {
    renderer: SceneRenderer,
    scene: Scene,
    model: Rc<Model>,
    texture: TextureId,
    angle: f32,
    last_frame: Instant,
}

impl App {
    /// One explicit frame step: advance the spin, swap in the new drawable
    /// set, render.
    fn frame(&mut self) -> Result<(), Error> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.angle += dt * 0.8;

        let transform = Mat4::translation(0.0, 0.0, -4.0)
            .multiply(&Mat4::rotation_y(self.angle))
            .multiply(&Mat4::rotation_x(self.angle * 0.4));

        self.scene.apply(SceneChange::Drawables(vec![Drawable {
            model: self.model.clone(),
            texture: self.texture,
            transform,
        }]));

        self.renderer.render(&mut self.scene)
    }
}

/// Drives [`App::frame`] from `requestAnimationFrame`; the closure only
/// schedules, all state lives in the app.
fn start_loop(app: Rc<RefCell<App>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();

    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(error) = app.borrow_mut().frame() {
            // the frame aborted; state stays dirty, so next frame retries
            web_sys::console::error_1(&format!("frame aborted: {error}").into());
        }
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(
                tick_clone.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));

    if let Some(window) = web_sys::window() {
        let _ = window
            .request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn checkerboard_pixels() -> Vec<u8> {
    const SIZE: usize = 8;

    let mut pixels = Vec::with_capacity(SIZE * SIZE * 4);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let tone = if (x + y) % 2 == 0 { 0xe8 } else { 0x55 };
            pixels.extend_from_slice(&[tone, tone, tone, 0xff]);
        }
    }

    pixels
}
