use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, MouseEvent, Window};

use crate::config::{FieldConfig, SceneConfig};
use crate::error::Error;
use crate::intro::{default_intro, Sequence};
use crate::scene::{BackgroundColor, Scene};
use crate::theme::{Theme, ThemeController};

mod events;
mod intro;
mod render;
mod storage;

use events::Listener;
use render::{Renderer, Stage};
use storage::BrowserStore;

/// Application context for the page's lifetime. `stage` is `None` when the
/// particle background could not be built; theme and intro still run.
struct App {
    stage: Option<Rc<RefCell<Stage>>>,
    _theme: Rc<RefCell<ThemeController<BrowserStore>>>,
    _listeners: Vec<Listener>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn window_size(window: &Window) -> (f64, f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h, window.device_pixel_ratio())
}

fn apply_theme(document: &Document, stage: Option<&RefCell<Stage>>, theme: Theme) {
    if let Some(body) = document.body() {
        let classes = body.class_list();
        if let Err(err) = classes.add_1(theme.body_class()) {
            log::debug!("cannot add body class {}: {err:?}", theme.body_class());
        }
        if let Err(err) = classes.remove_1(theme.opposite().body_class()) {
            log::debug!("cannot remove body class {}: {err:?}", theme.opposite().body_class());
        }
    }
    if let Some(stage) = stage {
        let palette = theme.palette();
        let mut stage = stage.borrow_mut();
        stage.scene.set_background(palette.background);
        stage.scene.set_point_color(palette.points);
    }
}

fn theme_button(
    document: &Document,
    id: &str,
    theme: Theme,
    stage: &Option<Rc<RefCell<Stage>>>,
    controller: &Rc<RefCell<ThemeController<BrowserStore>>>,
) -> Result<Option<Listener>, JsValue> {
    let Some(button) = document.get_element_by_id(id) else {
        log::debug!("#{id} not found, theme button disabled");
        return Ok(None);
    };
    let document = document.clone();
    let stage = stage.clone();
    let controller = controller.clone();
    Listener::new(&button, "click", move |_| {
        controller.borrow_mut().select(theme);
        apply_theme(&document, stage.as_deref(), theme);
    })
    .map(Some)
}

/// Builds the scene and renderer on `#c`. `Ok(None)` when the page has no
/// canvas.
fn build_stage(window: &Window, document: &Document) -> crate::Result<Option<Rc<RefCell<Stage>>>> {
    let Some(canvas) = document.get_element_by_id("c") else {
        return Ok(None);
    };
    let canvas = canvas
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| Error::ResourceUnavailable("#c is not a canvas".into()))?;

    let (w, h, dpr) = window_size(window);
    let scene = Scene::new(FieldConfig::default(), SceneConfig::default(), w, h, dpr)?;
    let renderer = Renderer::new(canvas, &scene)?;
    Ok(Some(Rc::new(RefCell::new(Stage { scene, renderer }))))
}

fn background_listeners(window: &Window, stage: &Rc<RefCell<Stage>>) -> Result<Vec<Listener>, JsValue> {
    let resize = {
        let stage = stage.clone();
        let win = window.clone();
        Listener::new(window, "resize", move |_| {
            let (w, h, dpr) = window_size(&win);
            let mut stage = stage.borrow_mut();
            let (bw, bh) = stage.scene.resize(w, h, dpr);
            stage.renderer.resize(bw, bh);
        })?
    };
    let pointer = {
        let stage = stage.clone();
        Listener::new(window, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                stage
                    .borrow_mut()
                    .scene
                    .pointer_moved(event.client_x() as f64, event.client_y() as f64);
            }
        })?
    };
    Ok(vec![resize, pointer])
}

/// Wires theme, intro and particle background into `document`. The theme and
/// the intro do not depend on the background: a missing canvas or an
/// unavailable WebGL2 context only disables the particles.
pub fn mount(window: &Window, document: &Document, intro_sequence: Sequence) -> Result<(), JsValue> {
    let controller = ThemeController::load(BrowserStore::open(window));
    let theme = controller.current();
    apply_theme(document, None, theme);

    if let Err(err) = intro::play(document, intro_sequence) {
        log::error!("intro could not start: {err:?}");
    }

    let stage = match build_stage(window, document) {
        Ok(Some(stage)) => Some(stage),
        Ok(None) => {
            log::warn!("canvas #c not found, particle background disabled");
            None
        }
        Err(err) => {
            log::error!("particle background unavailable: {err}");
            None
        }
    };
    apply_theme(document, stage.as_deref(), theme);

    let controller = Rc::new(RefCell::new(controller));
    let mut listeners = Vec::new();
    if let Some(stage) = &stage {
        listeners.extend(background_listeners(window, stage)?);
        render::start(stage.clone())?;
        log::info!("particle background running");
    }
    listeners.extend(theme_button(document, "lightMode", Theme::Light, &stage, &controller)?);
    listeners.extend(theme_button(document, "darkMode", Theme::Dark, &stage, &controller)?);

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            stage,
            _theme: controller,
            _listeners: listeners,
        })
    });
    Ok(())
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    mount(&window, &document, default_intro())
}

fn with_stage<T>(f: impl FnOnce(&mut Stage) -> crate::Result<T>) -> crate::Result<T> {
    let stage = APP
        .with(|app| app.borrow().as_ref().and_then(|app| app.stage.clone()))
        .ok_or_else(|| Error::ResourceUnavailable("particle background not started".into()))?;
    let mut stage = stage.borrow_mut();
    f(&mut stage)
}

/// Accepts `"white"`, `"black"`, `#rrggbb` or `0xrrggbb`.
#[wasm_bindgen(js_name = setBackgroundColor)]
pub fn set_background_color(color: &str) -> Result<(), JsValue> {
    let color: BackgroundColor = color.parse()?;
    with_stage(|stage| {
        stage.scene.set_background(color);
        Ok(())
    })
    .map_err(Into::into)
}

#[wasm_bindgen(js_name = setPointColor)]
pub fn set_point_color(name: &str) -> Result<(), JsValue> {
    with_stage(|stage| stage.scene.set_point_color_name(name)).map_err(Into::into)
}

/// Last pointer position in normalized device coordinates.
#[wasm_bindgen]
pub fn pointer() -> Result<Vec<f32>, JsValue> {
    with_stage(|stage| Ok(stage.scene.pointer().to_array().to_vec())).map_err(Into::into)
}

#[wasm_bindgen]
pub fn time() -> Result<f32, JsValue> {
    with_stage(|stage| Ok(stage.scene.time())).map_err(Into::into)
}
