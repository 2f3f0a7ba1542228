#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use wavefield_wasm::intro::{Ease, Sequence, Tween};
use wavefield_wasm::{FieldConfig, ParticleField, Scene, SceneConfig};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn webgl2_context_available() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();

    let ctx = canvas.get_context("webgl2").unwrap();
    assert!(ctx.is_some(), "WebGL2 not available in test browser");
}

#[wasm_bindgen_test]
fn api_rejects_calls_before_start() {
    // The test page has no #c canvas, so start-up leaves the background disabled.
    assert!(wavefield_wasm::set_point_color("white").is_err());
    assert!(wavefield_wasm::set_background_color("#000000").is_err());
    assert!(wavefield_wasm::time().is_err());
}

#[wasm_bindgen_test]
fn default_field_fits_one_buffer_upload() {
    let field = ParticleField::generate(FieldConfig::default()).unwrap();
    assert_eq!(field.as_bytes().len(), 200 * 200 * 16);
}

#[wasm_bindgen_test]
fn scene_uses_browser_window_size() {
    let window = web_sys::window().unwrap();
    let w = window.inner_width().unwrap().as_f64().unwrap();
    let h = window.inner_height().unwrap().as_f64().unwrap();

    let mut scene = Scene::new(
        FieldConfig::new(4, 4, 1.0).unwrap(),
        SceneConfig::default(),
        w,
        h,
        window.device_pixel_ratio(),
    )
    .unwrap();
    let frame = scene.advance();
    assert_eq!(frame.time, 0.05);
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
async fn intro_and_theme_run_without_canvas() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    assert!(document.get_element_by_id("c").is_none());

    let body = document.body().unwrap();
    body.insert_adjacent_html("beforeend", r#"<div id="fade-target" style="opacity: 0"></div>"#)
        .unwrap();
    let target = document
        .get_element_by_id("fade-target")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();

    let sequence = Sequence::new().then(Tween::fade_in("#fade-target", 0.0, 0.2, Ease::Power2Out));
    wavefield_wasm::mount(&window, &document, sequence).unwrap();

    sleep(600).await;
    let opacity: f64 = target
        .style()
        .get_property_value("opacity")
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(opacity, 1.0);

    let classes = body.class_list();
    assert!(classes.contains("is-dark") || classes.contains("is-light"));
    // no canvas, so the particle API stays unavailable
    assert!(wavefield_wasm::time().is_err());
}
