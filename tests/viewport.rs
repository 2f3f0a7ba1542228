use glam::Vec2;
use wavefield_wasm::camera::PerspectiveCamera;
use wavefield_wasm::viewport::{
    effective_pixel_ratio, to_ndc, ViewportController, ViewportState, POINTER_OFFSCREEN,
};
use wavefield_wasm::SceneConfig;

fn approx_eq2(a: Vec2, b: Vec2, eps: f32) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

#[test]
fn pointer_corners_map_to_ndc() {
    let vp = ViewportState::new(1920.0, 1080.0, 1.0);
    assert_eq!(to_ndc(0.0, 0.0, &vp), Some(Vec2::new(-1.0, 1.0)));
    assert_eq!(to_ndc(1920.0, 1080.0, &vp), Some(Vec2::new(1.0, -1.0)));
    assert_eq!(to_ndc(960.0, 540.0, &vp), Some(Vec2::ZERO));
    assert_eq!(to_ndc(10.0, 10.0, &ViewportState::new(0.0, 1080.0, 1.0)), None);
}

#[test]
fn pointer_mapping_ignores_aspect() {
    // the same relative position lands on the same NDC for wide and tall windows
    let wide = ViewportState::new(1920.0, 1080.0, 1.0);
    let tall = ViewportState::new(1080.0, 1920.0, 1.0);
    let samples = [(0.5, 0.5), (0.25, 0.75), (0.8, 0.2)];
    for (u, v) in samples {
        let a = to_ndc(u * wide.width, v * wide.height, &wide).unwrap();
        let b = to_ndc(u * tall.width, v * tall.height, &tall).unwrap();
        assert!(approx_eq2(a, b, 1e-6), "a={a:?} b={b:?}");
    }
}

#[test]
fn pointer_starts_offscreen_and_tracks_moves() {
    let mut ctl = ViewportController::new(800.0, 600.0, 1.0, 2.0);
    assert_eq!(ctl.pointer(), POINTER_OFFSCREEN);

    ctl.on_pointer_move(200.0, 450.0);
    assert!(approx_eq2(ctl.pointer(), Vec2::new(-0.5, -0.5), 1e-6));
}

#[test]
fn resize_updates_camera_and_buffer() {
    let config = SceneConfig::default();
    let mut ctl = ViewportController::new(800.0, 600.0, 1.0, config.max_pixel_ratio);
    let mut camera = PerspectiveCamera::new(&config, ctl.state().aspect());
    let before = camera.projection_matrix();

    let size = ctl.on_resize(&mut camera, 1600.0, 900.0, 2.0);
    assert_eq!(size, (3200, 1800));
    assert_eq!(camera.aspect(), (1600.0f64 / 900.0) as f32);
    assert!(!camera.projection_dirty());
    assert_ne!(camera.projection_matrix(), before);
}

#[test]
fn resize_is_idempotent() {
    let config = SceneConfig::default();
    let mut ctl = ViewportController::new(800.0, 600.0, 1.0, config.max_pixel_ratio);
    let mut camera = PerspectiveCamera::new(&config, ctl.state().aspect());

    let first = ctl.on_resize(&mut camera, 1280.0, 720.0, 1.5);
    let (aspect, projection, state) = (camera.aspect(), camera.projection_matrix(), *ctl.state());
    let second = ctl.on_resize(&mut camera, 1280.0, 720.0, 1.5);

    assert_eq!(first, second);
    assert_eq!(camera.aspect(), aspect);
    assert_eq!(camera.projection_matrix(), projection);
    assert_eq!(*ctl.state(), state);
}

#[test]
fn pixel_ratio_is_capped_above_only() {
    let mut ctl = ViewportController::new(100.0, 100.0, 3.0, 2.0);
    assert_eq!(ctl.state().buffer_size(), (200, 200));

    // zoomed-out pages keep their fractional ratio
    let config = SceneConfig::default();
    let mut camera = PerspectiveCamera::new(&config, 1.0);
    assert_eq!(ctl.on_resize(&mut camera, 100.0, 50.0, 0.5), (50, 25));
    assert_eq!(ctl.on_resize(&mut camera, 100.0, 50.0, 1.5), (150, 75));
}

#[test]
fn unusable_pixel_ratio_falls_back_to_one() {
    assert_eq!(effective_pixel_ratio(0.0, 2.0), 1.0);
    assert_eq!(effective_pixel_ratio(-2.0, 2.0), 1.0);
    assert_eq!(effective_pixel_ratio(f64::NAN, 2.0), 1.0);
    assert_eq!(effective_pixel_ratio(0.75, 2.0), 0.75);
    assert_eq!(effective_pixel_ratio(4.0, 2.0), 2.0);
}

#[test]
fn collapsed_window_keeps_previous_aspect() {
    let config = SceneConfig::default();
    let mut ctl = ViewportController::new(800.0, 400.0, 1.0, 2.0);
    let mut camera = PerspectiveCamera::new(&config, ctl.state().aspect());
    ctl.on_resize(&mut camera, 800.0, 0.0, 1.0);
    assert_eq!(camera.aspect(), 2.0);
}
