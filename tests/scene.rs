use glam::{Vec3, Vec4Swizzles};
use wavefield_wasm::{BackgroundColor, Error, FieldConfig, PointColor, Scene, SceneConfig};

fn small_scene() -> Scene {
    Scene::new(
        FieldConfig::new(8, 8, 0.3).unwrap(),
        SceneConfig::default(),
        1280.0,
        720.0,
        1.0,
    )
    .unwrap()
}

#[test]
fn time_advances_in_fixed_steps() {
    let mut scene = small_scene();
    assert_eq!(scene.time(), 0.0);
    for k in 1..=10_000u64 {
        let frame = scene.advance();
        assert_eq!(frame.time, 0.0 + 0.05 * k as f32);
    }
    assert_eq!(scene.time(), 0.05 * 10_000.0);
}

#[test]
fn clock_starting_offset_is_exact() {
    use wavefield_wasm::clock::FrameClock;

    let mut clock = FrameClock::starting_at(3.0, 0.05);
    for _ in 0..777 {
        clock.tick();
    }
    assert_eq!(clock.ticks(), 777);
    assert_eq!(clock.time(), 3.0 + 0.05 * 777.0);
}

#[test]
fn camera_looks_at_origin_from_configured_position() {
    let mut scene = small_scene();
    let frame = scene.advance();

    assert_eq!(scene.camera().position, Vec3::new(0.0, 6.0, 5.0));
    assert_eq!(scene.camera().target(), Vec3::ZERO);

    // the origin lands on the centre of the screen, in front of the camera
    let eye = frame.model_view * Vec3::ZERO.extend(1.0);
    assert!(eye.z < 0.0);
    let clip = frame.projection * eye;
    let ndc = clip.xy() / clip.w;
    assert!(ndc.length() < 1e-5, "origin projected to {ndc:?}");
}

#[test]
fn frame_carries_colours_and_point_size() {
    let mut scene = small_scene();
    scene.set_background(BackgroundColor::WHITE);
    scene.set_point_color(PointColor::Black);

    let frame = scene.advance();
    assert_eq!(frame.background, [1.0, 1.0, 1.0]);
    assert_eq!(frame.color, [0.0, 0.0, 0.0, 0.5]);
    assert_eq!(frame.point_size, 15.0);
}

#[test]
fn unknown_point_colour_leaves_state_unchanged() {
    let mut scene = small_scene();
    scene.set_point_color_name("black").unwrap();

    let err = scene.set_point_color_name("magenta").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(scene.program().point_color(), PointColor::Black);
}

#[test]
fn point_colour_round_trip() {
    let mut scene = small_scene();
    let original = scene.advance().color;

    scene.set_point_color_name("black").unwrap();
    scene.set_point_color_name("white").unwrap();
    assert_eq!(scene.advance().color, original);
}

#[test]
fn background_colour_parsing() {
    assert_eq!("white".parse::<BackgroundColor>().unwrap(), BackgroundColor::WHITE);
    assert_eq!("#000000".parse::<BackgroundColor>().unwrap(), BackgroundColor::BLACK);
    assert_eq!("0x336699".parse::<BackgroundColor>().unwrap(), BackgroundColor(0x336699));
    assert_eq!(BackgroundColor(0x336699).to_string(), "#336699");
    for bad in ["", "#fff", "grey", "#gg0000", "#1234567", "#+fffff", "0x+12345", "#-00000"] {
        assert!(bad.parse::<BackgroundColor>().is_err(), "{bad}");
    }
    assert!(BackgroundColor::from_hex(0x1000000).is_err());
    assert_eq!(BackgroundColor(0xff0080).rgb(), [1.0, 0.0, 128.0 / 255.0]);
}

#[test]
fn pointer_is_stored_but_not_used_by_frame() {
    let mut a = small_scene();
    let mut b = small_scene();
    b.pointer_moved(100.0, 100.0);

    assert_ne!(a.pointer(), b.pointer());
    assert_eq!(a.advance(), b.advance());
}

#[test]
fn invalid_scene_config_is_rejected() {
    let config = SceneConfig {
        near: 10.0,
        far: 1.0,
        ..SceneConfig::default()
    };
    let err = Scene::new(FieldConfig::default(), config, 800.0, 600.0, 1.0).err();
    assert!(matches!(err, Some(Error::InvalidParameter { .. })));
}
