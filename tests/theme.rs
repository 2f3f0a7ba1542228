use wavefield_wasm::theme::{Palette, THEME_KEY};
use wavefield_wasm::{
    BackgroundColor, Error, KeyValueStore, MemoryStore, PointColor, Theme, ThemeController,
};

fn store_with(value: Option<&str>) -> MemoryStore {
    let mut store = MemoryStore::new();
    if let Some(value) = value {
        store.set(THEME_KEY, value).unwrap();
    }
    store
}

/// Store whose writes always fail.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Option<String> {
        Some("light".into())
    }

    fn set(&mut self, key: &str, _value: &str) -> wavefield_wasm::Result<()> {
        Err(Error::ResourceUnavailable(format!("cannot write {key}")))
    }
}

#[test]
fn only_light_selects_light_theme() {
    assert_eq!(ThemeController::load(store_with(Some("light"))).current(), Theme::Light);
    assert_eq!(ThemeController::load(store_with(Some("dark"))).current(), Theme::Dark);
    assert_eq!(ThemeController::load(store_with(Some("LIGHT"))).current(), Theme::Dark);
    assert_eq!(ThemeController::load(store_with(None)).current(), Theme::Dark);
}

#[test]
fn palettes_invert_points_against_background() {
    assert_eq!(
        Theme::Light.palette(),
        Palette {
            background: BackgroundColor::WHITE,
            points: PointColor::Black,
        }
    );
    assert_eq!(
        Theme::Dark.palette(),
        Palette {
            background: BackgroundColor::BLACK,
            points: PointColor::White,
        }
    );
    assert_eq!(Theme::Light.body_class(), "is-light");
    assert_eq!(Theme::Dark.body_class(), "is-dark");
}

#[test]
fn select_persists_flag() {
    let mut themes = ThemeController::load(MemoryStore::new());
    let palette = themes.select(Theme::Light);

    assert_eq!(palette.points, PointColor::Black);
    assert_eq!(themes.current(), Theme::Light);
    assert_eq!(themes.store().get(THEME_KEY).as_deref(), Some("light"));

    // a fresh controller over the same store picks the flag back up
    let reloaded = ThemeController::load(themes.store().clone());
    assert_eq!(reloaded.current(), Theme::Light);
}

#[test]
fn toggle_flips_and_persists() {
    let mut themes = ThemeController::load(store_with(Some("dark")));
    themes.toggle();
    assert_eq!(themes.current(), Theme::Light);
    themes.toggle();
    assert_eq!(themes.current(), Theme::Dark);
    assert_eq!(themes.store().get(THEME_KEY).as_deref(), Some("dark"));
}

#[test]
fn failed_write_still_switches_theme() {
    let mut themes = ThemeController::load(ReadOnlyStore);
    assert_eq!(themes.current(), Theme::Light);
    let palette = themes.select(Theme::Dark);
    assert_eq!(themes.current(), Theme::Dark);
    assert_eq!(palette.background, BackgroundColor::BLACK);
}

#[test]
fn theme_names_parse() {
    assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
    assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
    assert!(matches!("sepia".parse::<Theme>(), Err(Error::InvalidArgument(_))));
    assert_eq!(Theme::Light.to_string(), "light");
}
