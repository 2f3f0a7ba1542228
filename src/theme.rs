//! Light/dark theme flag, its persistence and the colours it implies.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::displacement::PointColor;
use crate::error::{Error, Result};
use crate::scene::BackgroundColor;

pub const THEME_KEY: &str = "theme";

/// String key/value persistence, e.g. `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, used in tests and when browser storage is blocked.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Class set on `<body>` while the theme is active.
    pub fn body_class(self) -> &'static str {
        match self {
            Theme::Light => "is-light",
            Theme::Dark => "is-dark",
        }
    }

    pub fn opposite(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Points are always drawn in the inverse of the background.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: BackgroundColor::WHITE,
                points: PointColor::Black,
            },
            Theme::Dark => Palette {
                background: BackgroundColor::BLACK,
                points: PointColor::White,
            },
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::InvalidArgument(format!("unknown theme {other:?}"))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: BackgroundColor,
    pub points: PointColor,
}

pub struct ThemeController<S: KeyValueStore> {
    store: S,
    current: Theme,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Reads the persisted flag once. Only `"light"` selects the light theme.
    pub fn load(store: S) -> Self {
        let current = match store.get(THEME_KEY).as_deref() {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        };
        log::info!("initial theme: {current}");
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switches theme and persists it. A failed write still switches the
    /// theme for this session.
    pub fn select(&mut self, theme: Theme) -> Palette {
        self.current = theme;
        if let Err(err) = self.store.set(THEME_KEY, theme.as_str()) {
            log::warn!("could not persist theme: {err}");
        }
        log::info!("theme set to {theme}");
        theme.palette()
    }

    pub fn toggle(&mut self) -> Palette {
        self.select(self.current.opposite())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
