use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use vitrine_types::ui::{GLYPH_STEP, UiOptions};
use vitrine_types::{Money, NonEmptyString};

use crate::navigation::NavigationSettings;
use crate::reveal::{DEFAULT_REVEAL_DELAY, DEFAULT_REVEAL_THRESHOLD, RevealSettings};

const REDUCED_MOTION_ENV: &str = "VITRINE_REDUCED_MOTION";

#[derive(Debug, Default, Deserialize)]
pub struct VitrineConfig {
    pub ui: Option<UiConfig>,
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for ui.{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// ```toml
/// [ui]
/// reduced_motion = false
/// ascii_only = false
/// reveal_delay_ms = 2500
/// reveal_threshold = 0.1
/// glyph_step_ms = 50
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct UiConfig {
    /// Disable glyph rises and marquee motion.
    #[serde(default)]
    pub reduced_motion: bool,
    /// Use ASCII-only glyphs for icons.
    #[serde(default)]
    pub ascii_only: bool,
    pub reveal_delay_ms: Option<u64>,
    pub reveal_threshold: Option<f32>,
    pub glyph_step_ms: Option<u64>,
}

/// ```toml
/// [[catalog.products]]
/// name = "Shirt"
/// price = "10.00"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub price: String,
}

/// A product the catalog can put in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    pub name: NonEmptyString,
    pub price: Money,
}

fn default_catalog() -> Vec<CatalogProduct> {
    [
        ("Camiseta Oversized", 8990),
        ("Boné Dad Hat", 5990),
        ("Moletom Canguru", 19990),
        ("Ecobag", 3490),
    ]
    .into_iter()
    .filter_map(|(name, cents)| {
        NonEmptyString::new(name).ok().map(|name| CatalogProduct {
            name,
            price: Money::from_cents(cents),
        })
    })
    .collect()
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

impl VitrineConfig {
    /// Load `~/.vitrine/config.toml`. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve navigation tunables from `config` and the environment.
    pub fn navigation_settings(config: Option<&Self>) -> Result<NavigationSettings, ConfigError> {
        let ui = config.and_then(|cfg| cfg.ui.as_ref());

        let threshold = ui
            .and_then(|ui| ui.reveal_threshold)
            .unwrap_or(DEFAULT_REVEAL_THRESHOLD);
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid {
                field: "reveal_threshold",
                reason: format!("{threshold} is outside 0.0..=1.0"),
            });
        }

        let glyph_step = ui
            .and_then(|ui| ui.glyph_step_ms)
            .map_or(GLYPH_STEP, Duration::from_millis);
        if glyph_step.is_zero() {
            return Err(ConfigError::Invalid {
                field: "glyph_step_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        let delay = ui
            .and_then(|ui| ui.reveal_delay_ms)
            .map_or(DEFAULT_REVEAL_DELAY, Duration::from_millis);

        let reduced_motion = ui.is_some_and(|ui| ui.reduced_motion)
            || env::var(REDUCED_MOTION_ENV).is_ok_and(|raw| is_truthy(&raw));

        Ok(NavigationSettings {
            reveal: RevealSettings { threshold, delay },
            glyph_step,
            options: UiOptions {
                reduced_motion,
                ascii_only: ui.is_some_and(|ui| ui.ascii_only),
            },
        })
    }

    /// Products offered by the catalog. Entries with an empty name or a bad
    /// price are skipped with a warning; no products configured means the
    /// built-in list.
    #[must_use]
    pub fn catalog_products(config: Option<&Self>) -> Vec<CatalogProduct> {
        let Some(configured) = config
            .and_then(|cfg| cfg.catalog.as_ref())
            .map(|catalog| catalog.products.as_slice())
            .filter(|products| !products.is_empty())
        else {
            return default_catalog();
        };

        configured
            .iter()
            .filter_map(|product| {
                let Ok(name) = NonEmptyString::new(product.name.trim()) else {
                    tracing::warn!("Skipping catalog product with empty name");
                    return None;
                };
                match Money::parse(&product.price) {
                    Ok(price) if !price.is_zero() => Some(CatalogProduct { name, price }),
                    Ok(_) => {
                        tracing::warn!(product = %name, "Skipping catalog product priced at zero");
                        None
                    }
                    Err(err) => {
                        tracing::warn!(product = %name, "Skipping catalog product: {err}");
                        None
                    }
                }
            })
            .collect()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vitrine").join("config.toml"))
}
