use std::collections::BTreeMap;
use std::sync::OnceLock;

use thiserror::Error;

pub const DEFAULT_LOCALE: &str = "nl";
const SUPPORTED_LOCALES: &[&str] = &["nl", "en"];

static NL_MESSAGES: OnceLock<BTreeMap<String, String>> = OnceLock::new();
static EN_MESSAGES: OnceLock<BTreeMap<String, String>> = OnceLock::new();

fn nl_messages() -> &'static BTreeMap<String, String> {
    NL_MESSAGES.get_or_init(|| {
        serde_json::from_str(include_str!("../i18n/nl.json"))
            .expect("parse embedded i18n/nl.json catalog")
    })
}

fn en_messages() -> &'static BTreeMap<String, String> {
    EN_MESSAGES.get_or_init(|| {
        serde_json::from_str(include_str!("../i18n/en.json"))
            .expect("parse embedded i18n/en.json catalog")
    })
}

fn embedded(locale: &str) -> &'static BTreeMap<String, String> {
    match locale {
        "en" => en_messages(),
        _ => nl_messages(),
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),
}

/// Reduces `nl_NL.UTF-8`, `en-GB` and similar inputs to a supported base locale.
pub fn normalize_locale(raw: &str) -> Option<&'static str> {
    let mut cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    if let Some((head, _)) = cleaned.split_once('.') {
        cleaned = head;
    }
    if let Some((head, _)) = cleaned.split_once('@') {
        cleaned = head;
    }
    let base = cleaned
        .split(['-', '_'])
        .next()
        .map(str::to_ascii_lowercase)?;
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| *supported == base)
}

/// Resolved message catalog for one locale.
///
/// Lookups fall back to the default locale and finally to the key itself.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: &'static str,
    overrides: BTreeMap<String, String>,
}

impl Catalog {
    pub fn for_locale(raw: &str) -> Self {
        Self {
            locale: normalize_locale(raw).unwrap_or(DEFAULT_LOCALE),
            overrides: BTreeMap::new(),
        }
    }

    /// Layers site-specific message overrides (a flat JSON object) on top of a locale.
    pub fn with_overrides_json(raw_locale: &str, json: &str) -> Result<Self, CatalogError> {
        let locale = normalize_locale(raw_locale)
            .ok_or_else(|| CatalogError::UnsupportedLocale(raw_locale.to_string()))?;
        let overrides: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { locale, overrides })
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    pub fn text(&self, key: &str) -> String {
        self.overrides
            .get(key)
            .or_else(|| embedded(self.locale).get(key))
            .or_else(|| nl_messages().get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.overrides.contains_key(key) || embedded(self.locale).contains_key(key)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::for_locale(DEFAULT_LOCALE)
    }
}
