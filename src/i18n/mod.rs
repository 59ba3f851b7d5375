//! Internationalization module
//!
//! Holds the language registry, the in-memory translation catalog and the
//! loader that fills it. Supports automatic language detection based on
//! the system (or browser) locale.

mod catalog;
mod loader;

pub use catalog::{Bundle, Catalog};
#[cfg(not(target_arch = "wasm32"))]
pub use loader::DirFetcher;
pub use loader::{load_all, CatalogFetcher, HttpFetcher};

use crate::core::Language;

/// Language used when nothing else applies
pub const DEFAULT_LANGUAGE: &str = "en";

/// Selectable languages, in dropdown order
pub static LANGUAGES: &[Language] = &[
    Language::rtl("ar", "\u{0627}\u{0644}\u{0639}\u{0631}\u{0628}\u{064A}\u{0629}"),
    Language::ltr("zh", "\u{4E2D}\u{6587}"),
    Language::ltr("en", "English"),
    Language::ltr("fr", "Fran\u{00E7}ais"),
    Language::ltr("de", "Deutsch"),
    Language::ltr("hu", "Magyar"),
    Language::ltr("ig", "Igbo"),
    Language::ltr("ja", "\u{65E5}\u{672C}\u{8A9E}"),
    Language::ltr("ko", "\u{D55C}\u{AD6D}\u{C5B4}"),
    Language::ltr("lv", "Latvie\u{0161}u"),
    Language::ltr("pl", "Polski"),
    Language::ltr("pt", "Portugu\u{00EA}s"),
    Language::ltr("ru", "\u{0420}\u{0443}\u{0441}\u{0441}\u{043A}\u{0438}\u{0439}"),
    Language::ltr("es", "Espa\u{00F1}ol"),
];

/// Look up a registry entry by code
pub fn find(languages: &'static [Language], code: &str) -> Option<&'static Language> {
    languages.iter().find(|lang| lang.code == code)
}

/// Pick the starting language.
///
/// A saved preference wins when it names a registry entry. Otherwise the
/// configured default is used, where "auto" means the system locale.
/// Anything unknown falls back to [`DEFAULT_LANGUAGE`], then to the first
/// registry entry. Returns `None` only for an empty registry.
pub fn resolve_language(
    languages: &'static [Language],
    saved: Option<&str>,
    configured: &str,
    system: Option<&str>,
) -> Option<&'static Language> {
    if let Some(lang) = saved.and_then(|code| find(languages, code)) {
        return Some(lang);
    }

    let code = if configured == "auto" {
        system.map(language_code).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    } else {
        configured.to_ascii_lowercase()
    };

    find(languages, &code)
        .or_else(|| find(languages, DEFAULT_LANGUAGE))
        .or_else(|| languages.first())
}

/// Extract the language code from a locale, e.g. "fr_FR.UTF-8" -> "fr"
fn language_code(locale: &str) -> String {
    locale
        .split(|c: char| c == '_' || c == '-' || c == '.')
        .next()
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_ascii_lowercase()
}

/// Locale variables in POSIX precedence order
#[cfg(not(target_arch = "wasm32"))]
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// First non-empty locale among `lookup(var)` for [`LOCALE_VARS`]
#[cfg(not(target_arch = "wasm32"))]
fn first_locale(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    LOCALE_VARS
        .iter()
        .copied()
        .filter_map(|var| lookup(var))
        .find(|value| !value.is_empty())
}

/// Detect the system language from environment variables
#[cfg(not(target_arch = "wasm32"))]
pub fn system_language() -> Option<String> {
    first_locale(|var| std::env::var(var).ok())
}

/// Detect the browser language from `navigator.language`
#[cfg(target_arch = "wasm32")]
pub fn system_language() -> Option<String> {
    web_sys::window().and_then(|win| win.navigator().language())
}
