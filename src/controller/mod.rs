//! Switcher controller
//!
//! Owns the page, the preference store, the loaded catalog and the
//! current language. Lifecycle: `Uninitialized -> Loading -> Ready`;
//! once ready, language changes only re-apply loaded text.

use crate::applier;
use crate::core::{Config, Error, Language, Result};
use crate::dom::Document;
use crate::i18n::{self, CatalogFetcher, Catalog};
use crate::prefs::PreferenceStore;
use crate::switcher::{self, Switcher};

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
}

/// What a page click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Toggle,
    Row(&'static str),
    Elsewhere,
}

pub struct Controller<D: Document, P: PreferenceStore> {
    config: Config,
    document: D,
    prefs: P,
    languages: &'static [Language],
    catalog: Catalog,
    current: &'static Language,
    phase: Phase,
    switcher: Option<Switcher<D::Element>>,
}

impl<D: Document, P: PreferenceStore> Controller<D, P> {
    /// Create a controller; the starting language comes from the saved
    /// preference, then the configured default.
    pub fn new(config: Config, document: D, prefs: P, languages: &'static [Language]) -> Result<Self> {
        let saved = prefs.get();
        let system = if config.general.language == "auto" {
            i18n::system_language()
        } else {
            None
        };
        let current = i18n::resolve_language(
            languages,
            saved.as_deref(),
            &config.general.language,
            system.as_deref(),
        )
        .ok_or_else(|| Error::Config("Language registry is empty".to_string()))?;

        log::info!("Starting with language {}", current.code);

        Ok(Self {
            config,
            document,
            prefs,
            languages,
            catalog: Catalog::new(),
            current,
            phase: Phase::Uninitialized,
            switcher: None,
        })
    }

    /// Load every catalog, then build the widget and apply the current language
    pub async fn start<F: CatalogFetcher>(&mut self, fetcher: &F) {
        if self.phase != Phase::Uninitialized {
            log::warn!("Language switcher already started");
            return;
        }

        self.phase = Phase::Loading;
        let catalog = i18n::load_all(fetcher, self.languages).await;
        self.finish_loading(catalog);
    }

    fn finish_loading(&mut self, catalog: Catalog) {
        self.catalog = catalog;

        self.switcher = match switcher::build(
            &self.document,
            &self.config.page.nav_selector,
            self.languages,
            self.current,
        ) {
            Ok(switcher) => Some(switcher),
            Err(e) => {
                log::error!("Language switcher not mounted: {}", e);
                None
            }
        };

        applier::apply(&self.document, &self.config.page, &self.catalog, self.current);
        self.phase = Phase::Ready;
        log::info!("Language switcher ready");
    }

    /// Switch to `code`: persist it, re-apply text and refresh the widget
    pub fn change_language(&mut self, code: &str) -> Result<()> {
        let lang = i18n::find(self.languages, code)
            .ok_or_else(|| Error::UnsupportedLanguage(code.to_string()))?;

        self.current = lang;
        self.prefs.set(lang.code);
        applier::apply(&self.document, &self.config.page, &self.catalog, lang);

        if let Some(switcher) = &self.switcher {
            switcher.set_label(&self.document, lang);
            switcher.mark_current(&self.document, lang.code);
        }

        log::info!("Language changed to {}", lang.code);
        Ok(())
    }

    /// Classify a click on `target`; `None` while the widget is unavailable
    pub fn classify(&self, target: &D::Element) -> Option<ClickTarget> {
        if self.phase != Phase::Ready {
            return None;
        }
        let switcher = self.switcher.as_ref()?;

        Some(if switcher.is_toggle(&self.document, target) {
            ClickTarget::Toggle
        } else if let Some(code) = switcher.row_code(&self.document, target) {
            ClickTarget::Row(code)
        } else {
            ClickTarget::Elsewhere
        })
    }

    /// Handle a click anywhere on the page
    pub fn click(&mut self, target: &D::Element) {
        let Some(kind) = self.classify(target) else {
            return;
        };

        match kind {
            ClickTarget::Toggle => {
                if let Some(switcher) = &self.switcher {
                    switcher.toggle(&self.document);
                }
            }
            ClickTarget::Row(code) => {
                if let Err(e) = self.change_language(code) {
                    log::warn!("{}", e);
                }
                self.close_dropdown();
            }
            ClickTarget::Elsewhere => self.close_dropdown(),
        }
    }

    fn close_dropdown(&self) {
        if let Some(switcher) = &self.switcher {
            if switcher.is_open(&self.document) {
                switcher.close(&self.document);
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_language(&self) -> &'static Language {
        self.current
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    pub fn switcher(&self) -> Option<&Switcher<D::Element>> {
        self.switcher.as_ref()
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.switcher
            .as_ref()
            .map(|s| s.is_open(&self.document))
            .unwrap_or(false)
    }
}
