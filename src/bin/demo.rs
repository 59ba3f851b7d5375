//! Site language switcher - Demo CLI
//!
//! Loads the translation catalogs the same way the browser widget does,
//! mounts the switcher into an in-memory landing page, clicks the row of
//! the requested language and prints what the page would show.
//!
//! Usage: `site-lang-switcher-demo [lang]` (default: `ar`)

#[cfg(not(target_arch = "wasm32"))]
use site_lang_switcher::{
    applier::TEXT_BINDINGS,
    core::Config,
    dom::{Document, MemoryDocument},
    i18n::{DirFetcher, HttpFetcher, LANGUAGES},
    prefs::{FilePreferences, PreferenceStore},
    Controller,
};

#[cfg(not(target_arch = "wasm32"))]
fn landing_page() -> MemoryDocument {
    let doc = MemoryDocument::new();
    let nav = doc.append_element(&doc.body(), "nav", &[("class", "navbar")]);
    doc.append_element(&nav, "div", &[("class", "nav-container")]);
    for path in TEXT_BINDINGS {
        doc.append_element(&doc.body(), "span", &[("data-translate", *path)]);
    }
    doc.append_element(&doc.body(), "select", &[("name", "subject")]);
    doc
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let target = std::env::args().nth(1).unwrap_or_else(|| "ar".to_string());

    println!("==============================================");
    println!("   Site Language Switcher - Demo CLI");
    println!("==============================================\n");

    // 1. Configuration
    println!("[1/4] Loading configuration...");
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    println!("      Default language: {}\n", config.general.language);

    // 2. Page and preference store
    println!("[2/4] Building landing page...");
    let prefs = FilePreferences::new()?;
    let mut controller = Controller::new(config.clone(), landing_page(), prefs, LANGUAGES)?;
    println!("      Starting language: {}\n", controller.current_language().code);

    // 3. Catalogs
    println!("[3/4] Loading translation catalogs...");
    match &config.translations.local_dir {
        Some(dir) => {
            println!("      Source: {}", dir.display());
            controller.start(&DirFetcher::new(dir)).await;
        }
        None => {
            if config.translations.base_url.is_empty() {
                anyhow::bail!(
                    "set translations.base_url or translations.local_dir in {}",
                    Config::config_path()?.display()
                );
            }
            println!("      Source: {}", config.translations.url_for("{lang}"));
            controller.start(&HttpFetcher::new(&config.translations)).await;
        }
    }
    let loaded: Vec<_> = LANGUAGES
        .iter()
        .filter(|lang| controller.catalog().contains(lang.code))
        .map(|lang| lang.code)
        .collect();
    println!("      Loaded: {} of {} ({})\n", loaded.len(), LANGUAGES.len(), loaded.join(", "));

    // 4. Switch language through the widget
    println!("[4/4] Switching to {}...\n", target);
    let handles = controller
        .switcher()
        .map(|s| (s.button, s.rows.iter().find(|r| r.code == target).map(|r| r.row)));
    match handles {
        Some((button, Some(row))) => {
            controller.click(&button);
            controller.click(&row);
        }
        _ => controller.change_language(&target)?,
    }

    let doc = controller.document();
    let root = doc.root();
    println!("----------------------------------------------");
    println!("  Language:  {}", controller.current_language().name);
    println!("  dir:       {}", doc.get_attribute(&root, "dir").unwrap_or_default());
    println!("  lang:      {}", doc.get_attribute(&root, "lang").unwrap_or_default());
    println!("  Persisted: {}", controller.preferences().get().unwrap_or_default());
    println!("----------------------------------------------\n");

    for path in TEXT_BINDINGS {
        let text = doc
            .query_selector(&config.page.marker_selector(path))
            .map(|el| doc.text_content(&el))
            .unwrap_or_default();
        println!("  {:<28} {}", path, text);
    }

    println!("\n  Subjects:");
    for option in doc.query_selector_all("select option") {
        println!(
            "    {:<16} {}",
            doc.get_attribute(&option, "value").unwrap_or_default(),
            doc.text_content(&option)
        );
    }
    println!();

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
