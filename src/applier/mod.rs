//! Text applier
//!
//! Rewrites the marked page elements from a loaded bundle. The set of
//! locations is data: each entry of [`TEXT_BINDINGS`] is a bundle key path
//! and is addressed in the page by the translate marker attribute.

use crate::core::{Language, PageConfig};
use crate::dom::Document;
use crate::i18n::{Bundle, Catalog};

/// Bundle key paths rewritten on every language change
pub static TEXT_BINDINGS: &[&str] = &[
    // Navigation
    "nav.apps",
    "nav.contact",
    "nav.privacy",
    "nav.terms",
    // Hero
    "hero.title",
    "hero.subtitle",
    "hero.viewApps",
    "hero.appStore",
    // Apps
    "apps.title",
    "apps.subtitle",
    // About
    "about.title",
    "about.description",
    "about.features.innovation",
    "about.features.quality",
    "about.features.support",
    "about.stats.apps",
    "about.stats.downloads",
    "about.stats.rating",
    // Contact
    "contact.title",
    "contact.form.name",
    "contact.form.email",
    "contact.form.subject",
    "contact.form.message",
    "contact.form.send",
    // Footer
    "footer.description",
    "footer.quickLinks",
    "footer.legal",
    "footer.support",
    "footer.copyright",
];

/// Mapping of subject value to label for the contact form `<select>`
pub const SUBJECTS_PATH: &str = "contact.form.subjects";

/// Apply `lang` to the page.
///
/// Returns `false` without touching the page when no bundle is loaded
/// for `lang`.
pub fn apply<D: Document>(doc: &D, page: &PageConfig, catalog: &Catalog, lang: &Language) -> bool {
    let Some(bundle) = catalog.get(lang.code) else {
        log::debug!("No translations loaded for {}, leaving page as is", lang.code);
        return false;
    };

    for path in TEXT_BINDINGS {
        let Some(text) = bundle.text(path) else {
            log::debug!("{} has no text for {}", lang.code, path);
            continue;
        };
        for element in doc.query_selector_all(&page.marker_selector(path)) {
            doc.set_text(&element, &text);
        }
    }

    replace_subjects(doc, page, bundle);

    let root = doc.root();
    for (name, value) in [("dir", lang.direction.as_attr()), ("lang", lang.code)] {
        if let Err(e) = doc.set_attribute(&root, name, value) {
            log::warn!("Failed to set document {}: {}", name, e);
        }
    }

    true
}

/// Replace every choice of the subject `<select>` with the bundle's pairs
fn replace_subjects<D: Document>(doc: &D, page: &PageConfig, bundle: &Bundle) {
    let Some(select) = doc.query_selector(&page.subject_selector()) else {
        return;
    };
    let Some(subjects) = bundle.pairs(SUBJECTS_PATH) else {
        log::debug!("Bundle has no {} mapping", SUBJECTS_PATH);
        return;
    };

    doc.remove_children(&select);
    for (value, label) in subjects {
        let added = doc.create_element("option").and_then(|option| {
            doc.set_attribute(&option, "value", value)?;
            doc.set_text(&option, &label);
            doc.append_child(&select, &option)
        });
        if let Err(e) = added {
            log::warn!("Failed to add subject option {}: {}", value, e);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{bundle, expected, landing_page, marked};
    use super::*;
    use crate::dom::MemoryDocument;

    static PAIR: &[Language] = &[Language::ltr("en", "English"), Language::rtl("ar", "Arabic")];

    fn catalog(codes: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        for code in codes {
            catalog.insert(code, bundle(code));
        }
        catalog
    }

    fn subject_options(doc: &MemoryDocument) -> Vec<(String, String)> {
        doc.query_selector_all("select option")
            .iter()
            .map(|o| (doc.get_attribute(o, "value").unwrap_or_default(), doc.text_content(o)))
            .collect()
    }

    #[test]
    fn test_every_location_gets_bundle_text() {
        let doc = landing_page();
        assert!(apply(&doc, &PageConfig::default(), &catalog(&["en", "ar"]), &PAIR[1]));

        for path in TEXT_BINDINGS {
            assert_eq!(doc.text_content(&marked(&doc, path)), expected("ar", path), "{}", path);
        }
    }

    #[test]
    fn test_subjects_are_replaced_in_bundle_order() {
        let doc = landing_page();
        apply(&doc, &PageConfig::default(), &catalog(&["en"]), &PAIR[0]);

        assert_eq!(
            subject_options(&doc),
            vec![
                ("general".to_string(), "en general".to_string()),
                ("support".to_string(), "en support".to_string()),
                ("partnership".to_string(), "en partnership".to_string()),
            ]
        );
    }

    #[test]
    fn test_direction_follows_language() {
        let doc = landing_page();
        let page = PageConfig::default();
        let catalog = catalog(&["en", "ar"]);
        let root = doc.root();

        apply(&doc, &page, &catalog, &PAIR[1]);
        assert_eq!(doc.get_attribute(&root, "dir").as_deref(), Some("rtl"));
        assert_eq!(doc.get_attribute(&root, "lang").as_deref(), Some("ar"));

        apply(&doc, &page, &catalog, &PAIR[0]);
        assert_eq!(doc.get_attribute(&root, "dir").as_deref(), Some("ltr"));
        assert_eq!(doc.get_attribute(&root, "lang").as_deref(), Some("en"));
    }

    #[test]
    fn test_missing_catalog_is_a_no_op() {
        let doc = landing_page();
        assert!(!apply(&doc, &PageConfig::default(), &catalog(&["en"]), &PAIR[1]));

        for path in TEXT_BINDINGS {
            assert_eq!(doc.text_content(&marked(&doc, path)), "original");
        }
        assert_eq!(subject_options(&doc), vec![("placeholder".to_string(), String::new())]);
        assert_eq!(doc.get_attribute(&doc.root(), "dir"), None);
    }

    #[test]
    fn test_sparse_page_and_bundle() {
        let doc = MemoryDocument::new();
        let title = doc.append_element(&doc.body(), "h1", &[("data-translate", "hero.title")]);
        let twin = doc.append_element(&doc.body(), "h2", &[("data-translate", "hero.title")]);
        let terms = doc.append_element(&doc.body(), "a", &[("data-translate", "nav.terms")]);
        doc.set_text(&terms, "Terms");

        let mut catalog = Catalog::new();
        catalog.insert("en", Bundle::from_json("en", r#"{"hero": {"title": "Hello"}}"#).unwrap());

        assert!(apply(&doc, &PageConfig::default(), &catalog, &PAIR[0]));
        assert_eq!(doc.text_content(&title), "Hello");
        assert_eq!(doc.text_content(&twin), "Hello");
        assert_eq!(doc.text_content(&terms), "Terms");
    }

    #[test]
    fn test_numeric_values_are_shown_as_text() {
        let doc = MemoryDocument::new();
        let stat = doc.append_element(&doc.body(), "span", &[("data-translate", "about.stats.apps")]);
        let select = doc.append_element(&doc.body(), "select", &[("name", "subject")]);

        let mut catalog = Catalog::new();
        let bundle = r#"{
            "about": {"stats": {"apps": 12}},
            "contact": {"form": {"subjects": {"year": 2024, "other": "Other"}}}
        }"#;
        catalog.insert("en", Bundle::from_json("en", bundle).unwrap());

        assert!(apply(&doc, &PageConfig::default(), &catalog, &PAIR[0]));
        assert_eq!(doc.text_content(&stat), "12");
        assert_eq!(doc.children(&select).len(), 2);
        assert_eq!(
            subject_options(&doc),
            vec![
                ("year".to_string(), "2024".to_string()),
                ("other".to_string(), "Other".to_string()),
            ]
        );
    }
}
