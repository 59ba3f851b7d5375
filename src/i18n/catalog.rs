//! Translation bundles and the catalog holding them

use crate::core::{Error, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// Display text of a scalar; numbers and booleans are rendered as written
fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Nested text bundle for one language
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    root: Value,
}

impl Bundle {
    /// Wrap a parsed document; the top level must be a JSON object
    pub fn from_value(lang: &str, root: Value) -> Result<Self> {
        if !root.is_object() {
            return Err(Error::Catalog {
                lang: lang.to_string(),
                reason: "top level is not an object".to_string(),
            });
        }
        Ok(Self { root })
    }

    /// Parse a bundle from JSON text
    pub fn from_json(lang: &str, text: &str) -> Result<Self> {
        let root = serde_json::from_str(text).map_err(|e| Error::Catalog {
            lang: lang.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_value(lang, root)
    }

    /// Value at a dotted key path such as "about.stats.apps"
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.root, |node, key| node.get(key))
    }

    /// Text at a dotted key path. Objects, arrays and null have none.
    pub fn text(&self, path: &str) -> Option<Cow<'_, str>> {
        self.get(path).and_then(scalar_text)
    }

    /// Flat (value, label) pairs of a mapping, in document order.
    /// Entries whose label is not a scalar are skipped; `None` when the
    /// path does not hold a mapping.
    pub fn pairs(&self, path: &str) -> Option<Vec<(&str, Cow<'_, str>)>> {
        let map = self.get(path)?.as_object()?;
        Some(
            map.iter()
                .filter_map(|(value, label)| scalar_text(label).map(|label| (value.as_str(), label)))
                .collect(),
        )
    }
}

/// Loaded bundles keyed by language code
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bundles: HashMap<String, Bundle>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: &str, bundle: Bundle) {
        self.bundles.insert(code.to_string(), bundle);
    }

    pub fn get(&self, code: &str) -> Option<&Bundle> {
        self.bundles.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.bundles.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "nav": { "apps": "Apps" },
        "about": { "stats": { "apps": "Apps published", "rating": 4.8 } },
        "contact": { "form": { "subjects": {
            "support": "Support",
            "general": "General",
            "bug": "Bug report",
            "year": 2024,
            "broken": ["x"]
        } } },
        "flags": { "beta": true, "none": null }
    }"#;

    #[test]
    fn test_nested_lookup() {
        let bundle = Bundle::from_json("en", SAMPLE).unwrap();
        assert_eq!(bundle.text("nav.apps").as_deref(), Some("Apps"));
        assert_eq!(bundle.text("about.stats.apps").as_deref(), Some("Apps published"));
        assert_eq!(bundle.text("about.stats.missing"), None);
        assert_eq!(bundle.text("nav"), None);
    }

    #[test]
    fn test_scalars_render_as_text() {
        let bundle = Bundle::from_json("en", SAMPLE).unwrap();
        assert_eq!(bundle.text("about.stats.rating").as_deref(), Some("4.8"));
        assert_eq!(bundle.text("flags.beta").as_deref(), Some("true"));
        assert_eq!(bundle.text("flags.none"), None);
    }

    #[test]
    fn test_pairs_keep_document_order() {
        let bundle = Bundle::from_json("en", SAMPLE).unwrap();
        let pairs: Vec<(&str, String)> = bundle
            .pairs("contact.form.subjects")
            .unwrap()
            .into_iter()
            .map(|(value, label)| (value, label.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("support", "Support".to_string()),
                ("general", "General".to_string()),
                ("bug", "Bug report".to_string()),
                ("year", "2024".to_string()),
            ]
        );
        assert_eq!(bundle.pairs("contact.form.nothing"), None);
        assert_eq!(bundle.pairs("nav.apps"), None);
    }

    #[test]
    fn test_malformed_payloads_are_rejected() {
        assert!(matches!(Bundle::from_json("fr", "{ not json"), Err(Error::Catalog { .. })));
        assert!(matches!(Bundle::from_json("fr", "[1, 2]"), Err(Error::Catalog { .. })));
    }

    #[test]
    fn test_catalog_membership() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        catalog.insert("en", Bundle::from_json("en", SAMPLE).unwrap());
        assert!(catalog.contains("en"));
        assert!(!catalog.contains("fr"));
        assert_eq!(catalog.len(), 1);
    }
}
