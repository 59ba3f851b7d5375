//! Language switcher widget
//!
//! Builds the toggle button and dropdown once, mounts them into the
//! navigation container, and keeps handles for in-place updates.

use crate::core::{Error, Language, Result};
use crate::dom::Document;

const CONTAINER_CLASS: &str = "language-switcher";
const BUTTON_CLASS: &str = "lang-btn";
const DROPDOWN_CLASS: &str = "lang-dropdown";
const OPTION_CLASS: &str = "lang-option";
const OPEN_CLASS: &str = "active";
const CODE_ATTR: &str = "data-lang";

const GLOBE_ICON: &str = "fa-globe";
const CHEVRON_ICON: &str = "fa-chevron-down";
const CHECK_ICON: &str = "fa-check";

/// One dropdown row
#[derive(Debug, Clone)]
pub struct SwitcherRow<E> {
    pub code: &'static str,
    pub row: E,
    pub check: E,
}

/// Handles to the mounted widget
#[derive(Debug, Clone)]
pub struct Switcher<E> {
    pub container: E,
    pub button: E,
    pub label: E,
    pub dropdown: E,
    pub rows: Vec<SwitcherRow<E>>,
}

/// Build the widget and append it to the navigation container.
///
/// Nothing is inserted when the container is missing.
pub fn build<D: Document>(
    doc: &D,
    nav_selector: &str,
    languages: &'static [Language],
    current: &Language,
) -> Result<Switcher<D::Element>> {
    let nav = doc
        .query_selector(nav_selector)
        .ok_or_else(|| Error::NavigationMissing(nav_selector.to_string()))?;

    let container = element(doc, "div", CONTAINER_CLASS)?;

    let button = element(doc, "button", BUTTON_CLASS)?;
    let label = doc.create_element("span")?;
    doc.set_text(&label, current.name);
    doc.append_child(&button, &glyph(doc, GLOBE_ICON)?)?;
    doc.append_child(&button, &label)?;
    doc.append_child(&button, &glyph(doc, CHEVRON_ICON)?)?;

    let dropdown = element(doc, "div", DROPDOWN_CLASS)?;
    let mut rows = Vec::with_capacity(languages.len());
    for lang in languages {
        let row = element(doc, "div", OPTION_CLASS)?;
        doc.set_attribute(&row, CODE_ATTR, lang.code)?;

        let name = doc.create_element("span")?;
        doc.set_text(&name, lang.name);
        let check = glyph(doc, CHECK_ICON)?;
        doc.set_display(&check, check_display(lang.code == current.code));

        doc.append_child(&row, &name)?;
        doc.append_child(&row, &check)?;
        doc.append_child(&dropdown, &row)?;
        rows.push(SwitcherRow { code: lang.code, row, check });
    }

    doc.append_child(&container, &button)?;
    doc.append_child(&container, &dropdown)?;
    doc.append_child(&nav, &container)?;

    log::info!("Language switcher added to navigation");

    Ok(Switcher {
        container,
        button,
        label,
        dropdown,
        rows,
    })
}

fn element<D: Document>(doc: &D, tag: &str, class: &str) -> Result<D::Element> {
    let el = doc.create_element(tag)?;
    doc.set_attribute(&el, "class", class)?;
    Ok(el)
}

fn glyph<D: Document>(doc: &D, icon: &str) -> Result<D::Element> {
    element(doc, "i", &format!("fas {}", icon))
}

fn check_display(current: bool) -> &'static str {
    if current { "inline" } else { "none" }
}

impl<E: Clone + PartialEq> Switcher<E> {
    /// Show `lang` on the toggle button
    pub fn set_label<D: Document<Element = E>>(&self, doc: &D, lang: &Language) {
        doc.set_text(&self.label, lang.name);
    }

    /// Show the checkmark on exactly the row for `code`
    pub fn mark_current<D: Document<Element = E>>(&self, doc: &D, code: &str) {
        for row in &self.rows {
            doc.set_display(&row.check, check_display(row.code == code));
        }
    }

    /// Flip the dropdown; returns whether it is now open
    pub fn toggle<D: Document<Element = E>>(&self, doc: &D) -> bool {
        doc.toggle_class(&self.dropdown, OPEN_CLASS)
    }

    pub fn close<D: Document<Element = E>>(&self, doc: &D) {
        doc.remove_class(&self.dropdown, OPEN_CLASS);
    }

    pub fn is_open<D: Document<Element = E>>(&self, doc: &D) -> bool {
        doc.has_class(&self.dropdown, OPEN_CLASS)
    }

    /// Whether `target` lies inside the toggle button
    pub fn is_toggle<D: Document<Element = E>>(&self, doc: &D, target: &E) -> bool {
        doc.closest(target, &format!(".{}", BUTTON_CLASS)).as_ref() == Some(&self.button)
    }

    /// Language code of the row containing `target`, if any
    pub fn row_code<D: Document<Element = E>>(&self, doc: &D, target: &E) -> Option<&'static str> {
        let row = doc.closest(target, &format!(".{}", OPTION_CLASS))?;
        self.rows.iter().find(|r| r.row == row).map(|r| r.code)
    }
}
