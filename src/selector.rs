//! Parser and matcher for the CSS selector subset `MemoryDocument` supports:
//! type, `*`, `#id`, `.class`, compounds of those, the descendant combinator,
//! and comma-separated lists.

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

use crate::error::{Error, Result};

/// Read-only view of an element tree for matching.
pub(crate) trait ElementTree {
    type Node: Copy;

    fn local_name(&self, node: Self::Node) -> &str;
    fn element_id(&self, node: Self::Node) -> Option<&str>;
    fn has_class(&self, node: Self::Node, class: &str) -> bool;
    fn parent_element(&self, node: Self::Node) -> Option<Self::Node>;
}

/// One simple-selector sequence, e.g. `style#theme.dark`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Compound {
    /// Parse a single compound with no whitespace or combinators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] on empty names or unsupported syntax.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::invalid_selector(raw, "empty compound"));
        }
        let mut compound = Self::default();
        let mut rest = raw;

        if let Some(after) = rest.strip_prefix('*') {
            rest = after;
        } else {
            let (name, after) = split_ident(rest);
            if !name.is_empty() {
                compound.tag = Some(name.to_ascii_lowercase());
            }
            rest = after;
        }

        while let Some(marker) = rest.chars().next() {
            let (name, after) = split_ident(&rest[marker.len_utf8()..]);
            match marker {
                '#' if name.is_empty() => return Err(Error::invalid_selector(raw, "missing name after `#`")),
                '.' if name.is_empty() => return Err(Error::invalid_selector(raw, "missing name after `.`")),
                '#' => compound.id = Some(name.to_owned()),
                '.' => compound.classes.push(name.to_owned()),
                _ => return Err(Error::invalid_selector(raw, "unsupported selector syntax")),
            }
            rest = after;
        }
        Ok(compound)
    }

    fn matches<T: ElementTree>(&self, tree: &T, node: T::Node) -> bool {
        if let Some(tag) = &self.tag
            && !tree.local_name(node).eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && tree.element_id(node) != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|class| tree.has_class(node, class))
    }
}

/// A descendant chain; the last compound is the subject.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Complex(Vec<Compound>);

impl Complex {
    fn matches<T: ElementTree>(&self, tree: &T, node: T::Node) -> bool {
        let Some((subject, ancestors)) = self.0.split_last() else {
            return false;
        };
        if !subject.matches(tree, node) {
            return false;
        }
        let mut cursor = tree.parent_element(node);
        for wanted in ancestors.iter().rev() {
            loop {
                let Some(candidate) = cursor else {
                    return false;
                };
                cursor = tree.parent_element(candidate);
                if wanted.matches(tree, candidate) {
                    break;
                }
            }
        }
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(Vec<Complex>);

impl SelectorList {
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] for empty groups or unsupported syntax.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut groups = Vec::new();
        for group in raw.split(',') {
            let compounds = group
                .split_whitespace()
                .map(Compound::parse)
                .collect::<Result<Vec<_>>>()
                .map_err(|err| match err {
                    Error::InvalidSelector { reason, .. } => Error::invalid_selector(raw, reason),
                    other => other,
                })?;
            if compounds.is_empty() {
                return Err(Error::invalid_selector(raw, "empty selector"));
            }
            groups.push(Complex(compounds));
        }
        Ok(Self(groups))
    }

    pub(crate) fn matches<T: ElementTree>(&self, tree: &T, node: T::Node) -> bool {
        self.0.iter().any(|complex| complex.matches(tree, node))
    }
}

fn split_ident(raw: &str) -> (&str, &str) {
    let end = raw
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()))
        .map_or(raw.len(), |(i, _)| i);
    raw.split_at(end)
}
