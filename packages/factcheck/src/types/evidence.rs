//! Evidence gathered for one question.

use serde::{Deserialize, Serialize};

/// Where a piece of evidence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceOrigin {
    /// Web search result.
    Web,

    /// Encyclopedia search result.
    Encyclopedia,
}

/// One search hit, normalized across providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Which collaborator produced this item.
    pub origin: EvidenceOrigin,

    /// URL for web hits, article title for encyclopedia hits.
    pub locator: String,

    /// Content excerpt or snippet.
    pub excerpt: String,
}

impl EvidenceItem {
    /// Create a web evidence item.
    pub fn web(locator: impl Into<String>, excerpt: impl Into<String>) -> Self {
        Self {
            origin: EvidenceOrigin::Web,
            locator: locator.into(),
            excerpt: excerpt.into(),
        }
    }

    /// Create an encyclopedia evidence item.
    pub fn encyclopedia(locator: impl Into<String>, excerpt: impl Into<String>) -> Self {
        Self {
            origin: EvidenceOrigin::Encyclopedia,
            locator: locator.into(),
            excerpt: excerpt.into(),
        }
    }
}

/// Ordered evidence for one question: web items first (provider-ranked),
/// then encyclopedia items. May be empty; search failure is not fatal, it
/// just means "no evidence found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    items: Vec<EvidenceItem>,
}

impl EvidenceBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bundle preserving the web-first ordering contract.
    pub fn from_parts(web: Vec<EvidenceItem>, encyclopedia: Vec<EvidenceItem>) -> Self {
        let mut items = web;
        items.extend(encyclopedia);
        Self { items }
    }

    /// All items, in bundle order.
    pub fn items(&self) -> &[EvidenceItem] {
        &self.items
    }

    /// Items from one origin, in bundle order.
    pub fn from_origin(&self, origin: EvidenceOrigin) -> impl Iterator<Item = &EvidenceItem> {
        self.items.iter().filter(move |i| i.origin == origin)
    }

    /// Whether any item came from the given origin.
    pub fn has_origin(&self, origin: EvidenceOrigin) -> bool {
        self.items.iter().any(|i| i.origin == origin)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_keeps_web_before_encyclopedia() {
        let bundle = EvidenceBundle::from_parts(
            vec![EvidenceItem::web("https://a.com", "a")],
            vec![EvidenceItem::encyclopedia("Topic", "snippet")],
        );

        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.items()[0].origin, EvidenceOrigin::Web);
        assert_eq!(bundle.items()[1].origin, EvidenceOrigin::Encyclopedia);
    }

    #[test]
    fn empty_bundle_is_allowed() {
        let bundle = EvidenceBundle::new();
        assert!(bundle.is_empty());
        assert!(!bundle.has_origin(EvidenceOrigin::Web));
    }
}
