use serde::{Deserialize, Serialize};

/// Resource classes a page may request, as reported by the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Document,
    Stylesheet,
    Image,
    Media,
    Font,
    Script,
    Xhr,
    Fetch,
    Other,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Document => "document",
            ResourceKind::Stylesheet => "stylesheet",
            ResourceKind::Image => "image",
            ResourceKind::Media => "media",
            ResourceKind::Font => "font",
            ResourceKind::Script => "script",
            ResourceKind::Xhr => "xhr",
            ResourceKind::Fetch => "fetch",
            ResourceKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Allow,
    Abort,
}

/// Decides, per sub-resource request, whether the page may fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFilter {
    blocked: Vec<ResourceKind>,
}

impl Default for ResourceFilter {
    fn default() -> Self {
        Self::blocking(&Self::DEFAULT_BLOCKED)
    }
}

impl ResourceFilter {
    /// Resource classes that never affect the extracted fields.
    pub const DEFAULT_BLOCKED: [ResourceKind; 3] =
        [ResourceKind::Image, ResourceKind::Font, ResourceKind::Stylesheet];

    pub fn blocking(kinds: &[ResourceKind]) -> Self {
        let mut blocked = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !blocked.contains(kind) {
                blocked.push(*kind);
            }
        }
        Self { blocked }
    }

    pub fn allow_all() -> Self {
        Self { blocked: vec![] }
    }

    pub fn decide(&self, kind: ResourceKind) -> FilterDecision {
        if self.blocked.contains(&kind) {
            FilterDecision::Abort
        } else {
            FilterDecision::Allow
        }
    }

    pub fn blocked(&self) -> &[ResourceKind] {
        &self.blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blocks_image_font_stylesheet() {
        let filter = ResourceFilter::default();
        assert_eq!(filter.decide(ResourceKind::Image), FilterDecision::Abort);
        assert_eq!(filter.decide(ResourceKind::Font), FilterDecision::Abort);
        assert_eq!(filter.decide(ResourceKind::Stylesheet), FilterDecision::Abort);
    }

    #[test]
    fn test_default_allows_everything_else() {
        let filter = ResourceFilter::default();
        for kind in [
            ResourceKind::Document,
            ResourceKind::Script,
            ResourceKind::Xhr,
            ResourceKind::Fetch,
            ResourceKind::Media,
            ResourceKind::Other,
        ] {
            assert_eq!(filter.decide(kind), FilterDecision::Allow, "{}", kind.as_str());
        }
    }

    #[test]
    fn test_blocking_dedups() {
        let filter = ResourceFilter::blocking(&[ResourceKind::Image, ResourceKind::Image]);
        assert_eq!(filter.blocked(), &[ResourceKind::Image]);
    }

    #[test]
    fn test_allow_all() {
        let filter = ResourceFilter::allow_all();
        assert_eq!(filter.decide(ResourceKind::Image), FilterDecision::Allow);
    }

    #[test]
    fn test_kinds_deserialize_lowercase() {
        let kinds: Vec<ResourceKind> = serde_json::from_str(r#"["image", "font", "xhr"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![ResourceKind::Image, ResourceKind::Font, ResourceKind::Xhr]
        );
    }
}
