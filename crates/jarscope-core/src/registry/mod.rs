//! Selector-based provider registries.
//!
//! One generic lookup engine serves every extensibility axis (tree-node
//! rendering, type decoding, indexing, source saving); the axis traits
//! themselves live in [`axes`]. Container construction uses its own
//! accept-based mechanism in [`crate::containers`].

pub mod axes;

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

/// Capability every registrable provider exposes.
///
/// A selector is a string `"<containerType>:<entryKind>:<pathOrPattern>"`
/// with `entryKind` one of `file`/`dir`, and `pathOrPattern` a literal
/// container-relative path or one of `*/name`, `*.extension`, `*`.
/// Returning no selectors means "default for everything": the provider is
/// registered under the type-wide keys `*:file:*` and `*:dir:*`.
pub trait Provider {
    /// Selector strings this provider registers under.
    fn selectors(&self) -> Vec<String>;

    /// Optional discriminating pattern evaluated against the full
    /// container-relative path of a candidate entry.
    fn path_pattern(&self) -> Option<&Regex> {
        None
    }
}

/// Providers sharing one selector: pattern-guarded entries in registration
/// order, plus at most one pattern-less default (last registration wins).
struct Group<P: ?Sized> {
    guarded: Vec<Arc<P>>,
    fallback: Option<Arc<P>>,
}

impl<P: ?Sized> Default for Group<P> {
    fn default() -> Self {
        Self {
            guarded: Vec::new(),
            fallback: None,
        }
    }
}

/// Generic selector → provider lookup engine.
///
/// Lookup order for an entry is deliberate: exact path beats basename
/// wildcard beats extension wildcard beats type-wide default, and the
/// entry's real container type beats the container-agnostic `*`. A plugin
/// can therefore override one archive type or one file without affecting
/// the general case. "No provider" is a valid outcome, not an error.
pub struct SelectorRegistry<P: ?Sized> {
    groups: HashMap<String, Group<P>>,
}

impl<P: ?Sized> Default for SelectorRegistry<P> {
    fn default() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }
}

impl<P: Provider + ?Sized> SelectorRegistry<P> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under each of its selectors.
    ///
    /// Within a group, pattern-guarded providers keep registration order
    /// (first match wins on lookup); a pattern-less provider replaces any
    /// previously registered default for the same selector.
    pub fn register(&mut self, provider: Arc<P>) {
        let mut selectors = provider.selectors();
        if selectors.is_empty() {
            selectors = vec!["*:file:*".to_string(), "*:dir:*".to_string()];
        }
        for selector in selectors {
            let group = self.groups.entry(selector).or_default();
            if provider.path_pattern().is_some() {
                group.guarded.push(Arc::clone(&provider));
            } else {
                group.fallback = Some(Arc::clone(&provider));
            }
        }
    }

    /// Resolves the provider for an entry described by its container type,
    /// kind, and container-relative path.
    ///
    /// Tries, in order: `type:kind:path`, `type:kind:*/basename`,
    /// `type:kind:*.extension` (when an extension exists), `type:kind:*`;
    /// then the same sequence once more with container type `*`. Returns
    /// `None` when nothing matched.
    #[must_use]
    pub fn select(&self, container_type: &str, is_directory: bool, path: &str) -> Option<Arc<P>> {
        let kind = if is_directory { "dir" } else { "file" };
        if let Some(provider) = self.select_for_type(container_type, kind, path) {
            return Some(provider);
        }
        if container_type == "*" {
            return None;
        }
        self.select_for_type("*", kind, path)
    }

    fn select_for_type(&self, container_type: &str, kind: &str, path: &str) -> Option<Arc<P>> {
        let prefix = format!("{container_type}:{kind}:");

        if let Some(provider) = self.resolve(&format!("{prefix}{path}"), path) {
            return Some(provider);
        }

        let basename = path.rsplit('/').next().unwrap_or(path);
        if let Some(provider) = self.resolve(&format!("{prefix}*/{basename}"), path) {
            return Some(provider);
        }

        if let Some((stem, extension)) = basename.rsplit_once('.')
            && !stem.is_empty()
            && let Some(provider) = self.resolve(&format!("{prefix}*.{extension}"), path)
        {
            return Some(provider);
        }

        self.resolve(&format!("{prefix}*"), path)
    }

    fn resolve(&self, key: &str, path: &str) -> Option<Arc<P>> {
        let group = self.groups.get(key)?;
        for provider in &group.guarded {
            if provider.path_pattern().is_some_and(|re| re.is_match(path)) {
                return Some(Arc::clone(provider));
            }
        }
        group.fallback.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Fixed {
        name: &'static str,
        selectors: Vec<String>,
        pattern: Option<Regex>,
    }

    impl Fixed {
        fn new(name: &'static str, selectors: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                name,
                selectors: selectors.iter().map(ToString::to_string).collect(),
                pattern: None,
            })
        }

        fn guarded(name: &'static str, selectors: &[&str], pattern: &str) -> Arc<Self> {
            Arc::new(Self {
                name,
                selectors: selectors.iter().map(ToString::to_string).collect(),
                pattern: Some(Regex::new(pattern).unwrap()),
            })
        }
    }

    impl Provider for Fixed {
        fn selectors(&self) -> Vec<String> {
            self.selectors.clone()
        }

        fn path_pattern(&self) -> Option<&Regex> {
            self.pattern.as_ref()
        }
    }

    fn name(provider: Option<Arc<Fixed>>) -> Option<&'static str> {
        provider.map(|p| p.name)
    }

    #[test]
    fn test_specificity_order() {
        let mut registry = SelectorRegistry::new();
        registry.register(Fixed::new("exact", &["jar:file:foo/Bar.class"]));
        registry.register(Fixed::new("by-ext", &["jar:file:*.class"]));
        registry.register(Fixed::new("any", &["*:file:*"]));

        assert_eq!(
            name(registry.select("jar", false, "foo/Bar.class")),
            Some("exact")
        );
        assert_eq!(
            name(registry.select("jar", false, "foo/Other.class")),
            Some("by-ext")
        );
        assert_eq!(
            name(registry.select("war", false, "foo/Bar.class")),
            Some("any")
        );
    }

    #[test]
    fn test_basename_beats_extension() {
        let mut registry = SelectorRegistry::new();
        registry.register(Fixed::new("manifest", &["jar:file:*/MANIFEST.MF"]));
        registry.register(Fixed::new("by-ext", &["jar:file:*.MF"]));

        assert_eq!(
            name(registry.select("jar", false, "META-INF/MANIFEST.MF")),
            Some("manifest")
        );
        assert_eq!(
            name(registry.select("jar", false, "META-INF/OTHER.MF")),
            Some("by-ext")
        );
    }

    #[test]
    fn test_no_provider_is_none() {
        let mut registry = SelectorRegistry::new();
        registry.register(Fixed::new("classes", &["jar:file:*.class"]));

        assert_eq!(name(registry.select("jar", false, "readme.txt")), None);
        assert_eq!(name(registry.select("jar", true, "com/example")), None);
    }

    #[test]
    fn test_pattern_guard_first_match_wins() {
        let mut registry = SelectorRegistry::new();
        registry.register(Fixed::guarded(
            "first",
            &["jar:file:*.class"],
            r"^com/.*\.class$",
        ));
        registry.register(Fixed::guarded(
            "second",
            &["jar:file:*.class"],
            r"^com/example/.*\.class$",
        ));
        registry.register(Fixed::new("default", &["jar:file:*.class"]));

        assert_eq!(
            name(registry.select("jar", false, "com/example/A.class")),
            Some("first")
        );
        assert_eq!(
            name(registry.select("jar", false, "org/B.class")),
            Some("default")
        );
    }

    #[test]
    fn test_duplicate_default_last_wins() {
        let mut registry = SelectorRegistry::new();
        registry.register(Fixed::new("stock", &["jar:file:*"]));
        registry.register(Fixed::new("override", &["jar:file:*"]));

        assert_eq!(name(registry.select("jar", false, "a.txt")), Some("override"));
    }

    #[test]
    fn test_empty_selectors_default_for_everything() {
        let mut registry = SelectorRegistry::new();
        registry.register(Fixed::new("universal", &[]));

        assert_eq!(name(registry.select("jar", false, "a.txt")), Some("universal"));
        assert_eq!(name(registry.select("war", true, "WEB-INF")), Some("universal"));
    }

    #[test]
    fn test_container_specific_beats_agnostic() {
        let mut registry = SelectorRegistry::new();
        registry.register(Fixed::new("agnostic", &["*:file:*.class"]));
        registry.register(Fixed::new("jar-only", &["jar:file:*"]));

        // jar:file:* is reached within the jar pass, before any "*" key
        assert_eq!(
            name(registry.select("jar", false, "A.class")),
            Some("jar-only")
        );
        assert_eq!(
            name(registry.select("war", false, "A.class")),
            Some("agnostic")
        );
    }

    #[test]
    fn test_dir_and_file_kinds_distinct() {
        let mut registry = SelectorRegistry::new();
        registry.register(Fixed::new("dirs", &["jar:dir:*"]));
        registry.register(Fixed::new("files", &["jar:file:*"]));

        assert_eq!(name(registry.select("jar", true, "com")), Some("dirs"));
        assert_eq!(name(registry.select("jar", false, "com")), Some("files"));
    }
}
