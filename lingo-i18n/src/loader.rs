//! Resource loading from disk
//!
//! Resources are located through root templates containing a `{locale}`
//! placeholder, e.g. `locales/{locale}` with resource id `main.ftl` resolves
//! to `locales/fr/main.ftl` for the `fr` locale.

use crate::{I18nError, Result};
use fluent_bundle::FluentResource;
use fluent_syntax::parser::ParserError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder replaced with the locale tag in root templates.
pub const LOCALE_PLACEHOLDER: &str = "{locale}";

/// Root template used when none is configured.
pub const DEFAULT_ROOT: &str = "locales/{locale}";

/// One or more root path templates.
///
/// Deserializes from either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Roots {
    /// A single root template
    Single(String),
    /// Several root templates, searched in order
    Many(Vec<String>),
}

impl Roots {
    /// Iterate over the templates in search order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            Roots::Single(root) => std::slice::from_ref(root),
            Roots::Many(roots) => roots.as_slice(),
        };
        slice.iter().map(String::as_str)
    }
}

impl Default for Roots {
    fn default() -> Self {
        Roots::Single(DEFAULT_ROOT.to_string())
    }
}

impl From<&str> for Roots {
    fn from(root: &str) -> Self {
        Roots::Single(root.to_string())
    }
}

impl From<String> for Roots {
    fn from(root: String) -> Self {
        Roots::Single(root)
    }
}

impl From<Vec<String>> for Roots {
    fn from(roots: Vec<String>) -> Self {
        Roots::Many(roots)
    }
}

impl From<Vec<&str>> for Roots {
    fn from(roots: Vec<&str>) -> Self {
        Roots::Many(roots.into_iter().map(String::from).collect())
    }
}

/// Loads and parses FTL resources for a locale.
#[derive(Debug, Clone, Default)]
pub struct ResourceLoader {
    roots: Roots,
}

impl ResourceLoader {
    /// Create a loader over the given root templates.
    pub fn new(roots: impl Into<Roots>) -> Self {
        Self {
            roots: roots.into(),
        }
    }

    /// Get the root templates.
    pub fn roots(&self) -> &Roots {
        &self.roots
    }

    /// Resolve the on-disk path of a resource for a locale.
    pub fn localize_path(root: &str, resource_id: &str, locale: &str) -> PathBuf {
        let joined = Path::new(root).join(resource_id);
        PathBuf::from(joined.to_string_lossy().replace(LOCALE_PLACEHOLDER, locale))
    }

    /// Load every existing resource for `locale`.
    ///
    /// Roots are visited in order and, within a root, resource ids in the
    /// given order. Missing files are skipped and unreadable files fail the
    /// whole load. Entries with syntax errors are dropped from their
    /// resource; the rest of the file still loads.
    pub fn resources(&self, locale: &str, resource_ids: &[String]) -> Result<Vec<FluentResource>> {
        let mut resources = Vec::new();

        for root in self.roots.iter() {
            for resource_id in resource_ids {
                let path = Self::localize_path(root, resource_id, locale);
                if !path.is_file() {
                    tracing::warn!(locale, path = %path.display(), "resource file not found, skipping");
                    continue;
                }

                let source = fs::read_to_string(&path).map_err(|source| I18nError::Io {
                    path: path.clone(),
                    source,
                })?;
                resources.push(parse_resource(source, &path, locale));
                tracing::debug!(locale, path = %path.display(), "loaded resource");
            }
        }

        Ok(resources)
    }
}

/// Parse FTL source into a resource.
///
/// Malformed entries are logged and left out; every well-formed entry of
/// the source is kept.
pub(crate) fn parse_resource(source: String, origin: &Path, locale: &str) -> FluentResource {
    match FluentResource::try_new(source) {
        Ok(resource) => resource,
        Err((resource, errors)) => {
            tracing::warn!(
                locale,
                path = %origin.display(),
                errors = %describe_parser_errors(&errors),
                "skipping malformed entries"
            );
            resource
        }
    }
}

fn describe_parser_errors(errors: &[ParserError]) -> String {
    errors
        .iter()
        .map(|e| format!("{:?} at {:?}", e.kind, e.pos))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_syntax::ast::Entry;

    fn fixtures() -> String {
        format!("{}/tests/fixtures/locales/{{locale}}", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn test_localize_path() {
        let path = ResourceLoader::localize_path("locales/{locale}", "main.ftl", "fr");
        assert_eq!(path, PathBuf::from("locales/fr/main.ftl"));

        let path = ResourceLoader::localize_path("l10n", "{locale}.ftl", "de");
        assert_eq!(path, PathBuf::from("l10n/de.ftl"));
    }

    #[test]
    fn test_roots_conversions() {
        assert_eq!(Roots::default().iter().collect::<Vec<_>>(), [DEFAULT_ROOT]);

        let roots: Roots = vec!["a/{locale}", "b/{locale}"].into();
        assert_eq!(roots.iter().collect::<Vec<_>>(), ["a/{locale}", "b/{locale}"]);
    }

    #[test]
    fn test_roots_deserialize() {
        let single: Roots = serde_json::from_str(r#""locales/{locale}""#).unwrap();
        assert_eq!(single, Roots::Single("locales/{locale}".to_string()));

        let many: Roots = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(many, Roots::Many(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_load_existing_resources() {
        let loader = ResourceLoader::new(fixtures());
        let resources = loader.resources("en", &["main.ftl".to_string()]).unwrap();
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let loader = ResourceLoader::new(fixtures());
        let ids = vec!["main.ftl".to_string(), "does-not-exist.ftl".to_string()];
        let resources = loader.resources("de", &ids).unwrap();
        assert_eq!(resources.len(), 1);

        let resources = loader.resources("xx", &ids).unwrap();
        assert!(resources.is_empty());
    }

    #[test]
    fn test_syntax_errors_keep_valid_entries() {
        let loader = ResourceLoader::new(fixtures());
        assert_eq!(loader.roots(), &Roots::Single(fixtures()));

        let resources = loader.resources("fr", &["broken.ftl".to_string()]).unwrap();
        assert_eq!(resources.len(), 1);

        let ids: Vec<_> = resources[0]
            .entries()
            .filter_map(|entry| match entry {
                Entry::Message(message) => Some(message.id.name),
                _ => None,
            })
            .collect();
        assert_eq!(ids, ["before-broken", "after-broken"]);
    }

    #[test]
    fn test_parse_resource_inline() {
        let resource = parse_resource("hello = Hello".to_string(), Path::new("<inline>"), "en");
        assert_eq!(resource.entries().count(), 1);

        let resource = parse_resource(
            "hello = {\ngoodbye = Bye".to_string(),
            Path::new("<inline>"),
            "en",
        );
        assert!(
            resource
                .entries()
                .any(|entry| matches!(entry, Entry::Message(m) if m.id.name == "goodbye"))
        );
    }
}
