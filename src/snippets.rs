use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

static SNIPPET_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/snippets");
const CATALOG_FILE: &str = "catalog.json";

/// A piece of reference code to practice on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub text: String,
}

#[derive(Deserialize)]
struct Catalog {
    snippets: Vec<Snippet>,
}

/// Ordered, read-only set of snippets
#[derive(Debug, Clone)]
pub struct SnippetLibrary {
    snippets: Vec<Snippet>,
}

impl SnippetLibrary {
    /// The catalog compiled into the binary
    pub fn embedded() -> Result<Self> {
        let file = SNIPPET_DIR.get_file(CATALOG_FILE).ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "embedded snippet catalog not found",
            ))
        })?;
        let json = file.contents_utf8().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "embedded snippet catalog is not UTF-8",
            ))
        })?;
        Self::from_json(json)
    }

    /// Read a user catalog: `{ "snippets": [{ "id", "title", "text" }, ...] }`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        Self::new(catalog.snippets)
    }

    pub fn new(snippets: Vec<Snippet>) -> Result<Self> {
        if snippets.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for s in &snippets {
            if !seen.insert(s.id.as_str()) {
                return Err(Error::DuplicateSnippet(s.id.clone()));
            }
        }
        Ok(Self { snippets })
    }

    pub fn get(&self, id: &str) -> Result<&Snippet> {
        self.snippets
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::UnknownSnippet(id.to_string()))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.snippets.iter().position(|s| s.id == id)
    }

    pub fn by_index(&self, idx: usize) -> Option<&Snippet> {
        self.snippets.get(idx)
    }

    pub fn first(&self) -> &Snippet {
        &self.snippets[0]
    }

    /// The snippet after `id`, wrapping around to the first one.
    ///
    /// Unknown ids also start over from the first snippet.
    pub fn next_after(&self, id: &str) -> &Snippet {
        let next = self
            .position(id)
            .map_or(0, |i| (i + 1) % self.snippets.len());
        &self.snippets[next]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snippet> {
        self.snippets.iter()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_embedded_catalog() {
        let lib = SnippetLibrary::embedded().unwrap();
        let ids: Vec<&str> = lib.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["python", "java", "sql", "js", "react", "pandas"]);
        assert!(lib.iter().all(|s| !s.text.is_empty() && !s.title.is_empty()));
    }

    #[test]
    fn test_get_and_position() {
        let lib = SnippetLibrary::embedded().unwrap();
        assert!(lib.get("sql").unwrap().text.starts_with("WITH ranked AS ("));
        assert_eq!(lib.position("js"), Some(3));
        assert_matches!(lib.get("cobol"), Err(Error::UnknownSnippet(id)) if id == "cobol");
    }

    #[test]
    fn test_next_after_wraps() {
        let lib = SnippetLibrary::embedded().unwrap();
        assert_eq!(lib.next_after("python").id, "java");
        assert_eq!(lib.next_after("pandas").id, "python");
        assert_eq!(lib.next_after("missing").id, "python");
    }

    #[test]
    fn test_from_json() {
        let lib = SnippetLibrary::from_json(
            r#"{"snippets":[{"id":"rs","title":"Rust","text":"fn main() {}"}]}"#,
        )
        .unwrap();
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.first().id, "rs");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_matches!(
            SnippetLibrary::from_json(r#"{"snippets":[]}"#),
            Err(Error::EmptyCatalog)
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let s = Snippet {
            id: "a".into(),
            title: "A".into(),
            text: "x".into(),
        };
        assert_matches!(
            SnippetLibrary::new(vec![s.clone(), s]),
            Err(Error::DuplicateSnippet(id)) if id == "a"
        );
    }

    #[test]
    fn test_malformed_json() {
        assert_matches!(SnippetLibrary::from_json("{"), Err(Error::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.json");
        std::fs::write(
            &path,
            r#"{"snippets":[{"id":"go","title":"Go","text":"package main"}]}"#,
        )
        .unwrap();
        let lib = SnippetLibrary::load(&path).unwrap();
        assert_eq!(lib.get("go").unwrap().text, "package main");
    }

    #[test]
    fn test_load_missing_file() {
        assert_matches!(
            SnippetLibrary::load("/definitely/not/here.json"),
            Err(Error::Io(_))
        );
    }
}
