//! Check command - validate every challenge directory

use std::collections::HashMap;

use catalog_core::{ChallengeFile, ChallengeId, Config};
use catalog_markdown::PromptRenderer;
use catalog_store::ChallengeStore;
use color_eyre::eyre::{Result, bail};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Number of challenge directories inspected.
    pub checked: usize,
    /// Problems that make a challenge unusable.
    pub errors: Vec<String>,
    /// Problems worth fixing that do not break serving.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Whether any error was found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether any warning was found.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
pub async fn run(config: &Config, strict: bool) -> Result<()> {
    tracing::info!(root = %config.data.root.display(), strict, "Checking challenges");

    println!("Checking {}...", config.data.root.display());
    let result = validate(&ChallengeStore::from_config(config)).await;

    println!();
    println!("Summary:");
    println!("  Challenges: {}", result.checked);
    println!("  Errors:     {}", result.errors.len());
    println!("  Warnings:   {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate the data root of `store`.
pub async fn validate(store: &ChallengeStore) -> ValidationResult {
    let mut result = ValidationResult::default();

    let candidates = match store.candidates().await {
        Ok(c) => c,
        Err(e) => {
            result.add_error(format!("Cannot read data root: {e}"));
            return result;
        }
    };

    for skipped in &candidates.skipped {
        result.add_warning(format!("{}/ ignored: {}", skipped.name, skipped.reason));
    }

    let mut by_number: HashMap<&str, Vec<&str>> = HashMap::new();
    for id in &candidates.ids {
        by_number.entry(id.number()).or_default().push(id.as_str());
    }
    let mut clashes: Vec<_> = by_number.values().filter(|names| names.len() > 1).collect();
    clashes.sort();
    for names in clashes {
        result.add_warning(format!(
            "Directories {} share the same numeric id",
            names.join(", ")
        ));
    }

    let renderer = PromptRenderer::new();
    for id in &candidates.ids {
        result.checked += 1;
        validate_challenge(store, &renderer, id, &mut result).await;
    }

    if candidates.ids.is_empty() {
        result.add_warning("No challenges found");
    }

    result
}

/// Validate one challenge directory.
async fn validate_challenge(
    store: &ChallengeStore,
    renderer: &PromptRenderer,
    id: &ChallengeId,
    result: &mut ValidationResult,
) {
    let mut files = HashMap::new();
    for file in ChallengeFile::ALL {
        match store.read_file(id, file).await {
            Ok(content) => {
                files.insert(file, content);
            }
            Err(e) => result.add_error(format!("{id}: {e}")),
        }
    }

    if let Some(raw) = files.get(&ChallengeFile::Metadata) {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(map)) => match map.get("label") {
                Some(serde_json::Value::String(label)) if label.trim().is_empty() => {
                    result.add_warning(format!("{id}: metadata.json has an empty label"));
                }
                Some(serde_json::Value::String(_)) => {}
                Some(_) => result.add_error(format!("{id}: metadata.json label is not a string")),
                None => result.add_error(format!("{id}: metadata.json has no label")),
            },
            Ok(_) => result.add_error(format!("{id}: metadata.json is not a JSON object")),
            Err(e) => result.add_error(format!("{id}: metadata.json is not valid JSON: {e}")),
        }
    }

    if let Some(prompt) = files.get(&ChallengeFile::Prompt)
        && renderer.outline(prompt).is_empty()
    {
        result.add_warning(format!("{id}: prompt.md has no heading"));
    }

    for file in [ChallengeFile::Tests, ChallengeFile::User] {
        if files.get(&file).is_some_and(|content| content.trim().is_empty()) {
            result.add_warning(format!("{id}: {file} is empty"));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use super::*;

    fn write_challenge(root: &Path, id: &str, metadata: &str, prompt: &str) {
        let dir = root.join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("metadata.json"), metadata).unwrap();
        fs::write(dir.join("prompt.md"), prompt).unwrap();
        fs::write(dir.join("tests.ts"), "// t").unwrap();
        fs::write(dir.join("user.ts"), "// u").unwrap();
    }

    #[tokio::test]
    async fn test_valid_root() {
        let dir = tempfile::tempdir().unwrap();
        write_challenge(dir.path(), "1", r#"{"label": "One"}"#, "# One");
        write_challenge(dir.path(), "2", r#"{"label": "Two"}"#, "# Two");

        let result = validate(&ChallengeStore::new(dir.path())).await;

        assert_eq!(result.checked, 2);
        assert!(!result.has_errors(), "{:?}", result.errors);
        assert!(!result.has_warnings(), "{:?}", result.warnings);
    }

    #[tokio::test]
    async fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();

        let result = validate(&ChallengeStore::new(dir.path().join("absent"))).await;

        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Cannot read data root"));
    }

    #[tokio::test]
    async fn test_reports_bad_metadata_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        write_challenge(dir.path(), "1", r#"{"title": "One"}"#, "# One");
        write_challenge(dir.path(), "2", r#"["Two"]"#, "# Two");
        write_challenge(dir.path(), "3", r#"{"label": 3}"#, "# Three");
        write_challenge(dir.path(), "4", r#"{"label": "Four"}"#, "# Four");
        fs::remove_file(dir.path().join("4/user.ts")).unwrap();

        let result = validate(&ChallengeStore::new(dir.path())).await;

        assert_eq!(result.checked, 4);
        assert_eq!(result.errors.len(), 4, "{:?}", result.errors);
        assert!(result.errors[0].contains("has no label"));
        assert!(result.errors[1].contains("not a JSON object"));
        assert!(result.errors[2].contains("not a string"));
        assert!(result.errors[3].contains("missing user.ts"));
    }

    #[tokio::test]
    async fn test_warnings() {
        let dir = tempfile::tempdir().unwrap();
        write_challenge(dir.path(), "1", r#"{"label": "One"}"#, "no heading here");
        write_challenge(dir.path(), "01", r#"{"label": "Again"}"#, "# Again");
        fs::write(dir.path().join("01/tests.ts"), "  \n").unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();

        let result = validate(&ChallengeStore::new(dir.path())).await;

        assert!(!result.has_errors(), "{:?}", result.errors);
        let warnings = result.warnings.join("\n");
        assert!(warnings.contains("notes/ ignored"));
        assert!(warnings.contains("01, 1 share the same numeric id"));
        assert!(warnings.contains("1: prompt.md has no heading"));
        assert!(warnings.contains("01: tests.ts is empty"));
    }

    #[tokio::test]
    async fn test_empty_root_warns() {
        let dir = tempfile::tempdir().unwrap();

        let result = validate(&ChallengeStore::new(dir.path())).await;

        assert_eq!(result.checked, 0);
        assert_eq!(result.warnings, vec!["No challenges found".to_string()]);
    }
}
