//! List command - print the catalog

use catalog_core::{CatalogListing, Config};
use catalog_store::ChallengeStore;
use color_eyre::eyre::{Result, WrapErr};

/// Run the list command.
pub async fn run(config: &Config) -> Result<()> {
    let store = ChallengeStore::from_config(config);
    let listing = store
        .list()
        .await
        .wrap_err_with(|| format!("Failed to list {}", store.root().display()))?;

    print!("{}", render(&listing));
    Ok(())
}

/// Format a listing as aligned text.
pub fn render(listing: &CatalogListing) -> String {
    let id_width = listing
        .entries
        .iter()
        .map(|e| e.id.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in &listing.entries {
        out.push_str(&format!(
            "{:>id_width$}  {}  {}\n",
            entry.id, entry.name, entry.url
        ));
    }

    if listing.entries.is_empty() {
        out.push_str("No challenges found\n");
    }

    if listing.has_skipped() {
        out.push_str(&format!("\nSkipped {}:\n", listing.skipped.len()));
        for skipped in &listing.skipped {
            out.push_str(&format!("  ⚠ {}: {}\n", skipped.name, skipped.reason));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use catalog_core::{CatalogEntry, ChallengeId, SkippedChallenge};

    use super::*;

    #[test]
    fn test_render_aligns_ids() {
        let listing = CatalogListing {
            entries: vec![
                CatalogEntry::new(&ChallengeId::parse("2").unwrap(), "Two"),
                CatalogEntry::new(&ChallengeId::parse("10").unwrap(), "Ten"),
            ],
            skipped: vec![],
        };

        assert_eq!(
            render(&listing),
            " 2  Two  /challenge/2\n10  Ten  /challenge/10\n"
        );
    }

    #[test]
    fn test_render_reports_skipped() {
        let listing = CatalogListing {
            entries: vec![],
            skipped: vec![SkippedChallenge {
                name: "3".to_string(),
                reason: "challenge 3 is missing metadata.json".to_string(),
            }],
        };

        let out = render(&listing);
        assert!(out.starts_with("No challenges found\n"));
        assert!(out.contains("Skipped 1:"));
        assert!(out.contains("3: challenge 3 is missing metadata.json"));
    }
}
