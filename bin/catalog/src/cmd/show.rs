//! Show command - print one challenge

use catalog_core::Config;
use catalog_store::ChallengeStore;
use color_eyre::eyre::{Result, WrapErr};

/// Run the show command.
///
/// Prints the same JSON object the API serves for `id`.
pub async fn run(config: &Config, id: &str) -> Result<()> {
    let store = ChallengeStore::from_config(config);
    let detail = store
        .read(id)
        .await
        .wrap_err_with(|| format!("Failed to read challenge {id}"))?;

    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}
