//! Interactive selection prompts

use crate::application::dto::BundleFile;
use anyhow::{Context, Result};
use dialoguer::{Select, theme::ColorfulTheme};
use humansize::{DECIMAL, format_size};

const NONE_ITEM: &str = "(none)";

/// Asks which downloaded bundle to import
pub fn pick_bundle(bundles: &[BundleFile]) -> Result<&BundleFile> {
    let items: Vec<String> = bundles
        .iter()
        .map(|b| format!("{}  ({})", b.file_name(), format_size(b.size, DECIMAL)))
        .collect();

    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a bundle")
        .items(&items)
        .default(0)
        .interact()
        .context("Bundle selection cancelled")?;

    bundles.get(index).context("Invalid bundle selection")
}

/// Asks for one entry out of `candidates`, best first.
///
/// Optional prompts append a "(none)" choice. Returns `None` for an empty
/// list or when "(none)" is chosen.
pub fn pick_entry(prompt: &str, candidates: &[String], required: bool) -> Result<Option<String>> {
    if candidates.is_empty() {
        return Ok(None);
    }

    let mut items: Vec<&str> = candidates.iter().map(String::as_str).collect();
    if !required {
        items.push(NONE_ITEM);
    }

    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()
        .context("Selection cancelled")?;

    Ok(candidates.get(index).cloned())
}
