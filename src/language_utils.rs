use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for subtitle track language codes
///
/// YouTube reports ISO 639-1 codes, optionally locale-qualified
/// (`en-US`, `ko-KR`, `zh-Hans`). These helpers validate such codes and
/// resolve a display name from the base language.
/// Base ISO 639-1 part of a possibly locale-qualified code
pub fn base_code(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate a track language code such as `ko`, `en-US` or `fil`
pub fn validate_language_code(code: &str) -> Result<()> {
    let base = base_code(code);

    let known = match base.len() {
        2 => Language::from_639_1(&base).is_some(),
        3 => Language::from_639_3(&base).is_some(),
        _ => false,
    };

    if known {
        Ok(())
    } else {
        Err(anyhow!("Invalid language code: {}", code))
    }
}

/// Get the English language name for a code, keeping any locale qualifier
pub fn get_language_name(code: &str) -> Result<String> {
    let base = base_code(code);
    let language = match base.len() {
        2 => Language::from_639_1(&base),
        3 => Language::from_639_3(&base),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    let name = language.to_name().to_string();
    match code.trim().split_once(['-', '_']) {
        Some((_, region)) if !region.is_empty() => Ok(format!("{} ({})", name, region)),
        _ => Ok(name),
    }
}
