//! Region code to DuckDuckGo `kl` parameter mapping.

/// Locale used for unknown region codes.
pub const DEFAULT_LOCALE: &str = "us-en";

const REGIONS: &[(&str, &str)] = &[
    ("US", "us-en"),
    ("GB", "uk-en"),
    ("DE", "de-de"),
    ("FR", "fr-fr"),
    ("JP", "jp-ja"),
    ("AU", "au-en"),
    ("ID", "id-id"),
    ("SG", "sg-en"),
];

/// Map an ISO 3166-1 alpha-2 region code (case-insensitive) to a `kl` value.
pub fn locale_for_region(region: &str) -> &'static str {
    let region = region.trim();
    REGIONS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(region))
        .map(|(_, locale)| *locale)
        .unwrap_or(DEFAULT_LOCALE)
}
