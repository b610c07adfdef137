//! DeepL language codes and the normalization applied before a request.

/// Languages DeepL accepts as `source_lang`
pub const SOURCE_LANGS: &[&str] = &[
    "AR", "BG", "CS", "DA", "DE", "EL", "EN", "ES", "ET", "FI", "FR", "HU", "ID", "IT", "JA",
    "KO", "LT", "LV", "NB", "NL", "PL", "PT", "RO", "RU", "SK", "SL", "SV", "TR", "UK", "ZH",
];

/// Languages DeepL accepts as `target_lang`. Bare `EN` and `PT` are accepted
/// here and mapped to a regional variant by [`normalize_request`].
pub const TARGET_LANGS: &[&str] = &[
    "AR", "BG", "CS", "DA", "DE", "EL", "EN", "EN-GB", "EN-US", "ES", "ET", "FI", "FR", "HU",
    "ID", "IT", "JA", "KO", "LT", "LV", "NB", "NL", "PL", "PT", "PT-BR", "PT-PT", "RO", "RU",
    "SK", "SL", "SV", "TR", "UK", "ZH", "ZH-HANS", "ZH-HANT",
];

/// The language part of a tag: `EN-US` → `EN`.
pub fn base_language(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

fn parse_from(value: &str, accepted: &[&str]) -> Result<String, String> {
    let upper = value.trim().to_uppercase();
    if accepted.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(format!(
            "unsupported language '{}' (accepted: {})",
            value,
            accepted.join(", ")
        ))
    }
}

/// clap value parser for source languages
pub fn parse_source_lang(value: &str) -> Result<String, String> {
    parse_from(value, SOURCE_LANGS)
}

/// clap value parser for target languages
pub fn parse_target_lang(value: &str) -> Result<String, String> {
    parse_from(value, TARGET_LANGS)
}

/// clap value parser for the count language, which may name either side
pub fn parse_count_lang(value: &str) -> Result<String, String> {
    parse_source_lang(value).or_else(|_| parse_target_lang(value))
}

/// Turn the effective languages of a `translate` call into what DeepL
/// expects: optionally swap them, drop a region from the source (DeepL
/// source codes have none) and give `EN`/`PT` targets their default variant.
pub fn normalize_request(source: &str, target: &str, swap: bool) -> (String, String) {
    let (source, target) = if swap { (target, source) } else { (source, target) };

    let source = base_language(source).to_uppercase();
    let target = match target.to_uppercase().as_str() {
        "EN" => "EN-US".to_string(),
        "PT" => "PT-PT".to_string(),
        other => other.to_string(),
    };
    (source, target)
}
