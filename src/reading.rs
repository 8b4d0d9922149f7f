//! Answer checking for reading exercises: a kana is shown and the learner
//! types its reading, either as romaji or as kana of either script.

use wana_kana::ConvertJapanese;

use crate::{
    core::{
        CharacterSpec,
        KanaError,
        Outcome,
    },
    kana::KanaCatalog,
};

/// Fold a typed answer to hiragana. Returns `None` for blank input.
pub fn normalize_answer(answer: &str) -> Option<String> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase().to_hiragana())
}

/// Judge `answer` against the reading of `expected`.
///
/// The reading matches when it equals the kana itself or its romaji label
/// (so "ji" is accepted for ぢ). An answer that only gets the voicing mark
/// wrong, like "ka" for が or "ba" for ぱ, is approximate.
pub fn check_reading(
    catalog: &KanaCatalog,
    expected: &CharacterSpec,
    answer: &str,
) -> Result<Outcome, KanaError> {
    let given = normalize_answer(answer)
        .ok_or_else(|| KanaError::InvalidInput("reading answer is empty".to_string()))?;

    if given == expected.glyph.to_hiragana() || given == expected.romaji.to_hiragana() {
        return Ok(Outcome::Exact);
    }

    let expected_base = base_reading(catalog, expected);
    let given_base = catalog.by_glyph(&given).map(|spec| base_reading(catalog, spec));

    if given_base.as_deref() == Some(expected_base.as_str()) {
        Ok(Outcome::Approximate)
    } else {
        Ok(Outcome::Incorrect)
    }
}

fn base_reading(catalog: &KanaCatalog, spec: &CharacterSpec) -> String {
    catalog.unvoiced(spec).unwrap_or(spec).glyph.to_hiragana()
}
