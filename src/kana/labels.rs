//! Classifier output orderings.
//!
//! Index `i` of the model's probability vector means `HIRAGANA_LABELS[i]` when
//! judging hiragana and `KATAKANA_LABELS[i]` when judging katakana. Both tables
//! are written out by hand; they are never derived from code-point offsets.

use crate::core::ScriptVariant;

pub const LABEL_COUNT: usize = 71;

#[rustfmt::skip]
pub const HIRAGANA_LABELS: [&str; LABEL_COUNT] = [
    "あ", "い", "う", "え", "お",
    "か", "き", "く", "け", "こ",
    "さ", "し", "す", "せ", "そ",
    "た", "ち", "つ", "て", "と",
    "な", "に", "ぬ", "ね", "の",
    "は", "ひ", "ふ", "へ", "ほ",
    "ま", "み", "む", "め", "も",
    "や", "ゆ", "よ",
    "ら", "り", "る", "れ", "ろ",
    "わ", "を", "ん",
    // dakuten
    "が", "ぎ", "ぐ", "げ", "ご",
    "ざ", "じ", "ず", "ぜ", "ぞ",
    "だ", "ぢ", "づ", "で", "ど",
    "ば", "び", "ぶ", "べ", "ぼ",
    // handakuten
    "ぱ", "ぴ", "ぷ", "ぺ", "ぽ",
];

#[rustfmt::skip]
pub const KATAKANA_LABELS: [&str; LABEL_COUNT] = [
    "ア", "イ", "ウ", "エ", "オ",
    "カ", "キ", "ク", "ケ", "コ",
    "サ", "シ", "ス", "セ", "ソ",
    "タ", "チ", "ツ", "テ", "ト",
    "ナ", "ニ", "ヌ", "ネ", "ノ",
    "ハ", "ヒ", "フ", "ヘ", "ホ",
    "マ", "ミ", "ム", "メ", "モ",
    "ヤ", "ユ", "ヨ",
    "ラ", "リ", "ル", "レ", "ロ",
    "ワ", "ヲ", "ン",
    // dakuten
    "ガ", "ギ", "グ", "ゲ", "ゴ",
    "ザ", "ジ", "ズ", "ゼ", "ゾ",
    "ダ", "ヂ", "ヅ", "デ", "ド",
    "バ", "ビ", "ブ", "ベ", "ボ",
    // handakuten
    "パ", "ピ", "プ", "ペ", "ポ",
];

pub fn labels_for(variant: ScriptVariant) -> &'static [&'static str] {
    match variant {
        ScriptVariant::Hiragana => &HIRAGANA_LABELS,
        ScriptVariant::Katakana => &KATAKANA_LABELS,
    }
}

pub fn label_at(variant: ScriptVariant, index: usize) -> Option<&'static str> {
    labels_for(variant).get(index).copied()
}

pub fn index_of(variant: ScriptVariant, glyph: &str) -> Option<usize> {
    labels_for(variant).iter().position(|label| *label == glyph)
}

/// The same shape in the other script, e.g. "か" -> "カ".
pub fn paired_glyph(glyph: &str) -> Option<&'static str> {
    if let Some(index) = index_of(ScriptVariant::Hiragana, glyph) {
        return label_at(ScriptVariant::Katakana, index);
    }
    index_of(ScriptVariant::Katakana, glyph).and_then(|i| label_at(ScriptVariant::Hiragana, i))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use wana_kana::{
        ConvertJapanese,
        IsJapaneseStr,
    };

    use super::*;

    #[test]
    fn test_tables_pair_the_same_kana() {
        for (hiragana, katakana) in HIRAGANA_LABELS.iter().zip(KATAKANA_LABELS.iter()) {
            assert!(hiragana.is_hiragana(), "{} is not hiragana", hiragana);
            assert!(katakana.is_katakana(), "{} is not katakana", katakana);
            assert_eq!(hiragana.to_katakana(), *katakana);
            assert_eq!(katakana.to_hiragana(), *hiragana);
        }
    }

    #[test]
    fn test_paired_glyph_round_trip() {
        for glyph in HIRAGANA_LABELS.iter().chain(KATAKANA_LABELS.iter()) {
            let pair = paired_glyph(glyph).unwrap();
            assert_ne!(pair, *glyph);
            assert_eq!(paired_glyph(pair), Some(*glyph));
        }
        assert_eq!(paired_glyph("を"), Some("ヲ"));
        assert_eq!(paired_glyph("ヂ"), Some("ぢ"));
        assert_eq!(paired_glyph("x"), None);
    }

    #[test]
    fn test_labels_are_unique() {
        for variant in ScriptVariant::ALL {
            let unique: HashSet<_> = labels_for(variant).iter().collect();
            assert_eq!(unique.len(), LABEL_COUNT);
        }
        assert_eq!(label_at(ScriptVariant::Katakana, 5), Some("カ"));
        assert_eq!(label_at(ScriptVariant::Hiragana, LABEL_COUNT), None);
    }
}
