use std::collections::HashMap;

use crate::core::{
    CharacterSpec,
    ScriptVariant,
};

struct KanaEntry {
    hiragana: &'static str,
    katakana: &'static str,
    key: &'static str,
    romaji: &'static str,
    row: &'static str,
    hiragana_strokes: u32,
    katakana_strokes: u32,
    voiced_from: Option<&'static str>, // key of the unvoiced kana for dakuten/handakuten forms
}

const fn kana(
    hiragana: &'static str,
    katakana: &'static str,
    key: &'static str,
    romaji: &'static str,
    row: &'static str,
    hiragana_strokes: u32,
    katakana_strokes: u32,
) -> KanaEntry {
    KanaEntry {
        hiragana,
        katakana,
        key,
        romaji,
        row,
        hiragana_strokes,
        katakana_strokes,
        voiced_from: None,
    }
}

const fn voiced(base: KanaEntry, voiced_from: &'static str) -> KanaEntry {
    KanaEntry { voiced_from: Some(voiced_from), ..base }
}

#[rustfmt::skip]
const KANA_TABLE: [KanaEntry; 71] = [
    kana("あ", "ア", "a", "a", "a", 3, 2),
    kana("い", "イ", "i", "i", "a", 2, 2),
    kana("う", "ウ", "u", "u", "a", 2, 3),
    kana("え", "エ", "e", "e", "a", 2, 3),
    kana("お", "オ", "o", "o", "a", 3, 3),
    kana("か", "カ", "ka", "ka", "ka", 3, 2),
    kana("き", "キ", "ki", "ki", "ka", 4, 3),
    kana("く", "ク", "ku", "ku", "ka", 1, 2),
    kana("け", "ケ", "ke", "ke", "ka", 3, 3),
    kana("こ", "コ", "ko", "ko", "ka", 2, 2),
    kana("さ", "サ", "sa", "sa", "sa", 3, 3),
    kana("し", "シ", "shi", "shi", "sa", 1, 3),
    kana("す", "ス", "su", "su", "sa", 2, 2),
    kana("せ", "セ", "se", "se", "sa", 3, 2),
    kana("そ", "ソ", "so", "so", "sa", 1, 2),
    kana("た", "タ", "ta", "ta", "ta", 4, 3),
    kana("ち", "チ", "chi", "chi", "ta", 2, 3),
    kana("つ", "ツ", "tsu", "tsu", "ta", 1, 3),
    kana("て", "テ", "te", "te", "ta", 1, 3),
    kana("と", "ト", "to", "to", "ta", 2, 2),
    kana("な", "ナ", "na", "na", "na", 4, 2),
    kana("に", "ニ", "ni", "ni", "na", 3, 2),
    kana("ぬ", "ヌ", "nu", "nu", "na", 2, 2),
    kana("ね", "ネ", "ne", "ne", "na", 2, 4),
    kana("の", "ノ", "no", "no", "na", 1, 1),
    kana("は", "ハ", "ha", "ha", "ha", 3, 2),
    kana("ひ", "ヒ", "hi", "hi", "ha", 1, 2),
    kana("ふ", "フ", "fu", "fu", "ha", 4, 1),
    kana("へ", "ヘ", "he", "he", "ha", 1, 1),
    kana("ほ", "ホ", "ho", "ho", "ha", 4, 4),
    kana("ま", "マ", "ma", "ma", "ma", 3, 2),
    kana("み", "ミ", "mi", "mi", "ma", 2, 3),
    kana("む", "ム", "mu", "mu", "ma", 3, 2),
    kana("め", "メ", "me", "me", "ma", 2, 2),
    kana("も", "モ", "mo", "mo", "ma", 3, 3),
    kana("や", "ヤ", "ya", "ya", "ya", 3, 2),
    kana("ゆ", "ユ", "yu", "yu", "ya", 2, 2),
    kana("よ", "ヨ", "yo", "yo", "ya", 2, 3),
    kana("ら", "ラ", "ra", "ra", "ra", 2, 2),
    kana("り", "リ", "ri", "ri", "ra", 2, 2),
    kana("る", "ル", "ru", "ru", "ra", 1, 2),
    kana("れ", "レ", "re", "re", "ra", 2, 1),
    kana("ろ", "ロ", "ro", "ro", "ra", 1, 3),
    kana("わ", "ワ", "wa", "wa", "wa", 2, 2),
    kana("を", "ヲ", "wo", "wo", "wa", 3, 3),
    kana("ん", "ン", "n", "n", "wa", 1, 2),
    voiced(kana("が", "ガ", "ga", "ga", "ga", 5, 4), "ka"),
    voiced(kana("ぎ", "ギ", "gi", "gi", "ga", 6, 5), "ki"),
    voiced(kana("ぐ", "グ", "gu", "gu", "ga", 3, 4), "ku"),
    voiced(kana("げ", "ゲ", "ge", "ge", "ga", 5, 5), "ke"),
    voiced(kana("ご", "ゴ", "go", "go", "ga", 4, 4), "ko"),
    voiced(kana("ざ", "ザ", "za", "za", "za", 5, 5), "sa"),
    voiced(kana("じ", "ジ", "ji", "ji", "za", 3, 5), "shi"),
    voiced(kana("ず", "ズ", "zu", "zu", "za", 4, 4), "su"),
    voiced(kana("ぜ", "ゼ", "ze", "ze", "za", 5, 4), "se"),
    voiced(kana("ぞ", "ゾ", "zo", "zo", "za", 3, 4), "so"),
    voiced(kana("だ", "ダ", "da", "da", "da", 6, 5), "ta"),
    voiced(kana("ぢ", "ヂ", "di", "ji", "da", 4, 5), "chi"),
    voiced(kana("づ", "ヅ", "du", "zu", "da", 3, 5), "tsu"),
    voiced(kana("で", "デ", "de", "de", "da", 3, 5), "te"),
    voiced(kana("ど", "ド", "do", "do", "da", 4, 4), "to"),
    voiced(kana("ば", "バ", "ba", "ba", "ba", 5, 4), "ha"),
    voiced(kana("び", "ビ", "bi", "bi", "ba", 3, 4), "hi"),
    voiced(kana("ぶ", "ブ", "bu", "bu", "ba", 6, 3), "fu"),
    voiced(kana("べ", "ベ", "be", "be", "ba", 3, 3), "he"),
    voiced(kana("ぼ", "ボ", "bo", "bo", "ba", 6, 6), "ho"),
    voiced(kana("ぱ", "パ", "pa", "pa", "pa", 4, 3), "ha"),
    voiced(kana("ぴ", "ピ", "pi", "pi", "pa", 2, 3), "hi"),
    voiced(kana("ぷ", "プ", "pu", "pu", "pa", 5, 2), "fu"),
    voiced(kana("ぺ", "ペ", "pe", "pe", "pa", 2, 2), "he"),
    voiced(kana("ぽ", "ポ", "po", "po", "pa", 5, 5), "ho"),
];

pub fn character_id(variant: ScriptVariant, key: &str) -> String {
    format!("{}-{}", variant.as_str(), key)
}

/// Every kana the learner can study, in both scripts. Built once at startup.
#[derive(Debug, Clone)]
pub struct KanaCatalog {
    entries: Vec<CharacterSpec>,
    by_id: HashMap<String, usize>,
    by_glyph: HashMap<String, usize>,
    voiced_from: HashMap<String, String>, // voiced id -> unvoiced id
}

impl KanaCatalog {
    pub fn standard() -> Self {
        let mut entries = Vec::with_capacity(KANA_TABLE.len() * 2);
        let mut voiced_from = HashMap::new();

        for variant in ScriptVariant::ALL {
            for entry in KANA_TABLE.iter() {
                let (glyph, stroke_count) = match variant {
                    ScriptVariant::Hiragana => (entry.hiragana, entry.hiragana_strokes),
                    ScriptVariant::Katakana => (entry.katakana, entry.katakana_strokes),
                };
                let id = character_id(variant, entry.key);

                if let Some(base_key) = entry.voiced_from {
                    voiced_from.insert(id.clone(), character_id(variant, base_key));
                }

                entries.push(CharacterSpec {
                    id,
                    glyph: glyph.to_string(),
                    variant,
                    romaji: entry.romaji.to_string(),
                    row: entry.row.to_string(),
                    stroke_count,
                });
            }
        }

        let by_id = entries.iter().enumerate().map(|(i, spec)| (spec.id.clone(), i)).collect();
        let by_glyph = entries.iter().enumerate().map(|(i, spec)| (spec.glyph.clone(), i)).collect();

        Self { entries, by_id, by_glyph, voiced_from }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> &[CharacterSpec] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CharacterSpec> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn by_glyph(&self, glyph: &str) -> Option<&CharacterSpec> {
        self.by_glyph.get(glyph).map(|&i| &self.entries[i])
    }

    pub fn variant(&self, variant: ScriptVariant) -> impl Iterator<Item = &CharacterSpec> {
        self.entries.iter().filter(move |spec| spec.variant == variant)
    }

    pub fn row<'a>(
        &'a self,
        variant: ScriptVariant,
        row: &'a str,
    ) -> impl Iterator<Item = &'a CharacterSpec> {
        self.variant(variant).filter(move |spec| spec.row == row)
    }

    /// Row names in teaching order, without duplicates.
    pub fn rows(&self) -> Vec<&str> {
        let mut rows: Vec<&str> = Vec::new();
        for entry in KANA_TABLE.iter() {
            if !rows.contains(&entry.row) {
                rows.push(entry.row);
            }
        }
        rows
    }

    /// The unvoiced kana a dakuten/handakuten form is written from, e.g. が -> か.
    pub fn unvoiced(&self, spec: &CharacterSpec) -> Option<&CharacterSpec> {
        self.voiced_from.get(&spec.id).and_then(|id| self.get(id))
    }
}

impl Default for KanaCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
