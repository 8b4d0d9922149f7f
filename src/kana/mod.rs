pub mod catalog;
pub mod labels;

pub use catalog::{
    character_id,
    KanaCatalog,
};
pub use labels::{
    label_at,
    labels_for,
    paired_glyph,
    HIRAGANA_LABELS,
    KATAKANA_LABELS,
    LABEL_COUNT,
};
