use std::collections::BTreeMap;

use serde::Deserialize;

/// A single `msgid` occurrence as the external compiler records it against
/// one source file. `line_no` accepts either a single number or an array,
/// per `spec.md` §4.I ("single line numbers and arrays are both accepted").
#[derive(Debug, Clone, Deserialize)]
pub struct RawTranslationHit {
    pub msgid: String,
    #[serde(default)]
    pub msgid_plural: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub line_no: LineNumbers,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LineNumbers {
    Single(u32),
    Multiple(Vec<u32>),
}

impl LineNumbers {
    fn into_vec(self) -> Vec<u32> {
        match self {
            LineNumbers::Single(line) => vec![line],
            LineNumbers::Multiple(lines) => lines,
        }
    }
}

/// One class's raw `translations[]` entries, as the external compiler
/// reports them for a single source file.
#[derive(Debug, Clone)]
pub struct ClassTranslations {
    /// The class's dotted name, e.g. `"myapp.Application"`; turned into
    /// `<class-path>.js` for the reference key.
    pub class_name: String,
    pub hits: Vec<RawTranslationHit>,
}

/// A merged translation-file entry: one `msgid`, its plural form and
/// comment (first write wins), and every source file/line it was seen at
/// (`spec.md` §4.I: `entry.comments.reference[file] = [lineNo…]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationEntry {
    pub msgid_plural: Option<String>,
    pub comment: Option<String>,
    pub reference: BTreeMap<String, Vec<u32>>,
}

impl TranslationEntry {
    fn record_hit(&mut self, class_name: &str, hit: &RawTranslationHit) {
        if self.msgid_plural.is_none() {
            self.msgid_plural = hit.msgid_plural.clone();
        }
        if self.comment.is_none() {
            self.comment = hit.comment.clone();
        }

        let file = format!("{class_name}.js");
        let lines = self.reference.entry(file).or_default();
        for line in hit.line_no.clone().into_vec() {
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
        lines.sort_unstable();
    }
}

/// Builds the merged `msgid → entry` table for one locale's translation
/// file (`spec.md` §4.I `updateTranslations`): every known class's
/// `translations[]` entries are folded in, accumulating source-file
/// references with line-number de-duplication.
///
/// The caller is responsible for reading the existing translation file
/// before calling this (to seed a non-empty starting table) and writing
/// the result back through the external [`crate::translation::Translation`]
/// object afterward — both are I/O the external compiler/translation
/// object own, not this function.
pub fn update_translations(
    classes: &[ClassTranslations],
    existing: BTreeMap<String, TranslationEntry>,
) -> BTreeMap<String, TranslationEntry> {
    let mut table = existing;

    for class in classes {
        for hit in &class.hits {
            table.entry(hit.msgid.clone()).or_default().record_hit(&class.class_name, hit);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_array_line_numbers_both_accumulate_deduplicated() {
        let classes = vec![ClassTranslations {
            class_name: "myapp.Application".to_string(),
            hits: vec![
                RawTranslationHit {
                    msgid: "Hello".to_string(),
                    msgid_plural: None,
                    comment: None,
                    line_no: LineNumbers::Single(10),
                },
                RawTranslationHit {
                    msgid: "Hello".to_string(),
                    msgid_plural: None,
                    comment: None,
                    line_no: LineNumbers::Multiple(vec![10, 20]),
                },
            ],
        }];

        let table = update_translations(&classes, BTreeMap::new());
        let entry = table.get("Hello").unwrap();

        assert_eq!(entry.reference.get("myapp.Application.js").unwrap(), &vec![10, 20]);
    }

    #[test]
    fn hits_from_two_classes_accumulate_separate_references() {
        let classes = vec![
            ClassTranslations {
                class_name: "myapp.A".to_string(),
                hits: vec![RawTranslationHit {
                    msgid: "Shared".to_string(),
                    msgid_plural: None,
                    comment: Some("from A".to_string()),
                    line_no: LineNumbers::Single(1),
                }],
            },
            ClassTranslations {
                class_name: "myapp.B".to_string(),
                hits: vec![RawTranslationHit {
                    msgid: "Shared".to_string(),
                    msgid_plural: None,
                    comment: Some("from B".to_string()),
                    line_no: LineNumbers::Single(2),
                }],
            },
        ];

        let table = update_translations(&classes, BTreeMap::new());
        let entry = table.get("Shared").unwrap();

        assert_eq!(entry.comment.as_deref(), Some("from A"));
        assert_eq!(entry.reference.len(), 2);
        assert_eq!(entry.reference.get("myapp.A.js").unwrap(), &vec![1]);
        assert_eq!(entry.reference.get("myapp.B.js").unwrap(), &vec![2]);
    }

    #[test]
    fn existing_table_is_preserved_and_extended() {
        let mut existing = BTreeMap::new();
        let mut seed = TranslationEntry::default();
        seed.reference.insert("myapp.A.js".to_string(), vec![5]);
        existing.insert("Old".to_string(), seed);

        let table = update_translations(&[], existing);

        assert!(table.contains_key("Old"));
    }
}
