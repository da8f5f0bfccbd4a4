//! Round trips between the edit form and the storage form of a text, run
//! over a corpus of bodies rather than one-off cases.

use pretty_assertions::assert_eq;
use textdesk::model::text::{Category, EditBuffer, TextRecord};
use textdesk::ops::query::{TextFilter, filter_texts};
use textdesk::ops::transform::{Segment, display_lines, encode, format_for_display, raw_display};

/// Bodies as an author would type them (no markers)
const EDIT_CORPUS: &[&str] = &[
    "",
    "una linea",
    "dos\nlineas",
    "parrafo\n\nseparado",
    "\nempieza con salto",
    "termina con salto\n",
    "  sangria  \n  conservada en edicion  ",
    "acentos: áéíóú ñ\nemoji: 🙂",
    "\n\n\n",
    "windows\r\nline endings",
];

#[test]
fn encoded_bodies_never_contain_newlines() {
    for body in EDIT_CORPUS {
        let stored = encode(body);
        assert!(!stored.contains('\n'), "{:?} -> {:?}", body, stored);
        assert_eq!(
            stored.matches('|').count(),
            body.matches('\n').count(),
            "one marker per newline for {:?}",
            body
        );
    }
}

#[test]
fn raw_display_is_identity_on_storage_form() {
    for body in EDIT_CORPUS {
        let stored = encode(body);
        assert_eq!(raw_display(&stored), stored);
    }
}

/// Reverse of the display layout: text lines back to text, each empty line
/// back to a newline. Equal to the original up to trimming of each line.
fn lines_to_edit_form(lines: &[String]) -> String {
    let mut out = String::new();
    for line in lines {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(line);
        }
    }
    out
}

fn trim_lines(body: &str) -> String {
    body.replace('\r', "")
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn display_reverses_encode_up_to_trimming() {
    for body in EDIT_CORPUS {
        let lines = display_lines(&format_for_display(&encode(body)));
        assert_eq!(
            lines_to_edit_form(&lines),
            trim_lines(body),
            "round trip of {:?}",
            body
        );
    }
}

#[test]
fn line_breaks_match_marker_count() {
    for body in EDIT_CORPUS {
        let stored = encode(body);
        let breaks = format_for_display(&stored)
            .iter()
            .filter(|s| **s == Segment::LineBreak)
            .count();
        assert_eq!(breaks, stored.matches('|').count(), "{:?}", stored);
    }
}

#[test]
fn edit_buffer_seeded_from_record_submits_storage_form_unchanged() {
    for body in EDIT_CORPUS {
        let record = TextRecord {
            id: 1,
            body: encode(body),
            category: Category::General,
            created_at: String::new(),
            modified_at: String::new(),
        };
        let input = EditBuffer::from_record(&record).to_input();
        assert_eq!(input.text, record.body);
        assert_eq!(input.text_type, Category::General);
    }
}

#[test]
fn pre_existing_markers_read_back_as_line_breaks() {
    // "a|b" typed literally and "a\nb" store identically
    assert_eq!(encode("a|b"), encode("a\nb"));
    assert_eq!(
        format_for_display(&encode("precio: 3|4")),
        vec![
            Segment::Text("precio: 3".into()),
            Segment::LineBreak,
            Segment::Text("4".into()),
        ]
    );
}

fn corpus_records() -> Vec<TextRecord> {
    EDIT_CORPUS
        .iter()
        .enumerate()
        .map(|(i, body)| TextRecord {
            id: i as i64 + 1,
            body: encode(body),
            category: Category::ALL[i % Category::ALL.len()],
            created_at: String::new(),
            modified_at: String::new(),
        })
        .collect()
}

#[test]
fn filtering_preserves_input_order_for_every_query() {
    let records = corpus_records();
    let queries = ["", "a", "LINEA", "salto", "ñ", "|", "zzz"];
    for query in queries {
        for category in std::iter::once(None).chain(Category::ALL.iter().copied().map(Some)) {
            let ids: Vec<i64> = filter_texts(&records, query, category)
                .iter()
                .map(|r| r.id)
                .collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            assert_eq!(ids, sorted, "query {:?} category {:?}", query, category);

            // The struct form and the free function agree
            let via_filter: Vec<i64> = TextFilter::new(query, category)
                .apply(&records)
                .iter()
                .map(|r| r.id)
                .collect();
            assert_eq!(via_filter, ids);
        }
    }
}

#[test]
fn empty_query_without_category_is_identity() {
    let records = corpus_records();
    let all: Vec<&TextRecord> = records.iter().collect();
    assert_eq!(filter_texts(&records, "", None), all);
}
