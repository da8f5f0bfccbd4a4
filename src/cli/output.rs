use serde::Serialize;

use crate::model::text::{Category, TextRecord};
use crate::ops::card::{format_date, truncate_preview};
use crate::ops::transform::{display_lines, format_for_display, raw_display};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TextJson {
    pub id: i64,
    pub category: &'static str,
    pub category_code: u8,
    pub label: &'static str,
    /// Storage form, markers included
    pub body: String,
    pub created_at: String,
    pub modified_at: String,
}

#[derive(Serialize)]
pub struct TextDetailJson {
    #[serde(flatten)]
    pub text: TextJson,
    /// Formatted lines; empty strings are line breaks
    pub lines: Vec<String>,
}

#[derive(Serialize)]
pub struct CategoryJson {
    pub code: u8,
    pub slug: &'static str,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Serialize)]
pub struct DeletedJson {
    pub deleted: Vec<i64>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn text_to_json(record: &TextRecord) -> TextJson {
    TextJson {
        id: record.id,
        category: record.category.slug(),
        category_code: record.category.code(),
        label: record.category.label(),
        body: record.body.clone(),
        created_at: record.created_at.clone(),
        modified_at: record.modified_at.clone(),
    }
}

pub fn text_to_detail_json(record: &TextRecord) -> TextDetailJson {
    TextDetailJson {
        text: text_to_json(record),
        lines: display_lines(&format_for_display(&record.body)),
    }
}

pub fn category_to_json(category: Category, count: usize) -> CategoryJson {
    CategoryJson {
        code: category.code(),
        slug: category.slug(),
        label: category.label(),
        count,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a text as a list card: header, truncated body, dates
pub fn format_text_card(record: &TextRecord) -> Vec<String> {
    vec![
        format!("#{} {}", record.id, record.category.label()),
        format!("  {}", truncate_preview(&record.body)),
        format!("  {}", format_dates(record)),
    ]
}

fn format_dates(record: &TextRecord) -> String {
    format!(
        "created {}  modified {}",
        format_date(&record.created_at),
        format_date(&record.modified_at)
    )
}

/// Format the full view of a text. `raw` prints the stored form as is;
/// otherwise the body is laid out from its line-break markers.
pub fn format_text_detail(record: &TextRecord, raw: bool) -> Vec<String> {
    let mut lines = vec![
        format!(
            "#{} [{}] {}",
            record.id,
            record.category.slug(),
            record.category.label()
        ),
        format_dates(record),
        String::new(),
    ];
    if raw {
        lines.push(raw_display(&record.body).to_string());
    } else {
        lines.extend(display_lines(&format_for_display(&record.body)));
    }
    lines
}

/// Format one row of the category table
pub fn format_category_line(category: Category, count: usize) -> String {
    format!(
        "{:>2}  {:<22} {:<24} {}",
        category.code(),
        category.slug(),
        category.label(),
        count
    )
}
