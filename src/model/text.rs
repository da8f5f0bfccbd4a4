use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ops::transform;

/// Content category attached to every text.
///
/// Serialized as the integer code the remote API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Category {
    Tutorial,
    TermsAndConditions,
    Questionnaire,
    AboutUs,
    Diary,
    Agenda,
    Settings,
    Specialist,
    General,
}

impl Category {
    /// Every category, in code order
    pub const ALL: [Category; 9] = [
        Category::Tutorial,
        Category::TermsAndConditions,
        Category::Questionnaire,
        Category::AboutUs,
        Category::Diary,
        Category::Agenda,
        Category::Settings,
        Category::Specialist,
        Category::General,
    ];

    /// Integer code on the wire
    pub fn code(self) -> u8 {
        match self {
            Category::Tutorial => 0,
            Category::TermsAndConditions => 1,
            Category::Questionnaire => 2,
            Category::AboutUs => 3,
            Category::Diary => 4,
            Category::Agenda => 5,
            Category::Settings => 6,
            Category::Specialist => 7,
            Category::General => 8,
        }
    }

    pub fn from_code(code: u8) -> Option<Category> {
        match code {
            0 => Some(Category::Tutorial),
            1 => Some(Category::TermsAndConditions),
            2 => Some(Category::Questionnaire),
            3 => Some(Category::AboutUs),
            4 => Some(Category::Diary),
            5 => Some(Category::Agenda),
            6 => Some(Category::Settings),
            7 => Some(Category::Specialist),
            8 => Some(Category::General),
            _ => None,
        }
    }

    /// Display label shown to editors
    pub fn label(self) -> &'static str {
        match self {
            Category::Tutorial => "Tutorial",
            Category::TermsAndConditions => "Términos y Condiciones",
            Category::Questionnaire => "Cuestionarios",
            Category::AboutUs => "Sobre Nosotros",
            Category::Diary => "Diario",
            Category::Agenda => "Agenda",
            Category::Settings => "Configuración",
            Category::Specialist => "Especialista",
            Category::General => "General",
        }
    }

    /// Stable kebab-case name used on the command line and in JSON output
    pub fn slug(self) -> &'static str {
        match self {
            Category::Tutorial => "tutorial",
            Category::TermsAndConditions => "terms-and-conditions",
            Category::Questionnaire => "questionnaire",
            Category::AboutUs => "about-us",
            Category::Diary => "diary",
            Category::Agenda => "agenda",
            Category::Settings => "settings",
            Category::Specialist => "specialist",
            Category::General => "general",
        }
    }

    /// Next category in code order, wrapping around
    pub fn next(self) -> Category {
        let idx = self.code() as usize;
        Category::ALL[(idx + 1) % Category::ALL.len()]
    }

    /// Previous category in code order, wrapping around
    pub fn prev(self) -> Category {
        let idx = self.code() as usize;
        Category::ALL[(idx + Category::ALL.len() - 1) % Category::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}' (expected one of: {slugs})", slugs = category_slugs())]
pub struct UnknownCategory(pub String);

fn category_slugs() -> String {
    Category::ALL
        .iter()
        .map(|c| c.slug())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts a slug (case-insensitive) or the integer code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Category::from_code(code).ok_or_else(|| UnknownCategory(s.to_string()));
        }
        let lower = trimmed.to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == lower)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<u8> for Category {
    type Error = UnknownCategory;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Category::from_code(code).ok_or_else(|| UnknownCategory(code.to_string()))
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> u8 {
        category.code()
    }
}

/// A text record as served by the remote store.
///
/// `body` is always in storage form: line breaks are `|` markers and it
/// never holds a raw newline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    #[serde(rename = "textId")]
    pub id: i64,
    #[serde(rename = "text")]
    pub body: String,
    #[serde(rename = "textType")]
    pub category: Category,
    #[serde(rename = "dateCreated", default)]
    pub created_at: String,
    #[serde(rename = "modifiedDate", default)]
    pub modified_at: String,
}

/// Create/update payload. `text` is in storage form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    pub text: String,
    #[serde(rename = "textType")]
    pub text_type: Category,
}

/// Client-side buffer behind the create and edit forms.
///
/// The body uses real line breaks; it is encoded only when turned into a
/// [`TextInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub body: String,
    pub category: Category,
}

impl Default for EditBuffer {
    fn default() -> Self {
        EditBuffer {
            body: String::new(),
            category: Category::Tutorial,
        }
    }
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(category: Category) -> Self {
        EditBuffer {
            body: String::new(),
            category,
        }
    }

    /// Seed a buffer from a stored record. The body is copied as stored,
    /// markers included.
    pub fn from_record(record: &TextRecord) -> Self {
        EditBuffer {
            body: record.body.clone(),
            category: record.category,
        }
    }

    /// True when there is nothing but whitespace to submit
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Encode the body into the payload sent to the store
    pub fn to_input(&self) -> TextInput {
        TextInput {
            text: transform::encode(&self.body),
            text_type: self.category,
        }
    }
}
