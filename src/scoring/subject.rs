use std::fmt;

use serde::{Deserialize, Serialize};

/// The five areas that make up a student's overall result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Linguagens,
    Natureza,
    Matematica,
    Humanas,
    Redacao,
}

impl Subject {
    /// Report column order.
    pub const ALL: [Subject; 5] = [
        Subject::Linguagens,
        Subject::Natureza,
        Subject::Matematica,
        Subject::Humanas,
        Subject::Redacao,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Subject::Linguagens => "Linguagens",
            Subject::Natureza => "Natureza",
            Subject::Matematica => "Matemática",
            Subject::Humanas => "Humanas",
            Subject::Redacao => "Redação",
        }
    }

    /// `None` for the essay, which is read as a final score.
    pub fn scaled(self) -> Option<ScaledSubject> {
        match self {
            Subject::Linguagens => Some(ScaledSubject::Linguagens),
            Subject::Natureza => Some(ScaledSubject::Natureza),
            Subject::Matematica => Some(ScaledSubject::Matematica),
            Subject::Humanas => Some(ScaledSubject::Humanas),
            Subject::Redacao => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which of the two answer-sheet tables a subject's items live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSheet {
    First,
    Second,
}

/// Position of a subject's items inside its sheet: the first or the second
/// run of `items_per_subject` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemBlock {
    Leading,
    Trailing,
}

impl ItemBlock {
    /// Inclusive 1-based item indices covered by this block.
    pub fn item_range(self, items_per_subject: u32) -> (u32, u32) {
        match self {
            ItemBlock::Leading => (1, items_per_subject),
            ItemBlock::Trailing => (
                items_per_subject.saturating_add(1),
                items_per_subject.saturating_mul(2),
            ),
        }
    }
}

/// Subjects whose score is derived from item marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaledSubject {
    Linguagens,
    Natureza,
    Matematica,
    Humanas,
}

impl ScaledSubject {
    pub const ALL: [ScaledSubject; 4] = [
        ScaledSubject::Linguagens,
        ScaledSubject::Natureza,
        ScaledSubject::Matematica,
        ScaledSubject::Humanas,
    ];

    pub fn subject(self) -> Subject {
        match self {
            ScaledSubject::Linguagens => Subject::Linguagens,
            ScaledSubject::Natureza => Subject::Natureza,
            ScaledSubject::Matematica => Subject::Matematica,
            ScaledSubject::Humanas => Subject::Humanas,
        }
    }

    /// Linguagens and Natureza share the first sheet, Matemática and Humanas
    /// the second; the first-named subject of each pair owns the leading items.
    pub fn location(self) -> (AnswerSheet, ItemBlock) {
        match self {
            ScaledSubject::Linguagens => (AnswerSheet::First, ItemBlock::Leading),
            ScaledSubject::Natureza => (AnswerSheet::First, ItemBlock::Trailing),
            ScaledSubject::Matematica => (AnswerSheet::Second, ItemBlock::Leading),
            ScaledSubject::Humanas => (AnswerSheet::Second, ItemBlock::Trailing),
        }
    }
}

impl fmt::Display for ScaledSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.subject().fmt(f)
    }
}
