use serde::{Deserialize, Serialize};

use super::subject::ScaledSubject;

/// Scoring configuration.
///
/// Maps raw item counts onto each subject's reference range. Every scaled
/// subject has its own field in [`ScaleTable`], so a config that forgets one
/// fails to parse instead of failing halfway through a run.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   items_per_subject: 45
///   scales:
///     linguagens: { min: 287.0, max: 820.8 }
///     natureza: { min: 289.9, max: 868.4 }
///     matematica: { min: 319.8, max: 958.6 }
///     humanas: { min: 314.4, max: 835.1 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Questions per subject (default: 45)
    #[serde(default = "default_items_per_subject")]
    pub items_per_subject: u32,

    #[serde(default)]
    pub scales: ScaleTable,
}

fn default_items_per_subject() -> u32 {
    45
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            items_per_subject: default_items_per_subject(),
            scales: ScaleTable::default(),
        }
    }
}

/// Lowest and highest reachable scaled score for one subject.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
}

impl ReferenceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// One reference range per scaled subject.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScaleTable {
    pub linguagens: ReferenceRange,
    pub natureza: ReferenceRange,
    pub matematica: ReferenceRange,
    pub humanas: ReferenceRange,
}

impl Default for ScaleTable {
    fn default() -> Self {
        Self {
            linguagens: ReferenceRange::new(287.0, 820.8),
            natureza: ReferenceRange::new(289.9, 868.4),
            matematica: ReferenceRange::new(319.8, 958.6),
            humanas: ReferenceRange::new(314.4, 835.1),
        }
    }
}

impl ScaleTable {
    pub fn get(&self, subject: ScaledSubject) -> ReferenceRange {
        match subject {
            ScaledSubject::Linguagens => self.linguagens,
            ScaledSubject::Natureza => self.natureza,
            ScaledSubject::Matematica => self.matematica,
            ScaledSubject::Humanas => self.humanas,
        }
    }
}
