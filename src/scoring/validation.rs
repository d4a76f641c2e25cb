use super::config::ScoringConfig;
use super::subject::ScaledSubject;

/// A sheet holds at most 16384 columns: the name plus two item blocks.
pub const MAX_ITEMS_PER_SUBJECT: u32 = 8191;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// `items_per_subject == 0` is left alone here: it is reported by the scaler
/// as a division error when the first subject is scored.
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for subject in ScaledSubject::ALL {
        let range = config.scales.get(subject);
        let key = format!("scoring.scales.{}", field_name(subject));

        if !range.min.is_finite() || !range.max.is_finite() {
            errors.push(format!("{}: min and max must be finite numbers", key));
        } else if range.min > range.max {
            errors.push(format!(
                "{}: min ({}) must not exceed max ({})",
                key, range.min, range.max
            ));
        }
    }

    if config.items_per_subject > MAX_ITEMS_PER_SUBJECT {
        errors.push(format!(
            "scoring.items_per_subject: {} exceeds the spreadsheet limit of {}",
            config.items_per_subject, MAX_ITEMS_PER_SUBJECT
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn field_name(subject: ScaledSubject) -> &'static str {
    match subject {
        ScaledSubject::Linguagens => "linguagens",
        ScaledSubject::Natureza => "natureza",
        ScaledSubject::Matematica => "matematica",
        ScaledSubject::Humanas => "humanas",
    }
}
