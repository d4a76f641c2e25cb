pub mod aggregate;
pub mod config;
pub mod engine;
pub mod scaler;
pub mod subject;
pub mod validation;

pub use aggregate::{aggregate, ItemColumns};
pub use config::*;
pub use engine::{ResultSet, ScoreCalculator, StudentRecord, SubjectScores};
pub use scaler::scale;
pub use subject::{AnswerSheet, ItemBlock, ScaledSubject, Subject};
pub use validation::validate_scoring;
