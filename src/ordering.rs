use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::scoring::ResultSet;

/// How the report rows are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum OrderMode {
    #[serde(rename = "name-asc")]
    #[value(name = "name-asc")]
    ByNameAsc,
    #[serde(rename = "name-desc")]
    #[value(name = "name-desc")]
    ByNameDesc,
    #[serde(rename = "mean-asc")]
    #[value(name = "mean-asc")]
    ByMeanAsc,
    #[serde(rename = "mean-desc")]
    #[value(name = "mean-desc")]
    ByMeanDesc,
}

impl OrderMode {
    pub const ALL: [OrderMode; 4] = [
        OrderMode::ByNameAsc,
        OrderMode::ByNameDesc,
        OrderMode::ByMeanAsc,
        OrderMode::ByMeanDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderMode::ByNameAsc => "name-asc",
            OrderMode::ByNameDesc => "name-desc",
            OrderMode::ByMeanAsc => "mean-asc",
            OrderMode::ByMeanDesc => "mean-desc",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderMode {
    type Err = ReportError;

    /// Unknown modes are rejected rather than treated as "leave as is".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OrderMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let accepted: Vec<&str> = OrderMode::ALL.iter().map(|m| m.as_str()).collect();
                ReportError::invalid_config(format!(
                    "unknown order mode '{}' (expected one of: {})",
                    s,
                    accepted.join(", ")
                ))
            })
    }
}

/// Stable sort of the result set by name or mean.
///
/// Ties keep their incoming (sheet) order in both directions.
pub fn order(mut result_set: ResultSet, mode: OrderMode) -> ResultSet {
    let records = result_set.records_mut();
    match mode {
        OrderMode::ByNameAsc => records.sort_by(|a, b| a.name.cmp(&b.name)),
        OrderMode::ByNameDesc => records.sort_by(|a, b| b.name.cmp(&a.name)),
        OrderMode::ByMeanAsc => records.sort_by(|a, b| a.mean.total_cmp(&b.mean)),
        OrderMode::ByMeanDesc => records.sort_by(|a, b| b.mean.total_cmp(&a.mean)),
    }
    result_set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{StudentRecord, SubjectScores};

    fn record(name: &str, mean: f64) -> StudentRecord {
        StudentRecord {
            name: name.to_string(),
            scores: SubjectScores {
                linguagens: mean,
                natureza: mean,
                matematica: mean,
                humanas: mean,
                redacao: mean,
            },
            mean,
        }
    }

    fn sample() -> ResultSet {
        ResultSet::new(vec![
            record("Carla", 500.0),
            record("Ana", 650.0),
            record("Bruno", 500.0),
            record("Davi", 420.5),
        ])
    }

    fn names(set: &ResultSet) -> Vec<&str> {
        set.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_by_name_asc() {
        let ordered = order(sample(), OrderMode::ByNameAsc);
        assert_eq!(names(&ordered), vec!["Ana", "Bruno", "Carla", "Davi"]);
    }

    #[test]
    fn test_by_name_asc_keeps_input_order_for_equal_names() {
        let input = ResultSet::new(vec![
            record("Bruno", 300.0),
            record("Ana", 700.0),
            record("Bruno", 900.0),
            record("Ana", 100.0),
        ]);
        let ordered = order(input, OrderMode::ByNameAsc);
        let pairs: Vec<(&str, f64)> = ordered.iter().map(|r| (r.name.as_str(), r.mean)).collect();
        assert_eq!(
            pairs,
            vec![("Ana", 700.0), ("Ana", 100.0), ("Bruno", 300.0), ("Bruno", 900.0)]
        );
    }

    #[test]
    fn test_by_name_desc() {
        let ordered = order(sample(), OrderMode::ByNameDesc);
        assert_eq!(names(&ordered), vec!["Davi", "Carla", "Bruno", "Ana"]);
    }

    #[test]
    fn test_by_mean_desc_is_non_increasing_and_stable() {
        let ordered = order(sample(), OrderMode::ByMeanDesc);
        let means: Vec<f64> = ordered.iter().map(|r| r.mean).collect();
        assert!(means.windows(2).all(|w| w[0] >= w[1]));
        // Carla precedes Bruno in the input and they tie on 500.0
        assert_eq!(names(&ordered), vec!["Ana", "Carla", "Bruno", "Davi"]);
    }

    #[test]
    fn test_by_mean_asc_is_stable() {
        let ordered = order(sample(), OrderMode::ByMeanAsc);
        assert_eq!(names(&ordered), vec!["Davi", "Carla", "Bruno", "Ana"]);
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("name-asc".parse::<OrderMode>().unwrap(), OrderMode::ByNameAsc);
        assert_eq!("MEAN-DESC".parse::<OrderMode>().unwrap(), OrderMode::ByMeanDesc);
        for mode in OrderMode::ALL {
            assert_eq!(mode.to_string().parse::<OrderMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_mode_is_invalid_config() {
        let err = "by-score".parse::<OrderMode>().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidConfig);
        assert!(err.to_string().contains("by-score"));
    }

    #[test]
    fn test_order_mode_yaml() {
        let mode: OrderMode = serde_saphyr::from_str("mean-desc").unwrap();
        assert_eq!(mode, OrderMode::ByMeanDesc);
        let bad: Result<OrderMode, _> = serde_saphyr::from_str("sideways");
        assert!(bad.is_err());
    }

    #[test]
    fn test_empty_set() {
        let ordered = order(ResultSet::new(vec![]), OrderMode::ByMeanDesc);
        assert!(ordered.is_empty());
    }
}
