use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a course for conflict weighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseType {
    Required,
    #[default]
    Elective,
    /// Used when a course has no classification entry at all
    Unknown,
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CourseType::Required => "Required",
            CourseType::Elective => "Elective",
            CourseType::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}
