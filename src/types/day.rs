use serde::{Deserialize, Serialize};
use std::fmt;

/// Days of the week in the canonical Monday..Sunday ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// The full week in canonical order
pub const WEEK: [Day; 7] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
    Day::Sunday,
];

impl Day {
    /// Parse a single day token, case-sensitive ("Monday", not "monday")
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Monday" => Some(Day::Monday),
            "Tuesday" => Some(Day::Tuesday),
            "Wednesday" => Some(Day::Wednesday),
            "Thursday" => Some(Day::Thursday),
            "Friday" => Some(Day::Friday),
            "Saturday" => Some(Day::Saturday),
            "Sunday" => Some(Day::Sunday),
            _ => None,
        }
    }

    /// Parse the day from a slot label like "Monday 9am-10am".
    ///
    /// Only the leading whitespace-delimited token is considered.
    pub fn from_label(label: &str) -> Option<Self> {
        label.split_whitespace().next().and_then(Self::parse)
    }

    /// Position in the canonical week ordering (Monday = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next calendar day, or None after Sunday
    pub fn succ(self) -> Option<Self> {
        WEEK.get(self.index() + 1).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// All adjacent (d, d+1) pairs in the canonical ordering
    pub fn consecutive_pairs() -> impl Iterator<Item = (Day, Day)> {
        WEEK.windows(2).map(|w| (w[0], w[1]))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_leading_token_only() {
        assert_eq!(Day::from_label("Monday 9am-10am"), Some(Day::Monday));
        assert_eq!(Day::from_label("Friday 14:00-15:00"), Some(Day::Friday));
        assert_eq!(Day::from_label("Someday 9am-10am"), None);
        assert_eq!(Day::from_label(""), None);
    }

    #[test]
    fn week_ordering_is_monotonic() {
        for w in WEEK.windows(2) {
            assert!(w[0] < w[1]);
            assert_eq!(w[0].succ(), Some(w[1]));
        }
        assert_eq!(Day::Sunday.succ(), None);
    }

    #[test]
    fn six_consecutive_pairs() {
        let pairs: Vec<_> = Day::consecutive_pairs().collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], (Day::Monday, Day::Tuesday));
        assert_eq!(pairs[5], (Day::Saturday, Day::Sunday));
    }

    proptest! {
        #[test]
        fn label_parse_ignores_time_suffix(day in prop::sample::select(WEEK.to_vec()), suffix in "[ -~]{0,20}") {
            let label = format!("{} {}", day, suffix);
            prop_assert_eq!(Day::from_label(&label), Some(day));
        }
    }
}
