/// Urgency tag on a work order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    None,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
            Priority::None => "NONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HIGH" => Some(Priority::High),
            "MEDIUM" => Some(Priority::Medium),
            "LOW" => Some(Priority::Low),
            "NONE" => Some(Priority::None),
            _ => None,
        }
    }

    /// Whole days between "now" and the due date
    pub fn offset_days(&self) -> i64 {
        match self {
            Priority::High => 1,
            Priority::Medium => 3,
            Priority::Low => 7,
            Priority::None => 14,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse("NONE"), Some(Priority::None));
        assert_eq!(Priority::parse("high"), None);
        assert_eq!(Priority::parse("URGENT"), None);
    }

    #[test]
    fn test_offsets_increase_as_urgency_drops() {
        let days: Vec<i64> = [Priority::High, Priority::Medium, Priority::Low, Priority::None]
            .iter()
            .map(Priority::offset_days)
            .collect();
        assert_eq!(days, vec![1, 3, 7, 14]);
    }
}
