//! # Classifier
//!
//! Maps completed gestational weeks to a trimester and evaluates a milestone
//! table against them. Both are total functions with no failure modes.
//!
//! Classification is monotone in `current_week`: for a fixed anchor, a later
//! reference date can only move the trimester forward and flip milestone
//! flags from unreached to reached.
//!
//! ```text
//! weeks 0-13  -> First
//! weeks 14-27 -> Second
//! weeks 28+   -> Third
//! ```

use serde::{Deserialize, Serialize};

use crate::milestones::{Milestone, MilestoneTable};

/// Trimester label. Ordered First < Second < Third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    /// All trimesters in order
    pub const ALL: [Trimester; 3] = [Trimester::First, Trimester::Second, Trimester::Third];

    /// Classify completed gestational weeks.
    pub fn from_week(current_week: u32) -> Self {
        match current_week {
            0..=13 => Trimester::First,
            14..=27 => Trimester::Second,
            _ => Trimester::Third,
        }
    }

    /// Trimester number, 1-3 (the key used by display content tables)
    pub fn number(&self) -> u8 {
        match self {
            Trimester::First => 1,
            Trimester::Second => 2,
            Trimester::Third => 3,
        }
    }

    /// First completed week belonging to this trimester
    pub fn start_week(&self) -> u32 {
        match self {
            Trimester::First => 0,
            Trimester::Second => 14,
            Trimester::Third => 28,
        }
    }

    /// Last completed week belonging to this trimester; `None` for the open-ended third
    pub fn end_week(&self) -> Option<u32> {
        match self {
            Trimester::First => Some(13),
            Trimester::Second => Some(27),
            Trimester::Third => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Trimester::First => "First trimester",
            Trimester::Second => "Second trimester",
            Trimester::Third => "Third trimester",
        }
    }
}

impl std::fmt::Display for Trimester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A milestone from the shared table with its reached flag for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MilestoneStatus<'a> {
    /// Position in the table (the key used by display content tables)
    pub index: usize,

    /// Borrowed table entry
    #[serde(flatten)]
    pub milestone: &'a Milestone,

    /// `current_week >= trigger_week`
    pub reached: bool,
}

/// Evaluate every milestone in `table` at `current_week`, preserving table order.
pub fn evaluate_milestones(current_week: u32, table: &MilestoneTable) -> Vec<MilestoneStatus<'_>> {
    table
        .iter()
        .enumerate()
        .map(|(index, milestone)| MilestoneStatus {
            index,
            milestone,
            reached: milestone.is_reached(current_week),
        })
        .collect()
}

/// Trimester plus milestone flags for one `current_week`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    pub trimester: Trimester,
    pub milestones: Vec<MilestoneStatus<'a>>,
}

impl Classification<'_> {
    /// Number of milestones reached
    pub fn reached_count(&self) -> usize {
        self.milestones.iter().filter(|s| s.reached).count()
    }
}

/// Classify `current_week` against `table`.
pub fn classify(current_week: u32, table: &MilestoneTable) -> Classification<'_> {
    Classification {
        trimester: Trimester::from_week(current_week),
        milestones: evaluate_milestones(current_week, table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestones::DEFAULT_MILESTONES;

    #[test]
    fn test_trimester_boundaries() {
        assert_eq!(Trimester::from_week(0), Trimester::First);
        assert_eq!(Trimester::from_week(13), Trimester::First);
        assert_eq!(Trimester::from_week(14), Trimester::Second);
        assert_eq!(Trimester::from_week(27), Trimester::Second);
        assert_eq!(Trimester::from_week(28), Trimester::Third);
        assert_eq!(Trimester::from_week(45), Trimester::Third);
    }

    #[test]
    fn test_trimester_ranges_agree_with_classification() {
        for trimester in Trimester::ALL {
            assert_eq!(Trimester::from_week(trimester.start_week()), trimester);
            if let Some(end) = trimester.end_week() {
                assert_eq!(Trimester::from_week(end), trimester);
                assert!(Trimester::from_week(end + 1) > trimester);
            }
        }
    }

    #[test]
    fn test_trimester_numbers() {
        let numbers: Vec<u8> = Trimester::ALL.iter().map(Trimester::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_milestones_full_list_in_order() {
        let statuses = evaluate_milestones(0, &DEFAULT_MILESTONES);
        assert_eq!(statuses.len(), DEFAULT_MILESTONES.len());
        assert!(statuses.iter().all(|s| !s.reached));
        for (i, status) in statuses.iter().enumerate() {
            assert_eq!(status.index, i);
            assert!(std::ptr::eq(status.milestone, &DEFAULT_MILESTONES.entries()[i]));
        }
    }

    #[test]
    fn test_milestone_reached_at_trigger_week() {
        let table = MilestoneTable::new(vec![
            Milestone::new(6, "Heartbeat visible", ""),
            Milestone::new(20, "Anatomy scan", ""),
        ])
        .unwrap();
        let at_19 = classify(19, &table);
        assert_eq!(at_19.reached_count(), 1);
        let at_20 = classify(20, &table);
        assert_eq!(at_20.reached_count(), 2);
        assert_eq!(at_20.trimester, Trimester::Second);
    }

    #[test]
    fn test_empty_table() {
        let table = MilestoneTable::new(Vec::new()).unwrap();
        let classification = classify(30, &table);
        assert!(classification.milestones.is_empty());
        assert_eq!(classification.trimester, Trimester::Third);
    }

    #[test]
    fn test_status_serializes_flattened() {
        let statuses = evaluate_milestones(21, &DEFAULT_MILESTONES);
        let json = serde_json::to_value(&statuses[5]).unwrap();
        assert_eq!(json["trigger_week"], 20);
        assert_eq!(json["label"], "Anatomy scan");
        assert_eq!(json["reached"], true);
        assert_eq!(json["index"], 5);
    }
}
