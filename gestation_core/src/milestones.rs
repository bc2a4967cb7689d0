//! # Milestone Table
//!
//! Read-only reference data: developmental checkpoints keyed by gestational
//! week. A table is built once and shared by every calculation; the
//! classifier borrows entries from it and never copies the table per call.
//!
//! Entries are always held in ascending `trigger_week` order. Entries with
//! the same week keep their original relative order.
//!
//! ## JSON Format
//!
//! A table serializes as a plain array, so deployments can ship their own:
//!
//! ```json
//! [
//!   { "trigger_week": 6, "label": "Heartbeat visible", "description": "..." },
//!   { "trigger_week": 20, "label": "Anatomy scan", "description": "..." }
//! ]
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{DatingError, DatingResult};

/// A developmental checkpoint reached at `trigger_week`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Completed gestational week at which the milestone is reached
    pub trigger_week: u32,
    /// Short title
    pub label: String,
    /// One-sentence explanation
    pub description: String,
}

impl Milestone {
    pub fn new(trigger_week: u32, label: impl Into<String>, description: impl Into<String>) -> Self {
        Milestone {
            trigger_week,
            label: label.into(),
            description: description.into(),
        }
    }

    /// Whether the milestone has been reached at `current_week`
    pub fn is_reached(&self, current_week: u32) -> bool {
        current_week >= self.trigger_week
    }
}

/// Ordered, immutable list of milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Milestone>", into = "Vec<Milestone>")]
pub struct MilestoneTable {
    entries: Vec<Milestone>,
}

impl MilestoneTable {
    /// Build a table, sorting entries by trigger week. Every entry needs a
    /// non-blank label.
    pub fn new(entries: Vec<Milestone>) -> DatingResult<Self> {
        if let Some(blank) = entries.iter().find(|m| m.label.trim().is_empty()) {
            return Err(DatingError::invalid_input(
                "milestones",
                format!("week {}", blank.trigger_week),
                "Milestone label cannot be empty",
            ));
        }
        Ok(MilestoneTable::sorted(entries))
    }

    fn sorted(mut entries: Vec<Milestone>) -> Self {
        entries.sort_by_key(|m| m.trigger_week);
        MilestoneTable { entries }
    }

    /// Entries in ascending week order
    pub fn entries(&self) -> &[Milestone] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Milestone> {
        self.entries.iter()
    }

    /// First milestone not yet reached at `current_week`, if any.
    pub fn next_milestone(&self, current_week: u32) -> Option<&Milestone> {
        self.entries.iter().find(|m| !m.is_reached(current_week))
    }
}

impl TryFrom<Vec<Milestone>> for MilestoneTable {
    type Error = DatingError;

    fn try_from(entries: Vec<Milestone>) -> Result<Self, Self::Error> {
        MilestoneTable::new(entries)
    }
}

impl From<MilestoneTable> for Vec<Milestone> {
    fn from(table: MilestoneTable) -> Self {
        table.entries
    }
}

impl<'a> IntoIterator for &'a MilestoneTable {
    type Item = &'a Milestone;
    type IntoIter = std::slice::Iter<'a, Milestone>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Standard milestone table used when the caller does not inject one.
pub static DEFAULT_MILESTONES: Lazy<MilestoneTable> = Lazy::new(|| {
    MilestoneTable::sorted(vec![
        Milestone::new(
            4,
            "Implantation",
            "The embryo has implanted and a home pregnancy test can turn positive.",
        ),
        Milestone::new(
            6,
            "Heartbeat visible",
            "Cardiac activity can usually be seen on a transvaginal ultrasound.",
        ),
        Milestone::new(
            10,
            "Fetal stage",
            "The embryo is now called a fetus and all major organs have begun to form.",
        ),
        Milestone::new(
            12,
            "First-trimester screening",
            "Window for the nuchal translucency scan and combined screening tests.",
        ),
        Milestone::new(
            16,
            "First movements",
            "Some people start to feel the first flutters of movement.",
        ),
        Milestone::new(
            20,
            "Anatomy scan",
            "Mid-pregnancy ultrasound checking growth and organ development.",
        ),
        Milestone::new(
            24,
            "Viability",
            "With intensive care, a baby born from this week has a chance of survival.",
        ),
        Milestone::new(
            28,
            "Third trimester",
            "Rapid growth begins and the eyes can open and close.",
        ),
        Milestone::new(
            32,
            "Lungs maturing",
            "The lungs are developing quickly and most babies settle head-down.",
        ),
        Milestone::new(37, "Early term", "The baby is considered early term."),
        Milestone::new(39, "Full term", "The baby is considered full term."),
        Milestone::new(40, "Due date", "The estimated date of delivery."),
    ])
});
