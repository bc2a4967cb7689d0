//! # Dating Engine
//!
//! Runs the three stages in order:
//!
//! ```text
//! DatingMethod --resolve_anchor--> ResolvedAnchor
//!              --Timeline::calculate(anchor, as_of)--> Timeline
//!              --classify(current_week, milestones)--> Trimester + MilestoneStatus[]
//! ```
//!
//! Every call is independent. The engine holds only settings and a borrowed,
//! shared milestone table, so one engine can serve any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gestation_core::engine::GestationEngine;
//! use gestation_core::methods::{DatingMethod, MenstrualPeriodInput};
//! use gestation_core::classifier::Trimester;
//!
//! let engine = GestationEngine::default();
//! let method = DatingMethod::from(MenstrualPeriodInput::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
//! let report = engine.compute(&method, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap()).unwrap();
//!
//! assert_eq!(report.timeline.current_week, 3);
//! assert_eq!(report.trimester, Trimester::First);
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::classifier::{classify, MilestoneStatus, Trimester};
use crate::errors::{DatingResult, SettingsError};
use crate::methods::{DatingMethod, ResolvedAnchor};
use crate::milestones::{Milestone, MilestoneTable, DEFAULT_MILESTONES};
use crate::settings::EngineSettings;
use crate::timeline::Timeline;

/// Engine output record consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestationalReport<'a> {
    /// Anchor date and estimated conception date
    pub anchor: ResolvedAnchor,
    /// Elapsed time, due date and progress
    pub timeline: Timeline,
    /// Current trimester
    pub trimester: Trimester,
    /// Every milestone in table order with its reached flag
    pub milestones: Vec<MilestoneStatus<'a>>,
}

impl<'a> GestationalReport<'a> {
    /// First milestone not yet reached
    pub fn next_milestone(&self) -> Option<&'a Milestone> {
        self.milestones.iter().find(|s| !s.reached).map(|s| s.milestone)
    }
}

/// Settings plus the milestone table a calculation is evaluated against.
#[derive(Debug, Clone)]
pub struct GestationEngine<'a> {
    settings: EngineSettings,
    milestones: &'a MilestoneTable,
}

impl Default for GestationEngine<'static> {
    fn default() -> Self {
        GestationEngine {
            settings: EngineSettings::default(),
            milestones: &DEFAULT_MILESTONES,
        }
    }
}

impl<'a> GestationEngine<'a> {
    /// Build an engine, rejecting settings whose bounds are inconsistent.
    pub fn new(settings: EngineSettings, milestones: &'a MilestoneTable) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(GestationEngine { settings, milestones })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn milestones(&self) -> &'a MilestoneTable {
        self.milestones
    }

    /// Compute the full report for `method` as of `as_of`.
    pub fn compute(&self, method: &DatingMethod, as_of: NaiveDate) -> DatingResult<GestationalReport<'a>> {
        let anchor = method.resolve_anchor(&self.settings)?;
        let timeline = Timeline::calculate(anchor.anchor_date, as_of)?;
        let classification = classify(timeline.current_week, self.milestones);

        Ok(GestationalReport {
            anchor,
            timeline,
            trimester: classification.trimester,
            milestones: classification.milestones,
        })
    }

    /// Compute the report as of today's local date.
    pub fn compute_today(&self, method: &DatingMethod) -> DatingResult<GestationalReport<'a>> {
        self.compute(method, chrono::Local::now().date_naive())
    }
}

/// Compute a report with default settings and the default milestone table.
pub fn compute_gestational_timeline(
    method: &DatingMethod,
    as_of: NaiveDate,
) -> DatingResult<GestationalReport<'static>> {
    GestationEngine::default().compute(method, as_of)
}
