//! # gestation_core - Gestational Dating Engine
//!
//! `gestation_core` computes a pregnancy timeline from any of four clinical
//! dating methods: last menstrual period, conception date, ultrasound
//! estimate, or IVF embryo transfer. Every method is normalized onto one
//! anchor date ("day 0" of a 280-day gestation), from which the engine derives
//! the due date, the current gestational age, progress, trimester and
//! milestone flags.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions of the inputs and an explicit reference date
//! - **JSON-First**: Inputs, outputs and errors implement serde traits
//! - **Typed Errors**: `InvalidInput`, `OutOfRange`, `InvalidTimeline`; never strings
//! - **Closed Methods**: [`DatingMethod`] is an enum, so every method is handled
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gestation_core::{compute_gestational_timeline, AssistedTransferInput, DatingMethod};
//!
//! let method = DatingMethod::from(AssistedTransferInput::new(
//!     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     5,
//! ));
//! let report = compute_gestational_timeline(&method, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()).unwrap();
//!
//! assert_eq!(report.anchor.anchor_date, NaiveDate::from_ymd_opt(2024, 2, 11).unwrap());
//! assert_eq!(report.timeline.projected_completion_date, NaiveDate::from_ymd_opt(2024, 11, 17).unwrap());
//!
//! // Serialize for the presentation layer
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`methods`] - One adapter per dating method, producing the anchor date
//! - [`timeline`] - Elapsed time, due date, percent complete
//! - [`classifier`] - Trimester and milestone evaluation
//! - [`milestones`] - Shared read-only milestone table
//! - [`engine`] - The full pipeline
//! - [`dates`] - Calendar arithmetic and clinical constants
//! - [`settings`] - Clinical bounds, loadable from JSON
//! - [`errors`] - Structured error types

pub mod classifier;
pub mod dates;
pub mod engine;
pub mod errors;
pub mod methods;
pub mod milestones;
pub mod settings;
pub mod timeline;

// Re-export commonly used types at crate root for convenience
pub use classifier::{MilestoneStatus, Trimester};
pub use engine::{compute_gestational_timeline, GestationEngine, GestationalReport};
pub use errors::{DatingError, DatingResult, SettingsError};
pub use methods::{
    AssistedTransferInput, ConceptionInput, DatingMethod, ImagingEstimateInput, MenstrualPeriodInput, MethodKind,
    ResolvedAnchor,
};
pub use milestones::{Milestone, MilestoneTable, DEFAULT_MILESTONES};
pub use settings::EngineSettings;
pub use timeline::{TermWindow, Timeline};
