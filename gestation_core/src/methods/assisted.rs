//! # IVF Embryo Transfer
//!
//! An embryo transferred at day N of development was conceived N days
//! before transfer, and the anchor sits 14 days before conception:
//!
//! ```text
//! anchor = transfer_date - (14 + embryo_age_days)
//! day-3 embryo: transfer - 17
//! day-5 embryo: transfer - 19
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{offset, require, MethodKind, ResolvedAnchor};
use crate::dates::ANCHOR_TO_CONCEPTION_DAYS;
use crate::errors::{DatingError, DatingResult};
use crate::settings::EngineSettings;

/// Embryo ages (days of development at transfer) that clinics transfer
pub const SUPPORTED_EMBRYO_AGES: [i64; 2] = [3, 5];

/// Input for dating from an IVF transfer.
///
/// ## JSON Example
///
/// ```json
/// { "transfer_date": "2024-03-01", "embryo_age_days": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistedTransferInput {
    /// Date of embryo transfer
    pub transfer_date: Option<NaiveDate>,

    /// Age of the embryo at transfer: 3 (cleavage stage) or 5 (blastocyst)
    pub embryo_age_days: Option<i64>,
}

impl AssistedTransferInput {
    pub fn new(transfer_date: NaiveDate, embryo_age_days: i64) -> Self {
        AssistedTransferInput {
            transfer_date: Some(transfer_date),
            embryo_age_days: Some(embryo_age_days),
        }
    }

    /// Validate inputs and resolve the anchor date.
    pub fn resolve(&self, _settings: &EngineSettings) -> DatingResult<ResolvedAnchor> {
        let transfer_date = require(self.transfer_date, "transfer_date")?;
        let embryo_age = require(self.embryo_age_days, "embryo_age_days")?;

        if embryo_age < 0 {
            return Err(DatingError::invalid_input(
                "embryo_age_days",
                embryo_age.to_string(),
                "Embryo age cannot be negative",
            ));
        }
        if !SUPPORTED_EMBRYO_AGES.contains(&embryo_age) {
            return Err(DatingError::out_of_range(
                "embryo_age_days",
                embryo_age.to_string(),
                "Embryo age must be 3 or 5 days",
            ));
        }

        let conception_date = offset(transfer_date, -embryo_age, "transfer_date")?;
        let anchor_date = offset(conception_date, -ANCHOR_TO_CONCEPTION_DAYS, "transfer_date")?;

        Ok(ResolvedAnchor {
            method: MethodKind::AssistedTransfer,
            anchor_date,
            conception_date,
        })
    }
}
