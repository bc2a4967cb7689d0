//! Dating from a known conception (ovulation/fertilization) date.
//!
//! The anchor is reconstructed as the equivalent period start, 14 days
//! before conception, so the downstream 280-day constant is shared with
//! every other method. Cycle length is deliberately not an input here: the
//! anchor is gestational age by convention, not the user's actual LMP.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{offset, require, MethodKind, ResolvedAnchor};
use crate::dates::ANCHOR_TO_CONCEPTION_DAYS;
use crate::errors::DatingResult;
use crate::settings::EngineSettings;

/// Input for dating from conception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptionInput {
    /// Date of ovulation/fertilization
    pub conception_date: Option<NaiveDate>,
}

impl ConceptionInput {
    pub fn new(conception_date: NaiveDate) -> Self {
        ConceptionInput {
            conception_date: Some(conception_date),
        }
    }

    /// Validate inputs and resolve the anchor date.
    pub fn resolve(&self, _settings: &EngineSettings) -> DatingResult<ResolvedAnchor> {
        let conception_date = require(self.conception_date, "conception_date")?;
        let anchor_date = offset(conception_date, -ANCHOR_TO_CONCEPTION_DAYS, "conception_date")?;

        Ok(ResolvedAnchor {
            method: MethodKind::Conception,
            anchor_date,
            conception_date,
        })
    }
}
