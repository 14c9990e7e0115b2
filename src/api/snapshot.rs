use serde::{Deserialize, Serialize};

use crate::core::{AxesLimits, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipState;

pub const SESSION_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Drill-down part of a [`SessionSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillDownSnapshot {
    pub country: String,
    pub limits: AxesLimits,
    pub path: Vec<(f64, f64)>,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub main_surface: Viewport,
    pub rows: usize,
    pub selected_year: String,
    pub visible_marks: usize,
    pub main_limits: AxesLimits,
    pub hovered_mark: Option<usize>,
    pub hovered_country: Option<String>,
    pub tooltip: TooltipState,
    pub drill_down: Option<DrillDownSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SessionSnapshot,
}

impl SessionSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = SessionSnapshotJsonContractV1 {
            schema_version: SESSION_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SessionSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SessionSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SESSION_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
