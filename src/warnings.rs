//! Data-quality warnings surfaced alongside best-effort results.
//!
//! Nothing in this module aborts a query. Every warning is collected into
//! the returned view so the caller can render a complete progress display
//! and still flag the underlying data problem.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::StructuralWarning;
use crate::types::{NodeId, SubProcessId};

/// A non-fatal data-quality problem found while computing a view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// A structural defect in the workflow template.
    Structural { warning: StructuralWarning },
    /// A log entry references a node id absent from the graph. The entry is
    /// ignored for classification but retained in the raw log.
    UnknownLogNode { node: NodeId },
    /// A task references a sub-process id the lookup stores cannot resolve.
    /// The group renders with a fallback label instead of being omitted.
    UnknownSubProcess { sub_process: SubProcessId },
}

impl From<StructuralWarning> for DataQualityWarning {
    fn from(warning: StructuralWarning) -> Self {
        Self::Structural { warning }
    }
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural { warning } => write!(f, "{warning}"),
            Self::UnknownLogNode { node } => {
                write!(f, "execution log references unknown node {node}")
            }
            Self::UnknownSubProcess { sub_process } => {
                write!(f, "task references unknown sub-process {sub_process}")
            }
        }
    }
}
