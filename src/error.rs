// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for zone editing operations.
//!
//! Every gesture the host dispatches returns a `Result`. A failed gesture
//! leaves the document and the editor state exactly as they were, so the
//! host is free to ignore the error or report it.

use crate::editor::drag::Handle;
use thiserror::Error;

/// Reasons an editing gesture was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The zone id is not present in the document
    #[error("zone {0} does not exist")]
    ZoneNotFound(u32),

    /// The vertex index is outside the zone's polygon
    #[error("zone {zone} has no vertex {index}")]
    VertexNotFound {
        /// Zone whose polygon was addressed
        zone: u32,
        /// The out-of-range vertex index
        index: usize,
    },

    /// Zone ids are 1-based
    #[error("zone id {0} is not a positive integer")]
    InvalidZoneId(u32),

    /// A document always keeps at least one zone
    #[error("must keep at least 1 zone")]
    LastZone,

    /// A polygon always keeps at least three vertices
    #[error("must maintain at least {minimum} points")]
    MinimumVertices {
        /// Smallest vertex count a zone may have
        minimum: usize,
    },

    /// The gesture needs an active zone and none is selected
    #[error("no zone is selected")]
    NoActiveZone,

    /// A handle is already being dragged
    #[error("already dragging {0}")]
    DragInProgress(Handle),

    /// A pointer move arrived without a preceding press on a handle
    #[error("no handle is being dragged")]
    NotDragging,

    /// An image load completed after a newer image replaced it
    #[error("image load for '{0}' was superseded")]
    StaleImageLoad(String),
}

/// Convenience alias for editing results.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::drag::Corner;

    #[test]
    fn test_messages_name_the_offending_item() {
        assert_eq!(EditError::ZoneNotFound(4).to_string(), "zone 4 does not exist");
        assert_eq!(
            EditError::VertexNotFound { zone: 2, index: 7 }.to_string(),
            "zone 2 has no vertex 7"
        );
        assert_eq!(
            EditError::DragInProgress(Handle::MinCorner(Corner::Second)).to_string(),
            "already dragging minimum rectangle corner 2"
        );
    }
}
