// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer drag state machine.
//!
//! A drag is `Idle -> Dragging -> Idle`. Pressing on a handle records which
//! handle it is and the offset between the pointer and the handle's anchor,
//! so the handle does not jump to the pointer on the first move. Only one
//! handle can be dragged at a time.

use crate::error::{EditError, EditResult};
use crate::models::zone::{Point, PointerPos};
use std::fmt;

/// One of the two opposite corners of the minimum rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    First,
    Second,
}

impl Corner {
    pub fn number(self) -> u8 {
        match self {
            Corner::First => 1,
            Corner::Second => 2,
        }
    }
}

/// A draggable point on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// A vertex of the active zone's polygon
    Vertex(usize),
    /// A corner of the active zone's minimum rectangle
    MinCorner(Corner),
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Vertex(index) => write!(f, "vertex {}", index),
            Handle::MinCorner(corner) => {
                write!(f, "minimum rectangle corner {}", corner.number())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { handle: Handle, offset: PointerPos },
}

/// Tracks the handle under the pointer between press and release.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press on `handle` whose current position is `anchor`.
    pub fn begin(&mut self, handle: Handle, pointer: PointerPos, anchor: Point) -> EditResult<()> {
        if let DragState::Dragging { handle: active, .. } = self.state {
            return Err(EditError::DragInProgress(active));
        }
        self.state = DragState::Dragging {
            handle,
            offset: pointer.offset_from(anchor),
        };
        log::debug!("Started dragging {}", handle);
        Ok(())
    }

    /// The handle being dragged and the offset recorded when it was pressed.
    pub fn active(&self) -> EditResult<(Handle, PointerPos)> {
        match self.state {
            DragState::Dragging { handle, offset } => Ok((handle, offset)),
            DragState::Idle => Err(EditError::NotDragging),
        }
    }

    /// Release the pointer. Returns the handle that was being dragged.
    pub fn end(&mut self) -> Option<Handle> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { handle, .. } => {
                log::debug!("Stopped dragging {}", handle);
                Some(handle)
            }
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn state(&self) -> DragState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_records_offset() {
        let mut drag = DragSession::new();
        drag.begin(Handle::Vertex(1), PointerPos::new(105.0, 98.0), Point::new(100, 100))
            .unwrap();

        let (handle, offset) = drag.active().unwrap();
        assert_eq!(handle, Handle::Vertex(1));
        assert_eq!(offset, PointerPos::new(5.0, -2.0));
    }

    #[test]
    fn test_second_press_rejected() {
        let mut drag = DragSession::new();
        drag.begin(Handle::Vertex(0), PointerPos::new(0.0, 0.0), Point::new(0, 0))
            .unwrap();

        let err = drag
            .begin(Handle::MinCorner(Corner::First), PointerPos::new(9.0, 9.0), Point::new(9, 9))
            .unwrap_err();
        assert_eq!(err, EditError::DragInProgress(Handle::Vertex(0)));
        assert_eq!(drag.active().unwrap().0, Handle::Vertex(0));
    }

    #[test]
    fn test_end_returns_to_idle() {
        let mut drag = DragSession::new();
        assert_eq!(drag.end(), None);
        assert_eq!(drag.active(), Err(EditError::NotDragging));

        drag.begin(Handle::MinCorner(Corner::Second), PointerPos::new(1.0, 1.0), Point::new(1, 1))
            .unwrap();
        assert!(drag.is_dragging());
        assert_eq!(drag.end(), Some(Handle::MinCorner(Corner::Second)));
        assert_eq!(drag.state(), DragState::Idle);
    }
}
