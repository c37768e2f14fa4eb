// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone editor core.
//!
//! Named polygonal zones over a reference image, each with the trigger
//! parameters a motion detector applies to it. The core owns the zone
//! document, the editing state of the active zone and the pointer drag
//! protocol; rendering and file pickers live in the host application.

pub mod editor;
pub mod error;
pub mod io;
pub mod models;
pub mod util;

pub use editor::drag::{Corner, Handle};
pub use editor::EditSession;
pub use error::{EditError, EditResult};
pub use models::document::{DocumentFile, ZoneDocument};
pub use models::zone::{Point, PointerPos, Zone, ZoneEdit};
