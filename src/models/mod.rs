// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data models for zones and the zone document.

pub mod document;
pub mod zone;
