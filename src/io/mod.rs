// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for reference images and zones files.

pub mod media;
pub mod serialization;
