// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the inscribe application.

pub mod canvas;
pub mod reorder;
pub mod toolbar;
