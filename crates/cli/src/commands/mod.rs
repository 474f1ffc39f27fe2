// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod display;
pub mod lock;
pub mod pattern;
pub mod process;
pub mod project;
pub mod status;
