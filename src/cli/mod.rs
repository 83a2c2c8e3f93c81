// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! CLI support for the `spkb` binary

pub mod reporter;

pub use reporter::Reporter;
