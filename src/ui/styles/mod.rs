// SPDX-License-Identifier: MPL-2.0
//! Centralized widget styles for the console.

pub mod button;
pub mod container;
