// SPDX-License-Identifier: MPL-2.0
//! Default values shared between the config module and the update loop.

/// Delay between a feed failure and the automatic reconnect attempt.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 3000;

/// Classifier endpoint for sonar readings. The service is external to this
/// codebase; the default matches the development deployment.
pub const DEFAULT_SONAR_ENDPOINT: &str = "http://localhost:5001/api/predict";

/// Directory searched for feed clips and processed detection output when no
/// override is configured. Relative to the working directory.
pub const DEFAULT_ASSETS_DIR: &str = "assets";
