// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

use crate::feed::FeedId;

/// Screens the operator can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Dashboard,
    FeedDetail(FeedId),
    Sonar,
}
