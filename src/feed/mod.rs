// SPDX-License-Identifier: MPL-2.0
//! Feed roster and descriptor types.
//!
//! A `FeedDescriptor` is the read-only contract between the page shell and a
//! tile: identity, source locator, severity classification and display-only
//! counters. Playback state lives in [`playback`], never here.

pub mod playback;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Opaque feed identifier, used to build navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedId(pub u32);

impl std::fmt::Display for FeedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity classification driving the tile accent, unrelated to playback
/// health. Unrecognized labels map to `Unknown` and render neutrally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl ThreatLevel {
    pub fn parse(label: &str) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "LOW" => ThreatLevel::Low,
            "MEDIUM" => ThreatLevel::Medium,
            "HIGH" => ThreatLevel::High,
            _ => ThreatLevel::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThreatLevel::Low => "LOW",
            ThreatLevel::Medium => "MEDIUM",
            ThreatLevel::High => "HIGH",
            ThreatLevel::Unknown => "UNKNOWN",
        }
    }
}

/// Whether the feed's uplink is reporting. Drives the presence dot only; the
/// playback lifecycle never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Active,
    Inactive,
}

/// Read-only description of one surveillance feed.
#[derive(Debug, Clone)]
pub struct FeedDescriptor {
    pub id: FeedId,
    pub location: String,
    pub threat_level: ThreatLevel,
    pub status: FeedStatus,
    /// Clip shown on the dashboard tile.
    pub source: PathBuf,
    /// Annotated clip shown on the detail page.
    pub detail_source: PathBuf,
    /// Companion detection report for the detail page and chat briefing.
    pub report_path: PathBuf,
    pub detections: u32,
    pub confidence: f32,
}

/// On-disk roster format (`feeds.toml`), overriding the built-in layout.
#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    feed: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
struct RosterEntry {
    id: u32,
    location: String,
    threat_level: String,
    #[serde(default = "default_status")]
    status: String,
    source: PathBuf,
    detail_source: PathBuf,
    report: PathBuf,
    #[serde(default)]
    detections: u32,
    #[serde(default)]
    confidence: f32,
}

fn default_status() -> String {
    "Active".to_string()
}

impl RosterEntry {
    fn into_descriptor(self, assets_dir: &Path) -> FeedDescriptor {
        FeedDescriptor {
            id: FeedId(self.id),
            location: self.location,
            threat_level: ThreatLevel::parse(&self.threat_level),
            status: if self.status.eq_ignore_ascii_case("active") {
                FeedStatus::Active
            } else {
                FeedStatus::Inactive
            },
            source: assets_dir.join(self.source),
            detail_source: assets_dir.join(self.detail_source),
            report_path: assets_dir.join(self.report),
            detections: self.detections,
            confidence: self.confidence,
        }
    }
}

/// Loads a roster file, falling back to the built-in six-sector layout on
/// any read or parse failure.
pub fn load_roster(path: &Path, assets_dir: &Path) -> Vec<FeedDescriptor> {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<RosterFile>(&content) {
            Ok(file) if !file.feed.is_empty() => file
                .feed
                .into_iter()
                .map(|entry| entry.into_descriptor(assets_dir))
                .collect(),
            Ok(_) => builtin_roster(assets_dir),
            Err(err) => {
                eprintln!("Failed to parse roster {:?}: {}", path, err);
                builtin_roster(assets_dir)
            }
        },
        Err(err) => {
            eprintln!("Failed to read roster {:?}: {}", path, err);
            builtin_roster(assets_dir)
        }
    }
}

/// The six-sector layout of the demo deployment.
pub fn builtin_roster(assets_dir: &Path) -> Vec<FeedDescriptor> {
    let layout: [(u32, ThreatLevel, &str, &str, u32, f32); 6] = [
        (1, ThreatLevel::High, "Sector A-1", "1", 15, 98.2),
        (2, ThreatLevel::Medium, "Sector B-2", "2", 8, 92.5),
        (3, ThreatLevel::Low, "Sector C-3", "3", 3, 95.8),
        (4, ThreatLevel::High, "Sector D-4", "4", 12, 97.1),
        (5, ThreatLevel::Medium, "Sector E-5", "5", 6, 93.4),
        (6, ThreatLevel::Low, "Sector F-6", "6", 2, 96.7),
    ];

    layout.iter()
        .map(|&(id, threat_level, location, stem, detections, confidence)| FeedDescriptor {
            id: FeedId(id),
            location: location.to_string(),
            threat_level,
            status: FeedStatus::Active,
            source: assets_dir.join("test_videos").join(format!("{stem}.mp4")),
            detail_source: assets_dir
                .join("processed_output")
                .join(format!("{stem}_detected.mp4")),
            report_path: assets_dir
                .join("processed_output")
                .join(format!("{stem}_detections.json")),
            detections,
            confidence,
        })
        .collect()
}
