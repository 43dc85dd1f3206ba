// SPDX-License-Identifier: MPL-2.0
//! Detection report model for the feed detail page.
//!
//! Reports are produced offline by the detection pipeline and fetched here as
//! plain JSON documents next to the processed clip; this module only reads
//! them.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Companion document describing one processed clip.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectionReport {
    #[serde(default)]
    pub video_info: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub unique_objects: BTreeMap<String, u64>,
}

/// Alert severity derived from the total object count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertLevel {
    pub fn label(self) -> &'static str {
        match self {
            AlertLevel::Low => "LOW",
            AlertLevel::Medium => "MEDIUM",
            AlertLevel::High => "HIGH",
            AlertLevel::Critical => "CRITICAL",
        }
    }
}

impl DetectionReport {
    /// Reads and parses a report from disk.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::Io(format!("Failed to read report {:?}: {}", path, e)))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Total objects across all labels.
    #[must_use]
    pub fn total_objects(&self) -> u64 {
        self.unique_objects.values().sum()
    }

    /// The `n` most frequent labels, most frequent first. Ties break
    /// alphabetically so output is stable.
    #[must_use]
    pub fn top_objects(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .unique_objects
            .iter()
            .map(|(label, &count)| (label.as_str(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    #[must_use]
    pub fn alert_level(&self) -> AlertLevel {
        match self.total_objects() {
            n if n > 50 => AlertLevel::Critical,
            n if n > 30 => AlertLevel::High,
            n if n > 10 => AlertLevel::Medium,
            _ => AlertLevel::Low,
        }
    }

    /// Frames-per-second reading, if the pipeline recorded one.
    #[must_use]
    pub fn fps(&self) -> Option<f64> {
        self.video_info.get("fps").and_then(serde_json::Value::as_f64)
    }

    /// Rows for the video-information grid: pipeline bookkeeping paths are
    /// dropped, keys are humanized and a few values get units attached.
    #[must_use]
    pub fn video_info_rows(&self) -> Vec<(String, String)> {
        self.video_info
            .iter()
            .filter(|(key, _)| key.as_str() != "input_path" && key.as_str() != "output_path")
            .map(|(key, value)| {
                let display = match (key.as_str(), value) {
                    ("total_frames", serde_json::Value::Number(n)) => n
                        .as_u64()
                        .map(group_thousands)
                        .unwrap_or_else(|| n.to_string()),
                    ("fps", serde_json::Value::Number(n)) => format!("{} FPS", n),
                    (_, serde_json::Value::String(s)) => s.clone(),
                    (_, other) => other.to_string(),
                };
                (key.replace('_', " "), display)
            })
            .collect()
    }

    /// Canned chat reply summarizing the report.
    #[must_use]
    pub fn briefing(&self) -> String {
        let top = self.top_objects(3);
        if top.is_empty() {
            return "Analyzing feed data...".to_string();
        }
        let frequent = top
            .iter()
            .map(|(label, count)| format!("{} ({})", label, count))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "I've detected {} objects in this feed. The most frequent objects are: {}.",
            self.total_objects(),
            frequent
        )
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DetectionReport {
        serde_json::from_str(
            r#"{
                "video_info": {
                    "fps": 30,
                    "total_frames": 1524,
                    "input_path": "/in/4.mp4",
                    "output_path": "/out/4_detected.mp4",
                    "resolution": "1920x1080"
                },
                "unique_objects": {"person": 12, "car": 7, "truck": 7, "bird": 1}
            }"#,
        )
        .expect("sample report should parse")
    }

    #[test]
    fn total_objects_sums_all_labels() {
        assert_eq!(sample().total_objects(), 27);
    }

    #[test]
    fn top_objects_sorts_by_count_then_label() {
        let report = sample();
        let top = report.top_objects(3);
        assert_eq!(top, vec![("person", 12), ("car", 7), ("truck", 7)]);
    }

    #[test]
    fn alert_level_thresholds_match_pipeline_contract() {
        let mut report = DetectionReport::default();
        assert_eq!(report.alert_level(), AlertLevel::Low);

        report.unique_objects.insert("person".into(), 11);
        assert_eq!(report.alert_level(), AlertLevel::Medium);

        report.unique_objects.insert("car".into(), 20);
        assert_eq!(report.alert_level(), AlertLevel::High);

        report.unique_objects.insert("truck".into(), 20);
        assert_eq!(report.alert_level(), AlertLevel::Critical);
    }

    #[test]
    fn video_info_rows_skip_pipeline_paths_and_humanize() {
        let rows = sample().video_info_rows();
        assert!(rows.iter().all(|(key, _)| !key.contains("path")));
        assert!(rows.contains(&("fps".to_string(), "30 FPS".to_string())));
        assert!(rows.contains(&("total frames".to_string(), "1,524".to_string())));
    }

    #[test]
    fn briefing_names_top_three_labels() {
        let text = sample().briefing();
        assert!(text.starts_with("I've detected 27 objects"));
        assert!(text.contains("person (12)"));
        assert!(!text.contains("bird"));
    }

    #[test]
    fn briefing_without_data_falls_back() {
        assert_eq!(DetectionReport::default().briefing(), "Analyzing feed data...");
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let report: DetectionReport = serde_json::from_str("{}").expect("parse");
        assert_eq!(report.total_objects(), 0);
        assert!(report.video_info_rows().is_empty());
    }

    #[tokio::test]
    async fn load_reports_missing_file_as_io_error() {
        let result = DetectionReport::load(Path::new("/nonexistent/report.json")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1524), "1,524");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
