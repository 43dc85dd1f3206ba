// SPDX-License-Identifier: MPL-2.0
//! Sonar reading validation and the stubbed classifier call.
//!
//! The classifier itself is an external HTTP service; this module only
//! validates operator input and speaks the `{"readings": [...]}` wire shape.

use serde::{Deserialize, Serialize};

/// A sonar sweep is always 60 frequency-band returns.
pub const READING_LEN: usize = 60;

/// Result type for sonar operations.
pub type SonarResult<T> = Result<T, SonarError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SonarError {
    /// A reading row did not contain exactly 60 numeric values.
    InvalidReading { row: usize, found: usize },
    /// Transport or server-side failure talking to the classifier.
    Endpoint(String),
}

impl std::fmt::Display for SonarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SonarError::InvalidReading { row, found } => write!(
                f,
                "Reading {} must contain exactly {} comma-separated values (found {})",
                row, READING_LEN, found
            ),
            SonarError::Endpoint(msg) => write!(f, "Classifier request failed: {}", msg),
        }
    }
}

/// Classifier verdict for one reading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SonarVerdict {
    pub prediction: String,
    pub confidence: f64,
}

impl SonarVerdict {
    /// Mine contacts are rendered in the alarm color.
    #[must_use]
    pub fn is_mine(&self) -> bool {
        self.prediction.eq_ignore_ascii_case("MINE")
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    readings: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    results: Vec<SonarVerdict>,
}

/// Parses one free-text row into numeric values. Non-numeric tokens are
/// dropped rather than rejected, so stray whitespace or a trailing comma
/// does not invalidate an otherwise complete sweep.
#[must_use]
pub fn parse_reading(raw: &str) -> Vec<f64> {
    raw.split(',')
        .filter_map(|token| token.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect()
}

/// Parses and validates every row; rows are numbered from 1 in errors.
pub fn parse_readings(rows: &[String]) -> SonarResult<Vec<Vec<f64>>> {
    rows.iter()
        .enumerate()
        .map(|(i, raw)| {
            let values = parse_reading(raw);
            if values.len() == READING_LEN {
                Ok(values)
            } else {
                Err(SonarError::InvalidReading {
                    row: i + 1,
                    found: values.len(),
                })
            }
        })
        .collect()
}

/// Sends validated readings to the external classifier.
pub async fn classify(endpoint: &str, readings: Vec<Vec<f64>>) -> SonarResult<Vec<SonarVerdict>> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SonarError::Endpoint(e.to_string()))?;

    let response = client
        .post(endpoint)
        .json(&PredictRequest { readings })
        .send()
        .await
        .map_err(|e| SonarError::Endpoint(e.to_string()))?;

    if !response.status().is_success() {
        return Err(SonarError::Endpoint(format!(
            "classifier returned {}",
            response.status()
        )));
    }

    let parsed: PredictResponse = response
        .json()
        .await
        .map_err(|e| SonarError::Endpoint(e.to_string()))?;
    Ok(parsed.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep(len: usize) -> String {
        (0..len)
            .map(|i| format!("0.{:02}", i % 100))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn parse_reading_accepts_sixty_values() {
        let values = parse_reading(&sweep(READING_LEN));
        assert_eq!(values.len(), READING_LEN);
    }

    #[test]
    fn parse_reading_drops_non_numeric_tokens() {
        let values = parse_reading("0.1, junk, 0.3,, 0.5");
        assert_eq!(values, vec![0.1, 0.3, 0.5]);
    }

    #[test]
    fn parse_readings_rejects_short_rows_with_row_number() {
        let rows = vec![sweep(READING_LEN), sweep(59)];
        let err = parse_readings(&rows).expect_err("second row is short");
        assert_eq!(err, SonarError::InvalidReading { row: 2, found: 59 });
        assert!(format!("{}", err).contains("Reading 2"));
    }

    #[test]
    fn parse_readings_returns_all_rows_when_valid() {
        let rows = vec![sweep(READING_LEN), sweep(READING_LEN)];
        let parsed = parse_readings(&rows).expect("both rows valid");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].len(), READING_LEN);
    }

    #[test]
    fn verdict_mine_check_is_case_insensitive() {
        let verdict = SonarVerdict {
            prediction: "mine".into(),
            confidence: 88.5,
        };
        assert!(verdict.is_mine());
        let rock = SonarVerdict {
            prediction: "ROCK".into(),
            confidence: 91.0,
        };
        assert!(!rock.is_mine());
    }

    #[tokio::test]
    async fn classify_reports_unreachable_endpoint() {
        let result = classify("http://127.0.0.1:1/api/predict", vec![vec![0.0; READING_LEN]]).await;
        assert!(matches!(result, Err(SonarError::Endpoint(_))));
    }
}
