// SPDX-License-Identifier: MPL-2.0
//! Sonar classification screen.
//!
//! Operators paste raw 60-value sweeps, one row per contact; the rows are
//! validated locally and shipped to the external classifier in one request.

use crate::sonar::{self, SonarError, SonarVerdict, READING_LEN};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use crate::ui::theme;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{alignment, Element, Length};

const SPINNER_SPEED: f32 = 0.1;

#[derive(Debug, Clone)]
pub enum Message {
    ReadingChanged { index: usize, value: String },
    AddReading,
    RemoveReading(usize),
    Submit,
    Completed(Result<Vec<SonarVerdict>, SonarError>),
    SpinnerTick,
    Back,
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// POST the validated readings to the classifier endpoint.
    Classify(Vec<Vec<f64>>),
    /// Return to the dashboard.
    Back,
}

#[derive(Debug)]
pub struct State {
    readings: Vec<String>,
    results: Vec<SonarVerdict>,
    in_flight: bool,
    error: Option<String>,
    spinner_rotation: f32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            readings: vec![String::new()],
            results: Vec::new(),
            in_flight: false,
            error: None,
            spinner_rotation: 0.0,
        }
    }
}

impl State {
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::ReadingChanged { index, value } => {
                if let Some(reading) = self.readings.get_mut(index) {
                    *reading = value;
                }
                Effect::None
            }
            Message::AddReading => {
                self.readings.push(String::new());
                Effect::None
            }
            Message::RemoveReading(index) => {
                // The last row always stays.
                if self.readings.len() > 1 && index < self.readings.len() {
                    self.readings.remove(index);
                }
                Effect::None
            }
            Message::Submit => {
                if self.in_flight {
                    return Effect::None;
                }
                match sonar::parse_readings(&self.readings) {
                    Ok(parsed) => {
                        self.in_flight = true;
                        self.error = None;
                        Effect::Classify(parsed)
                    }
                    Err(err) => {
                        self.error = Some(err.to_string());
                        Effect::None
                    }
                }
            }
            Message::Completed(result) => {
                self.in_flight = false;
                match result {
                    Ok(results) => {
                        self.results = results;
                        self.error = None;
                    }
                    Err(err) => {
                        eprintln!("Sonar classification failed: {}", err);
                        self.error = Some(err.to_string());
                    }
                }
                Effect::None
            }
            Message::SpinnerTick => {
                self.spinner_rotation =
                    (self.spinner_rotation + SPINNER_SPEED) % std::f32::consts::TAU;
                Effect::None
            }
            Message::Back => Effect::Back,
        }
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn view(&self) -> Element<'_, Message> {
        let back = button(text("< WAR ROOM").size(typography::BODY))
            .on_press(Message::Back)
            .style(styles::button::ghost)
            .padding([spacing::XXS, spacing::SM]);

        let heading = column![
            text("Sonar Detection System")
                .size(typography::TITLE_LG)
                .color(palette::WHITE),
            text(format!(
                "Enter {READING_LEN} comma-separated values between 0 and 1 for each reading"
            ))
            .size(typography::BODY)
            .color(theme::muted_text_color()),
        ]
        .spacing(spacing::XXS);

        let mut form = column![].spacing(spacing::SM);
        for (index, reading) in self.readings.iter().enumerate() {
            let remove = button(text("Remove").size(typography::CAPTION))
                .style(styles::button::ghost)
                .padding([spacing::XXS, spacing::SM]);
            let remove = if self.readings.len() > 1 {
                remove.on_press(Message::RemoveReading(index))
            } else {
                remove
            };

            form = form.push(
                row![
                    text_input(&format!("Sonar Reading {}", index + 1), reading)
                        .on_input(move |value| Message::ReadingChanged { index, value })
                        .size(typography::BODY)
                        .padding(spacing::XS),
                    remove,
                ]
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center),
            );
        }

        let submit_label: Element<'_, Message> = if self.in_flight {
            AnimatedSpinner::new(palette::WHITE, self.spinner_rotation)
                .compact()
                .into_element()
        } else {
            text("Analyze").size(typography::BODY).into()
        };

        let actions = row![
            button(text("Add Reading").size(typography::BODY))
                .on_press(Message::AddReading)
                .style(styles::button::ghost)
                .padding([spacing::XS, spacing::MD]),
            button(submit_label)
                .on_press(Message::Submit)
                .style(styles::button::primary)
                .padding([spacing::XS, spacing::MD]),
        ]
        .spacing(spacing::MD);

        let mut panel = column![heading, form, actions].spacing(spacing::LG);
        if let Some(error) = &self.error {
            panel = panel.push(
                text(error)
                    .size(typography::BODY)
                    .color(theme::error_text_color()),
            );
        }

        let mut content = column![
            back,
            container(panel)
                .padding(spacing::LG)
                .width(Length::Fill)
                .style(styles::container::surface_panel)
        ]
        .spacing(spacing::LG);

        if !self.results.is_empty() {
            content = content.push(results_grid(&self.results));
        }

        scrollable(
            container(content)
                .padding(spacing::LG)
                .width(Length::Fill),
        )
        .height(Length::Fill)
        .into()
    }
}

fn results_grid(results: &[SonarVerdict]) -> Element<'_, Message> {
    let mut rows = column![].spacing(spacing::MD);
    for (chunk_index, chunk) in results.chunks(3).enumerate() {
        let mut current = row![].spacing(spacing::MD);
        for (offset, verdict) in chunk.iter().enumerate() {
            let color = if verdict.is_mine() {
                palette::THREAT_HIGH
            } else {
                palette::THREAT_LOW
            };
            current = current.push(
                container(
                    column![
                        text(format!("Reading {}", chunk_index * 3 + offset + 1))
                            .size(typography::BODY)
                            .color(theme::muted_text_color()),
                        text(verdict.prediction.to_uppercase())
                            .size(typography::TITLE_MD)
                            .color(color),
                        text(format!("Confidence: {:.2}%", verdict.confidence))
                            .size(typography::CAPTION)
                            .color(theme::dim_text_color()),
                    ]
                    .spacing(spacing::XXS),
                )
                .padding(spacing::MD)
                .width(Length::Fill)
                .style(styles::container::object_card(color)),
            );
        }
        for _ in chunk.len()..3 {
            current = current.push(Space::new().width(Length::Fill).height(Length::Shrink));
        }
        rows = rows.push(current);
    }
    rows.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> String {
        (0..READING_LEN)
            .map(|i| format!("0.{:02}", i % 100))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn submit_with_valid_rows_requests_classification() {
        let mut state = State::default();
        state.handle(Message::ReadingChanged {
            index: 0,
            value: sweep(),
        });

        match state.handle(Message::Submit) {
            Effect::Classify(parsed) => {
                assert_eq!(parsed.len(), 1);
                assert_eq!(parsed[0].len(), READING_LEN);
            }
            other => panic!("expected Classify effect, got {:?}", other),
        }
        assert!(state.in_flight());
    }

    #[test]
    fn submit_with_short_row_shows_validation_error() {
        let mut state = State::default();
        state.handle(Message::ReadingChanged {
            index: 0,
            value: "0.1, 0.2".into(),
        });

        assert_eq!(state.handle(Message::Submit), Effect::None);
        assert!(!state.in_flight());
        assert!(state.error.as_deref().unwrap_or_default().contains("60"));
    }

    #[test]
    fn double_submit_while_in_flight_is_ignored() {
        let mut state = State::default();
        state.handle(Message::ReadingChanged {
            index: 0,
            value: sweep(),
        });
        assert!(matches!(state.handle(Message::Submit), Effect::Classify(_)));
        assert_eq!(state.handle(Message::Submit), Effect::None);
    }

    #[test]
    fn last_row_cannot_be_removed() {
        let mut state = State::default();
        state.handle(Message::RemoveReading(0));
        assert_eq!(state.readings.len(), 1);

        state.handle(Message::AddReading);
        state.handle(Message::RemoveReading(1));
        assert_eq!(state.readings.len(), 1);
    }

    #[test]
    fn completion_stores_results_and_clears_flight() {
        let mut state = State::default();
        state.handle(Message::ReadingChanged {
            index: 0,
            value: sweep(),
        });
        state.handle(Message::Submit);
        state.handle(Message::Completed(Ok(vec![SonarVerdict {
            prediction: "MINE".into(),
            confidence: 97.5,
        }])));

        assert!(!state.in_flight());
        assert_eq!(state.results.len(), 1);
        assert!(state.error.is_none());
    }

    #[test]
    fn endpoint_failure_surfaces_inline() {
        let mut state = State::default();
        state.handle(Message::ReadingChanged {
            index: 0,
            value: sweep(),
        });
        state.handle(Message::Submit);
        state.handle(Message::Completed(Err(SonarError::Endpoint(
            "connection refused".into(),
        ))));

        assert!(!state.in_flight());
        assert!(state
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("connection refused"));
    }
}
