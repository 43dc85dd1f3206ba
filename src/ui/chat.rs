// SPDX-License-Identifier: MPL-2.0
//! Sentral chat panel.
//!
//! A canned-reply widget: operator messages get a templated summary of the
//! current detection report after a short think delay. No model, no
//! network.

use crate::detection::DetectionReport;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theme;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Operator,
    Sentral,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Send,
    /// The think delay elapsed; produce the canned reply.
    ReplyReady,
}

/// Effects produced by the chat panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Schedule a `ReplyReady` delivery after the think delay.
    QueueReply,
}

#[derive(Debug, Default)]
pub struct State {
    messages: Vec<ChatMessage>,
    input: String,
}

impl State {
    /// Handles a chat message. The report backs the canned reply; `None`
    /// falls back to the analyzing placeholder.
    pub fn handle(&mut self, msg: Message, report: Option<&DetectionReport>) -> Effect {
        match msg {
            Message::InputChanged(value) => {
                self.input = value;
                Effect::None
            }
            Message::Send => {
                if self.input.trim().is_empty() {
                    return Effect::None;
                }
                self.messages.push(ChatMessage {
                    text: std::mem::take(&mut self.input),
                    sender: Sender::Operator,
                    timestamp: chrono::Local::now(),
                });
                Effect::QueueReply
            }
            Message::ReplyReady => {
                let reply = report
                    .map(DetectionReport::briefing)
                    .unwrap_or_else(|| "Analyzing feed data...".to_string());
                self.messages.push(ChatMessage {
                    text: reply,
                    sender: Sender::Sentral,
                    timestamp: chrono::Local::now(),
                });
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = container(
            text("Sentral AI")
                .size(typography::TITLE_SM)
                .color(palette::WHITE),
        )
        .padding(spacing::MD)
        .width(Length::Fill);

        let mut feed = column![].spacing(spacing::MD).padding(spacing::MD);
        for message in &self.messages {
            feed = feed.push(bubble(message));
        }

        let transcript = scrollable(feed).height(Length::Fill).width(Length::Fill);

        let composer = row![
            text_input("Message Sentral...", &self.input)
                .on_input(Message::InputChanged)
                .on_submit(Message::Send)
                .size(typography::BODY)
                .padding(spacing::XS),
            button(text("Send").size(typography::BODY))
                .on_press(Message::Send)
                .style(styles::button::primary)
                .padding([spacing::XS, spacing::MD]),
        ]
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);

        column![
            header,
            transcript,
            container(composer).padding(spacing::MD).width(Length::Fill)
        ]
        .height(Length::Fill)
        .into()
    }
}

fn bubble(message: &ChatMessage) -> Element<'_, Message> {
    let from_operator = message.sender == Sender::Operator;

    let body = container(
        text(&message.text)
            .size(typography::BODY)
            .color(palette::WHITE),
    )
    .padding(spacing::SM)
    .max_width(420.0)
    .style(styles::container::chat_bubble(from_operator));

    let meta = text(format!(
        "{} • {}",
        if from_operator { "You" } else { "Sentral" },
        message.timestamp.format("%H:%M:%S")
    ))
    .size(typography::CAPTION)
    .color(theme::dim_text_color());

    let stackup = column![body, meta].spacing(spacing::XXS);

    if from_operator {
        row![Space::new().width(Length::Fill).height(Length::Shrink), stackup].into()
    } else {
        row![stackup, Space::new().width(Length::Fill).height(Length::Shrink)].into()
    }
}

/// Share of the detail page given to the chat panel.
pub const PANEL_PORTION: u16 = sizing::CHAT_PANEL_PORTION;

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> DetectionReport {
        serde_json::from_str(
            r#"{"unique_objects": {"person": 3, "car": 1}, "video_info": {}}"#,
        )
        .expect("report parses")
    }

    #[test]
    fn sending_queues_a_reply_and_clears_input() {
        let mut state = State::default();
        state.handle(Message::InputChanged("status report".into()), None);

        let effect = state.handle(Message::Send, None);
        assert_eq!(effect, Effect::QueueReply);
        assert!(state.input.is_empty());
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].sender, Sender::Operator);
    }

    #[test]
    fn blank_input_is_not_sent() {
        let mut state = State::default();
        state.handle(Message::InputChanged("   ".into()), None);
        assert_eq!(state.handle(Message::Send, None), Effect::None);
        assert!(state.messages().is_empty());
    }

    #[test]
    fn reply_uses_report_briefing() {
        let mut state = State::default();
        let report = report();
        state.handle(Message::InputChanged("what do you see".into()), Some(&report));
        state.handle(Message::Send, Some(&report));
        state.handle(Message::ReplyReady, Some(&report));

        let reply = &state.messages()[1];
        assert_eq!(reply.sender, Sender::Sentral);
        assert!(reply.text.contains("4 objects"));
        assert!(reply.text.contains("person (3)"));
    }

    #[test]
    fn reply_without_report_falls_back() {
        let mut state = State::default();
        state.handle(Message::InputChanged("anything?".into()), None);
        state.handle(Message::Send, None);
        state.handle(Message::ReplyReady, None);

        assert_eq!(state.messages()[1].text, "Analyzing feed data...");
    }
}
