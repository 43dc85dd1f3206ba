// SPDX-License-Identifier: MPL-2.0
//! Animated spinner widget using Canvas for smooth rotation.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::TAU;

/// Fraction of the full circle covered by the rotating arc.
const ARC_SWEEP: f32 = 0.4;

/// Line segments used to approximate the arc.
const ARC_SEGMENTS: u32 = 24;

/// Spinner that sweeps a bright arc over a faint track. The host advances
/// `rotation` on its animation tick; the widget itself holds no clock.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
    stroke_width: f32,
}

impl AnimatedSpinner {
    /// Creates a spinner at the standard placeholder size.
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::ICON_XL,
            stroke_width: 3.0,
        }
    }

    /// Shrinks the spinner for inline use, e.g. inside a button label.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.size = sizing::ICON_SM;
        self.stroke_width = 2.0;
        self
    }

    /// Creates a Canvas widget from this spinner.
    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }

    fn point_at(center: Point, radius: f32, angle: f32) -> Point {
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - self.stroke_width;

                // Faint full track under the sweeping arc.
                let track = Path::circle(center, radius);
                frame.stroke(
                    &track,
                    Stroke::default()
                        .with_width(self.stroke_width)
                        .with_color(Color {
                            a: 0.25,
                            ..self.color
                        }),
                );

                // The arc starts at the top when rotation is zero.
                let start = self.rotation - TAU / 4.0;
                let sweep = TAU * ARC_SWEEP;

                let mut arc = canvas::path::Builder::new();
                arc.move_to(Self::point_at(center, radius, start));
                for i in 1..=ARC_SEGMENTS {
                    let angle = start + sweep * (i as f32 / ARC_SEGMENTS as f32);
                    arc.line_to(Self::point_at(center, radius, angle));
                }

                frame.stroke(
                    &arc.build(),
                    Stroke::default()
                        .with_width(self.stroke_width)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}
