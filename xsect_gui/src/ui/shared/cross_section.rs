//! Cross-section canvas
//!
//! Hosts the core renderer on an iced canvas and turns mouse input into
//! [`CanvasEvent`]s for the interaction controller. The canvas itself holds
//! no view state: zoom and pan live in the controller owned by the app.

use iced::mouse;
use iced::widget::canvas::{self, Action, Cache, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use xsect_core::geometry::{SurfacePoint, SurfaceSize};
use xsect_core::interaction::InteractionController;
use xsect_core::layout::Region;
use xsect_core::render::{render, RenderStyle, Rgba, Surface, TextAlign};

use crate::{CanvasEvent, Message};

/// Pixel wheel deltas (trackpads) per wheel line
const PIXELS_PER_LINE: f64 = 40.0;

/// Canvas program for the cross-section drawing
pub struct CrossSection<'a> {
    regions: &'a [Region],
    controller: &'a InteractionController,
    style: &'a RenderStyle,
    cache: &'a Cache,
}

/// Build the canvas element
pub fn view<'a>(
    regions: &'a [Region],
    controller: &'a InteractionController,
    style: &'a RenderStyle,
    cache: &'a Cache,
) -> Element<'a, Message> {
    canvas::Canvas::new(CrossSection {
        regions,
        controller,
        style,
        cache,
    })
    .width(Length::Fill)
    .height(Length::FillPortion(3))
    .into()
}

fn surface_size(size: Size) -> SurfaceSize {
    SurfaceSize::new(size.width as f64, size.height as f64)
}

fn surface_point(p: Point) -> SurfacePoint {
    SurfacePoint::new(p.x as f64, p.y as f64)
}

impl CrossSection<'_> {
    fn publish(&self, bounds: Rectangle, event: CanvasEvent) -> Option<Action<Message>> {
        Some(
            Action::publish(Message::Canvas {
                viewport: surface_size(bounds.size()),
                event,
            })
            .and_capture(),
        )
    }
}

impl canvas::Program<Message> for CrossSection<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        let canvas::Event::Mouse(mouse_event) = event else {
            return None;
        };
        let dragging = self.controller.is_dragging();

        match mouse_event {
            mouse::Event::WheelScrolled { delta } => {
                let anchor = cursor.position_in(bounds)?;
                let lines = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => *y as f64,
                    mouse::ScrollDelta::Pixels { y, .. } => *y as f64 / PIXELS_PER_LINE,
                };
                self.publish(
                    bounds,
                    CanvasEvent::Wheel {
                        anchor: surface_point(anchor),
                        lines,
                    },
                )
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let at = cursor.position_in(bounds)?;
                self.publish(bounds, CanvasEvent::DragStart(surface_point(at)))
            }
            mouse::Event::CursorMoved { .. } if dragging => {
                // Keep panning when the pointer leaves the canvas mid-drag
                let at = cursor.position()?;
                let local = Point::new(at.x - bounds.x, at.y - bounds.y);
                self.publish(bounds, CanvasEvent::DragMove(surface_point(local)))
            }
            mouse::Event::CursorMoved { .. } => {
                let at = cursor.position_in(bounds).map(surface_point);
                Some(Action::publish(Message::Canvas {
                    viewport: surface_size(bounds.size()),
                    event: CanvasEvent::Hover(at),
                }))
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if dragging => {
                self.publish(bounds, CanvasEvent::DragEnd)
            }
            mouse::Event::CursorLeft => Some(Action::publish(Message::Canvas {
                viewport: surface_size(bounds.size()),
                event: CanvasEvent::Hover(None),
            })),
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            // The controller may not have seen this size yet
            let mut transform = self.controller.transform().clone();
            transform.set_origin(surface_size(bounds.size()).center());

            let mut surface = FrameSurface { frame };
            render(&mut surface, self.regions, &transform, self.style);
        });
        vec![geometry]
    }

    fn mouse_interaction(&self, _state: &Self::State, bounds: Rectangle, cursor: mouse::Cursor) -> mouse::Interaction {
        if self.controller.is_dragging() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

/// [`Surface`] adapter over an iced canvas frame
struct FrameSurface<'a> {
    frame: &'a mut Frame,
}

fn color(c: Rgba) -> Color {
    Color::from_rgba(c.r, c.g, c.b, c.a)
}

fn point(p: SurfacePoint) -> Point {
    Point::new(p.x as f32, p.y as f32)
}

impl Surface for FrameSurface<'_> {
    fn size(&self) -> SurfaceSize {
        surface_size(self.frame.size())
    }

    fn clear(&mut self, c: Rgba) {
        let size = self.frame.size();
        self.frame.fill_rectangle(Point::ORIGIN, size, color(c));
    }

    fn fill_rect(&mut self, top_left: SurfacePoint, size: SurfaceSize, c: Rgba) {
        self.frame.fill_rectangle(
            point(top_left),
            Size::new(size.width as f32, size.height as f32),
            color(c),
        );
    }

    fn stroke_rect(&mut self, top_left: SurfacePoint, size: SurfaceSize, c: Rgba, width: f64) {
        let rect = Path::rectangle(point(top_left), Size::new(size.width as f32, size.height as f32));
        self.frame
            .stroke(&rect, Stroke::default().with_color(color(c)).with_width(width as f32));
    }

    fn fill_circle(&mut self, center: SurfacePoint, radius: f64, c: Rgba) {
        let circle = Path::circle(point(center), radius as f32);
        self.frame.fill(&circle, color(c));
    }

    fn line(&mut self, from: SurfacePoint, to: SurfacePoint, c: Rgba, width: f64) {
        let line = Path::line(point(from), point(to));
        self.frame
            .stroke(&line, Stroke::default().with_color(color(c)).with_width(width as f32));
    }

    fn text(&mut self, at: SurfacePoint, content: &str, size: f64, c: Rgba, align: TextAlign) {
        let align_x = match align {
            TextAlign::Start => iced::alignment::Horizontal::Left,
            TextAlign::Center => iced::alignment::Horizontal::Center,
            TextAlign::End => iced::alignment::Horizontal::Right,
        };
        self.frame.fill_text(Text {
            content: content.to_string(),
            position: point(at),
            color: color(c),
            size: iced::Pixels(size as f32),
            align_x: align_x.into(),
            ..Text::default()
        });
    }
}
