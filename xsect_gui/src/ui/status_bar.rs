//! Status Bar (Bottom)
//!
//! Displays:
//! - Zoom level
//! - Cursor position in physical coordinates
//! - Status messages

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use xsect_core::geometry::Point;
use xsect_core::units::Micrometers;

use crate::Message;

/// Render the status bar
pub fn view_status_bar(zoom: f64, cursor_um: Option<Point>, status: &str) -> Element<'_, Message> {
    let cursor_info = match cursor_um {
        Some(p) => format!("x: {}  y: {}", Micrometers(p.x), Micrometers(p.y)),
        None => String::new(),
    };

    row![
        text(format!("Zoom {:.0}%", zoom * 100.0)).size(10),
        Space::new().width(16),
        text(cursor_info).size(10).color([0.4, 0.4, 0.4]),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
