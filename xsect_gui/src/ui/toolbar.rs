//! Toolbar component
//!
//! Zoom controls, view reset and drawing toggles.

use iced::widget::{button, checkbox, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use xsect_core::render::RenderStyle;

use crate::Message;

/// Render the toolbar
pub fn view_toolbar(style: &RenderStyle, zoom: f64) -> Element<'static, Message> {
    let view_buttons = row![
        button(text("Zoom In").size(11))
            .on_press(Message::ZoomIn)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
        button(text("Zoom Out").size(11))
            .on_press(Message::ZoomOut)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
        button(text("Reset View").size(11))
            .on_press(Message::ResetView)
            .padding(Padding::from([4, 8]))
            .style(button::primary),
        text(format!("{:.0}%", zoom * 100.0)).size(11),
    ]
    .spacing(4)
    .align_y(Alignment::Center);

    let toggles = row![
        checkbox(style.show_grid)
            .label("Grid")
            .on_toggle(Message::ToggleGrid)
            .text_size(11),
        checkbox(style.show_annotations)
            .label("Dimensions")
            .on_toggle(Message::ToggleAnnotations)
            .text_size(11),
    ]
    .spacing(12);

    row![
        text("XSect").size(22),
        Space::new().width(16),
        view_buttons,
        Space::new().width(Length::Fill),
        toggles,
    ]
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}
