//! Results Panel (Below the drawing)
//!
//! Shows the impedance estimate for the current design snapshot and the
//! propagation characteristics derived from it. Non-finite values are shown
//! as they are, with a note, instead of being hidden.

use iced::widget::{column, container, row, text, Column, Space};
use iced::{Alignment, Element, Length};

use crate::{App, Message};

/// Render the results panel
pub fn view_results_panel(app: &App) -> Element<'_, Message> {
    let estimate = &app.derived.estimate;
    let chars = &app.characteristics;

    let mut summary: Column<'_, Message> = column![
        row![
            text("Z0").size(12).width(Length::Fixed(60.0)),
            text(format!("{:.2} Ω", estimate.z0_ohms)).size(20),
        ]
        .align_y(Alignment::Center),
        result_row("εeff", format!("{:.3}", estimate.effective_permittivity)),
        result_row("w/h", format!("{:.4}", estimate.w_h)),
        result_row("Method", estimate.method.display_name().to_string()),
    ]
    .spacing(4);

    if estimate.method.is_placeholder() {
        summary = summary.push(
            text("Reference value only, not computed from the geometry")
                .size(10)
                .color([0.6, 0.4, 0.0]),
        );
    }
    if !estimate.is_finite() {
        summary = summary.push(
            text("Degenerate geometry: the estimate is not a finite number")
                .size(10)
                .color([0.8, 0.2, 0.2]),
        );
    }

    let propagation = column![
        text(format!("At {:.3} GHz", chars.frequency_hz / 1e9)).size(12),
        result_row("Velocity", format!("{:.3} c", chars.velocity_factor)),
        result_row("Delay", format!("{:.2} ps/mm", chars.delay_ps_per_mm)),
        result_row("λ guided", format!("{:.2} mm", chars.wavelength_mm)),
        result_row("Skin depth", format!("{:.2} µm", chars.skin_depth_um)),
        result_row("Loss (cond.)", format!("{:.2} dB/m", chars.conductor_loss_db_per_m)),
        result_row("Loss (diel.)", format!("{:.2} dB/m", chars.dielectric_loss_db_per_m)),
        result_row("Loss total", format!("{:.2} dB/m", chars.total_loss_db_per_m)),
    ]
    .spacing(4);

    let content = row![
        summary.width(Length::FillPortion(1)),
        Space::new().width(16),
        propagation.width(Length::FillPortion(1)),
    ];

    container(content.padding(8))
        .width(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn result_row(label: &str, value: String) -> Element<'_, Message> {
    row![
        text(label).size(11).width(Length::Fixed(80.0)).color([0.4, 0.4, 0.4]),
        text(value).size(11),
    ]
    .align_y(Alignment::Center)
    .into()
}
