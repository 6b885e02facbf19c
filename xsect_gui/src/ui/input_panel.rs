//! Input Panel (Left)
//!
//! The parameter source: topology picker, dimension fields and material
//! fields. Text is kept exactly as typed in a [`DesignForm`]; the app only
//! swaps its design snapshot when every field parses and validates.

use iced::widget::{column, container, pick_list, row, scrollable, text, text_input, Column, Space};
use iced::{Alignment, Element, Length};

use xsect_core::design::Design;
use xsect_core::errors::{CalcError, CalcResult};
use xsect_core::inputs::{DimensionSet, MaterialSet};
use xsect_core::topology::Topology;

use crate::{App, Message};

/// Editable dimension fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionField {
    TraceWidth,
    TraceHeight,
    GroundThickness,
    CoplanarGap,
    SubstrateWidth,
    SubstrateHeight,
    AirHeight,
}

impl DimensionField {
    pub const ALL: [DimensionField; 7] = [
        DimensionField::TraceWidth,
        DimensionField::TraceHeight,
        DimensionField::GroundThickness,
        DimensionField::CoplanarGap,
        DimensionField::SubstrateWidth,
        DimensionField::SubstrateHeight,
        DimensionField::AirHeight,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DimensionField::TraceWidth => "Trace W (µm):",
            DimensionField::TraceHeight => "Trace T (µm):",
            DimensionField::GroundThickness => "Ground T (µm):",
            DimensionField::CoplanarGap => "Gap (µm):",
            DimensionField::SubstrateWidth => "Sub. W (µm):",
            DimensionField::SubstrateHeight => "Sub. H (µm):",
            DimensionField::AirHeight => "Air H (µm):",
        }
    }

    /// Field name used in validation errors
    pub fn key(&self) -> &'static str {
        match self {
            DimensionField::TraceWidth => "trace_width_um",
            DimensionField::TraceHeight => "trace_height_um",
            DimensionField::GroundThickness => "ground_thickness_um",
            DimensionField::CoplanarGap => "coplanar_gap_um",
            DimensionField::SubstrateWidth => "substrate_width_um",
            DimensionField::SubstrateHeight => "substrate_height_um",
            DimensionField::AirHeight => "air_height_um",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn get(self, dims: &DimensionSet) -> f64 {
        match self {
            DimensionField::TraceWidth => dims.trace_width_um,
            DimensionField::TraceHeight => dims.trace_height_um,
            DimensionField::GroundThickness => dims.ground_thickness_um,
            DimensionField::CoplanarGap => dims.coplanar_gap_um,
            DimensionField::SubstrateWidth => dims.substrate_width_um,
            DimensionField::SubstrateHeight => dims.substrate_height_um,
            DimensionField::AirHeight => dims.air_height_um,
        }
    }

    fn set(self, dims: &mut DimensionSet, value: f64) {
        match self {
            DimensionField::TraceWidth => dims.trace_width_um = value,
            DimensionField::TraceHeight => dims.trace_height_um = value,
            DimensionField::GroundThickness => dims.ground_thickness_um = value,
            DimensionField::CoplanarGap => dims.coplanar_gap_um = value,
            DimensionField::SubstrateWidth => dims.substrate_width_um = value,
            DimensionField::SubstrateHeight => dims.substrate_height_um = value,
            DimensionField::AirHeight => dims.air_height_um = value,
        }
    }

    /// Whether the field changes the drawing for this topology
    pub fn applies_to(&self, topology: Topology) -> bool {
        match self {
            DimensionField::GroundThickness => topology.has_bottom_ground() && topology != Topology::Stripline,
            DimensionField::CoplanarGap => topology.uses_coplanar_gap(),
            _ => true,
        }
    }
}

/// Editable material fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialField {
    EpsilonR,
    LossTangent,
    Conductivity,
}

impl MaterialField {
    pub const ALL: [MaterialField; 3] = [
        MaterialField::EpsilonR,
        MaterialField::LossTangent,
        MaterialField::Conductivity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialField::EpsilonR => "εr:",
            MaterialField::LossTangent => "tan δ:",
            MaterialField::Conductivity => "σ (S/m):",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            MaterialField::EpsilonR => "epsilon_r",
            MaterialField::LossTangent => "loss_tangent",
            MaterialField::Conductivity => "conductivity_s_per_m",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn get(self, materials: &MaterialSet) -> f64 {
        match self {
            MaterialField::EpsilonR => materials.epsilon_r,
            MaterialField::LossTangent => materials.loss_tangent,
            MaterialField::Conductivity => materials.conductivity_s_per_m,
        }
    }

    fn set(self, materials: &mut MaterialSet, value: f64) {
        match self {
            MaterialField::EpsilonR => materials.epsilon_r = value,
            MaterialField::LossTangent => materials.loss_tangent = value,
            MaterialField::Conductivity => materials.conductivity_s_per_m = value,
        }
    }
}

/// Form state: the topology plus every field as raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignForm {
    pub topology: Topology,
    pub dimensions: [String; 7],
    pub materials: [String; 3],
}

impl DesignForm {
    pub fn from_design(design: &Design) -> Self {
        DesignForm {
            topology: design.topology,
            dimensions: DimensionField::ALL.map(|f| f.get(&design.dimensions).to_string()),
            materials: MaterialField::ALL.map(|f| f.get(&design.materials).to_string()),
        }
    }

    pub fn dimension(&self, field: DimensionField) -> &str {
        &self.dimensions[field.index()]
    }

    pub fn material(&self, field: MaterialField) -> &str {
        &self.materials[field.index()]
    }

    pub fn set_dimension(&mut self, field: DimensionField, value: String) {
        self.dimensions[field.index()] = value;
    }

    pub fn set_material(&mut self, field: MaterialField, value: String) {
        self.materials[field.index()] = value;
    }

    /// Parse every field and validate the result as a whole.
    pub fn parse(&self) -> CalcResult<Design> {
        let mut dimensions = DimensionSet::default();
        for field in DimensionField::ALL {
            field.set(&mut dimensions, parse_number(field.key(), self.dimension(field))?);
        }

        let mut materials = MaterialSet::default();
        for field in MaterialField::ALL {
            field.set(&mut materials, parse_number(field.key(), self.material(field))?);
        }

        let design = Design::new(self.topology, dimensions, materials);
        design.validate()?;
        Ok(design)
    }
}

fn parse_number(field: &str, raw: &str) -> CalcResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CalcError::invalid_input(field, raw, "Not a number"))
}

/// Render the input panel
pub fn view_input_panel(app: &App) -> Element<'_, Message> {
    let form = &app.form;

    let topology_row = row![
        text("Topology:").size(11).width(Length::Fixed(90.0)),
        pick_list(&Topology::ALL[..], Some(form.topology), Message::TopologySelected)
            .width(Length::Fill)
            .text_size(11),
    ]
    .align_y(Alignment::Center);

    let mut dimensions = Column::new().spacing(6);
    for field in DimensionField::ALL {
        // Fields the topology ignores stay editable but greyed
        let muted = !field.applies_to(form.topology);
        dimensions = dimensions.push(labeled_input(field.label(), form.dimension(field), muted, move |s| {
            Message::DimensionChanged(field, s)
        }));
    }

    let mut materials = Column::new().spacing(6);
    for field in MaterialField::ALL {
        materials = materials.push(labeled_input(field.label(), form.material(field), false, move |s| {
            Message::MaterialChanged(field, s)
        }));
    }

    let error: Element<'_, Message> = match &app.error_message {
        Some(error) => text(error).size(11).color([0.8, 0.2, 0.2]).into(),
        None => Space::new().height(0).into(),
    };

    let panel = column![
        text("Cross-Section").size(14),
        Space::new().height(8),
        topology_row,
        Space::new().height(10),
        text("Dimensions").size(12),
        dimensions,
        Space::new().height(10),
        text("Materials").size(12),
        materials,
        Space::new().height(10),
        error,
    ]
    .spacing(6);

    container(scrollable(panel.padding(8)))
        .width(Length::FillPortion(30))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

/// Helper to create a labeled text input
fn labeled_input<'a>(
    label: &'a str,
    value: &'a str,
    muted: bool,
    on_change: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let label = text(label).size(11).width(Length::Fixed(90.0));
    let label = if muted { label.color([0.6, 0.6, 0.6]) } else { label };
    row![
        label,
        text_input("", value)
            .on_input(on_change)
            .width(Length::Fill)
            .padding(4)
            .size(11),
    ]
    .align_y(Alignment::Center)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_default_design() {
        let design = Design::default();
        let form = DesignForm::from_design(&design);
        assert_eq!(form.parse().unwrap(), design);
    }

    #[test]
    fn test_unparsable_field_names_itself() {
        let mut form = DesignForm::from_design(&Design::default());
        form.set_dimension(DimensionField::SubstrateHeight, "1.6mm".to_string());
        let err = form.parse().unwrap_err();
        assert_eq!(err.field(), Some("substrate_height_um"));
    }

    #[test]
    fn test_out_of_range_material_rejected() {
        let mut form = DesignForm::from_design(&Design::default());
        form.set_material(MaterialField::EpsilonR, "0.5".to_string());
        assert_eq!(form.parse().unwrap_err().field(), Some("epsilon_r"));
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        let mut form = DesignForm::from_design(&Design::default());
        form.set_dimension(DimensionField::TraceWidth, " 120 ".to_string());
        assert_eq!(form.parse().unwrap().dimensions.trace_width_um, 120.0);
    }

    #[test]
    fn test_field_applicability() {
        assert!(!DimensionField::CoplanarGap.applies_to(Topology::Microstrip));
        assert!(DimensionField::CoplanarGap.applies_to(Topology::GroundedCoplanar));
        assert!(!DimensionField::GroundThickness.applies_to(Topology::Stripline));
        assert!(!DimensionField::GroundThickness.applies_to(Topology::Coplanar));
        assert!(DimensionField::GroundThickness.applies_to(Topology::CoplanarWithGround));
    }
}
