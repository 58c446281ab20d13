use serde::{Deserialize, Serialize};

use fleetbill_core::{Entity, define_id};

define_id!(
    /// Vehicle identifier.
    VehicleId
);

/// Vehicle availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Assigned,
    Maintenance,
}

/// A fleet vehicle. Its name/plate ends up on usage-derived invoice lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub plate_number: Option<String>,
    pub status: VehicleStatus,
}

impl Vehicle {
    pub fn new(id: VehicleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            plate_number: None,
            status: VehicleStatus::Available,
        }
    }

    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.plate_number = Some(plate.into());
        self
    }

    /// Label used on invoice line descriptions.
    pub fn label(&self) -> String {
        match &self.plate_number {
            Some(plate) => format!("{} ({plate})", self.name),
            None => self.name.clone(),
        }
    }
}

impl Entity for Vehicle {
    type Id = VehicleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read-only vehicle lookup used by the engine.
pub trait VehicleDirectory: Send + Sync {
    fn get(&self, id: &VehicleId) -> Option<Vehicle>;
}

impl<D> VehicleDirectory for std::sync::Arc<D>
where
    D: VehicleDirectory + ?Sized,
{
    fn get(&self, id: &VehicleId) -> Option<Vehicle> {
        (**self).get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_includes_plate_when_present() {
        let id = VehicleId::new();
        let bare = Vehicle::new(id, "Actros 2645");
        assert_eq!(bare.label(), "Actros 2645");
        let plated = Vehicle::new(id, "Actros 2645").with_plate("TC-5512");
        assert_eq!(plated.label(), "Actros 2645 (TC-5512)");
    }
}
