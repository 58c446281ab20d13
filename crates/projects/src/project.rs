use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleetbill_billing::BillingType;
use fleetbill_core::{DomainError, DomainResult, Entity, define_id};
use fleetbill_directory::{CustomerId, VehicleId};
use fleetbill_quotations::QuotationId;

define_id!(
    /// Project identifier.
    ProjectId
);

/// Project status lifecycle: `draft → po_received → active → completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    PoReceived,
    Active,
    Completed,
}

/// A rental/transport project, born from an accepted quotation. Its rates
/// override usage-entry rates during monthly invoicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub number: String,
    pub quotation_id: QuotationId,
    pub customer_id: CustomerId,
    pub billing_type: BillingType,
    pub hourly_rate: Option<Decimal>,
    pub daily_rate: Option<Decimal>,
    pub assigned_vehicle_ids: Vec<VehicleId>,
    pub status: ProjectStatus,
}

impl Project {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProjectId,
        number: impl Into<String>,
        quotation_id: QuotationId,
        customer_id: CustomerId,
        billing_type: BillingType,
        hourly_rate: Option<Decimal>,
        daily_rate: Option<Decimal>,
    ) -> DomainResult<Self> {
        for (name, rate) in [("hourly", hourly_rate), ("daily", daily_rate)] {
            if let Some(rate) = rate
                && rate < Decimal::ZERO
            {
                return Err(DomainError::validation(format!(
                    "{name} rate must not be negative"
                )));
            }
        }
        Ok(Self {
            id,
            number: number.into(),
            quotation_id,
            customer_id,
            billing_type,
            hourly_rate,
            daily_rate,
            assigned_vehicle_ids: Vec::new(),
            status: ProjectStatus::Draft,
        })
    }

    pub fn mark_po_received(&mut self) -> DomainResult<()> {
        self.step(ProjectStatus::Draft, ProjectStatus::PoReceived, "mark po received")
    }

    /// Activation is allowed straight from draft; a purchase order is not a
    /// precondition for starting work.
    pub fn activate(&mut self) -> DomainResult<()> {
        match self.status {
            ProjectStatus::Draft | ProjectStatus::PoReceived => {
                self.status = ProjectStatus::Active;
                Ok(())
            }
            other => Err(invalid_transition(other, "activate")),
        }
    }

    pub fn complete(&mut self) -> DomainResult<()> {
        self.step(ProjectStatus::Active, ProjectStatus::Completed, "complete")
    }

    pub fn assign_vehicle(&mut self, vehicle_id: VehicleId) {
        if !self.assigned_vehicle_ids.contains(&vehicle_id) {
            self.assigned_vehicle_ids.push(vehicle_id);
        }
    }

    fn step(&mut self, from: ProjectStatus, to: ProjectStatus, action: &str) -> DomainResult<()> {
        if self.status != from {
            return Err(invalid_transition(self.status, action));
        }
        self.status = to;
        Ok(())
    }
}

fn invalid_transition(status: ProjectStatus, action: &str) -> DomainError {
    DomainError::conflict(format!("cannot {action} on a {status:?} project"))
}

impl Entity for Project {
    type Id = ProjectId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Project {
        Project::new(
            ProjectId::new(),
            "PRJ-2024-01-000001",
            QuotationId::new(),
            CustomerId::new(),
            BillingType::Hours,
            Some(dec!(51.923)),
            None,
        )
        .unwrap()
    }

    #[test]
    fn lifecycle_via_po() {
        let mut p = sample();
        p.mark_po_received().unwrap();
        p.activate().unwrap();
        p.complete().unwrap();
        assert_eq!(p.status, ProjectStatus::Completed);
    }

    #[test]
    fn activation_without_po_is_allowed() {
        let mut p = sample();
        p.activate().unwrap();
        assert_eq!(p.status, ProjectStatus::Active);
        assert!(p.mark_po_received().is_err());
    }

    #[test]
    fn completed_projects_stay_completed() {
        let mut p = sample();
        p.activate().unwrap();
        p.complete().unwrap();
        assert!(p.activate().is_err());
    }

    #[test]
    fn vehicle_assignment_deduplicates() {
        let mut p = sample();
        let v = VehicleId::new();
        p.assign_vehicle(v);
        p.assign_vehicle(v);
        assert_eq!(p.assigned_vehicle_ids.len(), 1);
    }

    #[test]
    fn negative_rate_is_rejected() {
        let err = Project::new(
            ProjectId::new(),
            "PRJ-X",
            QuotationId::new(),
            CustomerId::new(),
            BillingType::Days,
            None,
            Some(dec!(-1)),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
