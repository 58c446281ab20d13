//! Project management and the usage ledger's write side.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use fleetbill_billing::{BillingType, DocumentKind};
use fleetbill_core::{DomainError, DomainResult};
use fleetbill_directory::{VehicleDirectory, VehicleId};
use fleetbill_projects::{Project, ProjectId, UsageEntry, UsageEntryId};
use fleetbill_quotations::{Quotation, QuotationId};

use crate::SharedStore;
use crate::numbers::DocumentNumbers;

pub struct NewProject {
    pub quotation_id: QuotationId,
    pub hourly_rate: Option<Decimal>,
    pub daily_rate: Option<Decimal>,
}

pub struct NewUsageEntry {
    pub project_id: ProjectId,
    pub vehicle_id: Option<VehicleId>,
    pub date: NaiveDate,
    pub description: String,
    pub location: Option<String>,
    pub hours: Option<Decimal>,
    pub days: Option<Decimal>,
    /// Falls back to the project rate matching its billing type.
    pub rate: Option<Decimal>,
}

/// Creates projects from quotations and records usage against them.
pub struct ProjectService {
    projects: SharedStore<Project>,
    usage: SharedStore<UsageEntry>,
    quotations: SharedStore<Quotation>,
    vehicles: Arc<dyn VehicleDirectory>,
    numbers: Arc<DocumentNumbers>,
}

impl ProjectService {
    pub fn new(
        projects: SharedStore<Project>,
        usage: SharedStore<UsageEntry>,
        quotations: SharedStore<Quotation>,
        vehicles: Arc<dyn VehicleDirectory>,
        numbers: Arc<DocumentNumbers>,
    ) -> Self {
        Self {
            projects,
            usage,
            quotations,
            vehicles,
            numbers,
        }
    }

    /// Projects are born from a quotation and inherit its customer and
    /// billing type.
    pub fn create_project(&self, req: NewProject, now: DateTime<Utc>) -> DomainResult<Project> {
        let quotation = self
            .quotations
            .get(&req.quotation_id)
            .ok_or(DomainError::NotFound)?;
        let project = Project::new(
            ProjectId::new(),
            self.numbers.generate(DocumentKind::Project, now),
            quotation.id,
            quotation.customer_id,
            quotation.billing_type,
            req.hourly_rate,
            req.daily_rate,
        )?;
        tracing::info!(project = %project.number, "project created");
        self.projects.create(project)
    }

    pub fn mark_po_received(&self, id: &ProjectId) -> DomainResult<Project> {
        self.projects.update(id, &|p| p.mark_po_received())
    }

    pub fn activate(&self, id: &ProjectId) -> DomainResult<Project> {
        self.projects.update(id, &|p| p.activate())
    }

    pub fn complete(&self, id: &ProjectId) -> DomainResult<Project> {
        self.projects.update(id, &|p| p.complete())
    }

    pub fn assign_vehicle(&self, id: &ProjectId, vehicle_id: VehicleId) -> DomainResult<Project> {
        self.vehicles
            .get(&vehicle_id)
            .ok_or(DomainError::NotFound)?;
        self.projects.update(id, &|p| {
            p.assign_vehicle(vehicle_id);
            Ok(())
        })
    }

    pub fn record_usage(&self, req: NewUsageEntry) -> DomainResult<UsageEntry> {
        let project = self
            .projects
            .get(&req.project_id)
            .ok_or(DomainError::NotFound)?;
        if let Some(vehicle_id) = req.vehicle_id {
            self.vehicles
                .get(&vehicle_id)
                .ok_or(DomainError::NotFound)?;
        }

        let rate = req.rate.unwrap_or_else(|| match project.billing_type {
            BillingType::Hours => project.hourly_rate.unwrap_or(Decimal::ZERO),
            BillingType::Days => project.daily_rate.unwrap_or(Decimal::ZERO),
            BillingType::Quantity => Decimal::ZERO,
        });

        let mut entry = UsageEntry::new(
            UsageEntryId::new(),
            req.project_id,
            req.vehicle_id,
            req.date,
            req.description,
            req.hours,
            req.days,
            rate,
        )?;
        if let Some(location) = req.location {
            entry = entry.with_location(location);
        }
        self.usage.create(entry)
    }

    /// Ledger view for one project, oldest first.
    pub fn usage_for(&self, project_id: &ProjectId) -> Vec<UsageEntry> {
        let mut entries: Vec<UsageEntry> = self
            .usage
            .all()
            .into_iter()
            .filter(|e| e.project_id == *project_id)
            .collect();
        entries.sort_by_key(|e| (e.date, *e.id.as_uuid()));
        entries
    }
}
