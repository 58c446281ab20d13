//! Ready-made in-memory wiring of stores and services.

use std::sync::Arc;

use fleetbill_directory::{Customer, CustomerDirectory, Vehicle, VehicleDirectory, Vendor, VendorDirectory};
use fleetbill_invoicing::{Invoice, Receipt};
use fleetbill_projects::{MonthlyInvoice, Project, UsageEntry};
use fleetbill_purchasing::PurchaseOrder;
use fleetbill_quotations::Quotation;
use fleetbill_store::{InMemoryNumberSequence, InMemorySettingsStore, InMemoryStore, Settings};

use crate::adapters::StoreDirectory;
use crate::documents::DocumentService;
use crate::monthly::MonthlyBilling;
use crate::numbers::DocumentNumbers;
use crate::projects::ProjectService;
use crate::receipts::ReceiptService;

/// All stores and services over in-memory backends: the wiring used by the
/// HTTP surface, tests, and benchmarks. Swapping persistence means building
/// the same services over other `RecordStore` implementations.
pub struct Engine {
    pub customers: Arc<InMemoryStore<Customer>>,
    pub vendors: Arc<InMemoryStore<Vendor>>,
    pub vehicles: Arc<InMemoryStore<Vehicle>>,
    pub quotations: Arc<InMemoryStore<Quotation>>,
    pub purchase_orders: Arc<InMemoryStore<PurchaseOrder>>,
    pub invoices: Arc<InMemoryStore<Invoice>>,
    pub receipts: Arc<InMemoryStore<Receipt>>,
    pub projects: Arc<InMemoryStore<Project>>,
    pub usage: Arc<InMemoryStore<UsageEntry>>,
    pub monthly_invoices: Arc<InMemoryStore<MonthlyInvoice>>,
    pub settings: Arc<InMemorySettingsStore>,

    pub documents: DocumentService,
    pub project_service: ProjectService,
    pub monthly_billing: MonthlyBilling,
    pub receipt_service: ReceiptService,
}

impl Engine {
    pub fn in_memory(settings: Settings) -> Self {
        let customers = Arc::new(InMemoryStore::<Customer>::new());
        let vendors = Arc::new(InMemoryStore::<Vendor>::new());
        let vehicles = Arc::new(InMemoryStore::<Vehicle>::new());
        let quotations = Arc::new(InMemoryStore::<Quotation>::new());
        let purchase_orders = Arc::new(InMemoryStore::<PurchaseOrder>::new());
        let invoices = Arc::new(InMemoryStore::<Invoice>::new());
        let receipts = Arc::new(InMemoryStore::<Receipt>::new());
        let projects = Arc::new(InMemoryStore::<Project>::new());
        let usage = Arc::new(InMemoryStore::<UsageEntry>::new());
        let monthly_invoices = Arc::new(InMemoryStore::<MonthlyInvoice>::new());
        let settings = Arc::new(InMemorySettingsStore::new(settings));

        let customer_directory: Arc<dyn CustomerDirectory> =
            Arc::new(StoreDirectory::new(customers.clone()));
        let vendor_directory: Arc<dyn VendorDirectory> =
            Arc::new(StoreDirectory::new(vendors.clone()));
        let vehicle_directory: Arc<dyn VehicleDirectory> =
            Arc::new(StoreDirectory::new(vehicles.clone()));

        let numbers = Arc::new(DocumentNumbers::new(
            settings.clone(),
            Arc::new(InMemoryNumberSequence::new()),
        ));

        let documents = DocumentService::new(
            quotations.clone(),
            purchase_orders.clone(),
            invoices.clone(),
            customer_directory.clone(),
            vendor_directory,
            numbers.clone(),
            settings.clone(),
        );
        let project_service = ProjectService::new(
            projects.clone(),
            usage.clone(),
            quotations.clone(),
            vehicle_directory.clone(),
            numbers.clone(),
        );
        let monthly_billing = MonthlyBilling::new(
            projects.clone(),
            usage.clone(),
            invoices.clone(),
            monthly_invoices.clone(),
            vehicle_directory,
            numbers.clone(),
        );
        let receipt_service = ReceiptService::new(invoices.clone(), receipts.clone(), numbers);

        Self {
            customers,
            vendors,
            vehicles,
            quotations,
            purchase_orders,
            invoices,
            receipts,
            projects,
            usage,
            monthly_invoices,
            settings,
            documents,
            project_service,
            monthly_billing,
            receipt_service,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::in_memory(Settings::default())
    }
}
