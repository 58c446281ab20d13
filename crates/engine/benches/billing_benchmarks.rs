use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use fleetbill_billing::{BillingType, LineItem, TaxPolicy, compute_document_totals};
use fleetbill_directory::{Customer, CustomerId};
use fleetbill_engine::{Engine, NewProject, NewQuotation, NewUsageEntry};
use fleetbill_projects::ProjectId;
use fleetbill_store::RecordStore;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap()
}

fn items(n: usize) -> Vec<LineItem> {
    (0..n)
        .map(|i| {
            LineItem::new(
                format!("line {i}"),
                BillingType::Hours,
                dec!(8) + rust_decimal::Decimal::from(i as u64),
                dec!(51.923),
            )
            .with_discount(dec!(5))
            .with_tax(dec!(5))
        })
        .collect()
}

fn bench_document_totals(c: &mut Criterion) {
    let lines = items(100);

    c.bench_function("totals/per_item/100_lines", |b| {
        b.iter(|| compute_document_totals(&lines, BillingType::Hours, &TaxPolicy::PerItem).unwrap())
    });
    c.bench_function("totals/flat_rate/100_lines", |b| {
        b.iter(|| {
            compute_document_totals(&lines, BillingType::Hours, &TaxPolicy::FlatRate(dec!(5)))
                .unwrap()
        })
    });
}

fn engine_with_usage(entries: usize) -> (Engine, ProjectId) {
    let engine = Engine::default();
    let customer = engine
        .customers
        .create(Customer::new(CustomerId::new(), "Gulf Crane Rentals"))
        .unwrap();
    let quotation = engine
        .documents
        .create_quotation(
            NewQuotation {
                customer_id: customer.id,
                valid_until: None,
                billing_type: BillingType::Hours,
                tax_rate: Some(dec!(5)),
                items: vec![],
            },
            now(),
        )
        .unwrap();
    let project = engine
        .project_service
        .create_project(
            NewProject {
                quotation_id: quotation.id,
                hourly_rate: Some(dec!(60)),
                daily_rate: None,
            },
            now(),
        )
        .unwrap();

    for i in 0..entries {
        engine
            .project_service
            .record_usage(NewUsageEntry {
                project_id: project.id,
                vehicle_id: None,
                date: NaiveDate::from_ymd_opt(2024, 1, 1 + (i % 28) as u32).unwrap(),
                description: "site haulage".to_string(),
                location: None,
                hours: Some(dec!(8)),
                days: None,
                rate: None,
            })
            .unwrap();
    }
    (engine, project.id)
}

fn bench_monthly_generation(c: &mut Criterion) {
    c.bench_function("monthly_generation/200_entries", |b| {
        b.iter_batched(
            || engine_with_usage(200),
            |(engine, project_id)| {
                engine
                    .monthly_billing
                    .generate(&project_id, 1, 2024, dec!(5), now())
                    .unwrap()
                    .unwrap()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_document_totals, bench_monthly_generation);
criterion_main!(benches);
