use reqwest::StatusCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = fleetbill_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn decimal(value: &serde_json::Value) -> Decimal {
    serde_json::from_value(value.clone()).expect("expected a decimal field")
}

async fn create_customer(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{base_url}/customers"))
        .json(&json!({ "name": "Gulf Crane Rentals", "phone": "+971-50-1234567" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn quotation_is_priced_per_item() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let customer_id = create_customer(&client, &server.base_url).await;

    let res = client
        .post(format!("{}/quotations", server.base_url))
        .json(&json!({
            "customer_id": customer_id,
            "billing_type": "hours",
            "tax_rate": "5",
            "items": [{
                "description": "prime mover",
                "hours": "250",
                "unit_price": "51.923",
                "tax_pct": "5"
            }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();

    assert_eq!(decimal(&body["subtotal"]), dec!(12980.750));
    assert_eq!(decimal(&body["tax_amount"]), dec!(649.03750));
    assert_eq!(decimal(&body["total"]), dec!(13629.78750));
    assert_eq!(body["status"], "draft");
    assert!(body["number"].as_str().unwrap().starts_with("QUO-"));
}

#[tokio::test]
async fn totals_endpoint_previews_flat_rate() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/billing/totals", server.base_url))
        .json(&json!({
            "billing_type": "hours",
            "policy": "flat_rate",
            "rate": "5",
            "items": [
                { "description": "prime mover", "hours": "500", "unit_price": "51.923" },
                { "description": "trailer", "hours": "500", "unit_price": "51.923" }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(decimal(&body["subtotal"]), dec!(51923.00));
    assert_eq!(decimal(&body["tax_amount"]), dec!(2596.15));
    assert_eq!(decimal(&body["total"]), dec!(54519.15));
}

#[tokio::test]
async fn receipts_reconcile_the_invoice_over_http() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let customer_id = create_customer(&client, &server.base_url).await;

    let res = client
        .post(format!("{}/invoices", server.base_url))
        .json(&json!({
            "customer_id": customer_id,
            "billing_type": "quantity",
            "tax_rate": "0",
            "items": [{ "description": "haulage", "quantity": "1", "unit_price": "1000" }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let invoice: serde_json::Value = res.json().await.unwrap();
    let invoice_id = invoice["id"].as_str().unwrap().to_string();
    assert_eq!(decimal(&invoice["total"]), dec!(1000));

    let res = client
        .post(format!("{}/invoices/{}/receipts", server.base_url, invoice_id))
        .json(&json!({
            "amount": "600",
            "payment_date": "2024-01-20",
            "method": "bank_transfer"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let receipt: serde_json::Value = res.json().await.unwrap();
    assert!(receipt["number"].as_str().unwrap().starts_with("REC-"));

    let res = client
        .get(format!("{}/invoices/{}", server.base_url, invoice_id))
        .send()
        .await
        .unwrap();
    let after_first: serde_json::Value = res.json().await.unwrap();
    assert_eq!(decimal(&after_first["paid_amount"]), dec!(600));
    assert_eq!(after_first["status"], "sent");

    let res = client
        .post(format!("{}/invoices/{}/receipts", server.base_url, invoice_id))
        .json(&json!({
            "amount": "400",
            "payment_date": "2024-01-25",
            "method": "cash"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/invoices/{}", server.base_url, invoice_id))
        .send()
        .await
        .unwrap();
    let after_second: serde_json::Value = res.json().await.unwrap();
    assert_eq!(decimal(&after_second["paid_amount"]), dec!(1000));
    assert_eq!(after_second["status"], "paid");
}

#[tokio::test]
async fn invalid_and_unknown_ids_are_distinguished() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/invoices/not-a-uuid", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!(
            "{}/invoices/00000000-0000-7000-8000-000000000000",
            server.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn monthly_generation_reports_nothing_to_bill() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let customer_id = create_customer(&client, &server.base_url).await;

    let res = client
        .post(format!("{}/quotations", server.base_url))
        .json(&json!({ "customer_id": customer_id, "billing_type": "hours" }))
        .send()
        .await
        .unwrap();
    let quotation: serde_json::Value = res.json().await.unwrap();

    let res = client
        .post(format!("{}/projects", server.base_url))
        .json(&json!({ "quotation_id": quotation["id"], "hourly_rate": "60" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let project: serde_json::Value = res.json().await.unwrap();
    let project_id = project["id"].as_str().unwrap().to_string();

    // No usage recorded yet: informational result, not an error.
    let res = client
        .post(format!(
            "{}/projects/{}/invoices/monthly",
            server.base_url, project_id
        ))
        .json(&json!({ "month": 1, "year": 2024 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["generated"], false);

    // Record usage, then generation produces the invoice.
    let res = client
        .post(format!("{}/projects/{}/usage", server.base_url, project_id))
        .json(&json!({
            "date": "2024-01-10",
            "description": "site haulage",
            "hours": "8"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!(
            "{}/projects/{}/invoices/monthly",
            server.base_url, project_id
        ))
        .json(&json!({ "month": 1, "year": 2024 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["generated"], true);
    assert_eq!(decimal(&body["monthly_invoice"]["subtotal"]), dec!(480));
}
