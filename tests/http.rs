mod common;

use common::{dead_url, loaded_state, serve, MockBackend};
use reqwest::{redirect::Policy, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct Row {
    name: String,
    description: String,
    date: String,
    completed: String,
    notes: String,
}

fn client() -> Client {
    Client::builder().redirect(Policy::none()).build().unwrap()
}

async fn dashboard_for(backend: &MockBackend) -> String {
    let api_url = backend.serve().await;
    let state = loaded_state(&api_url).await;
    serve(habit_board::router(state)).await
}

async fn table(base_url: &str) -> Vec<Row> {
    client()
        .get(format!("{base_url}/api/table"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_index_renders_habits_and_placeholders() {
    let backend = MockBackend::with_habits(&["Read", "Walk"]);
    let base_url = dashboard_for(&backend).await;

    let resp = client().get(&base_url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Read every day"));
    assert!(body.contains(r#"action="/habits/1/delete""#));
    assert!(body.contains("No saved records."));

    let rows = table(&base_url).await;
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Walk", "Read"]);
    assert!(rows.iter().all(|r| r.date == "-" && r.notes == "-" && r.completed == "❌"));
}

#[tokio::test]
async fn http_create_habit_prepends_and_redirects() {
    let backend = MockBackend::with_habits(&["Walk"]);
    let base_url = dashboard_for(&backend).await;

    let resp = client()
        .post(format!("{base_url}/habits"))
        .form(&[("name", "Read"), ("description", "Daily reading"), ("frequency", "Diaria")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let rows = table(&base_url).await;
    assert_eq!(rows[0].name, "Read");
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn http_duplicate_habit_keeps_form_and_skips_backend() {
    let backend = MockBackend::with_habits(&["Read"]);
    let base_url = dashboard_for(&backend).await;
    backend.clear_hits();

    let resp = client()
        .post(format!("{base_url}/habits"))
        .form(&[("name", "READ"), ("description", "Again"), ("frequency", "Semanal")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.unwrap();
    assert!(body.contains("A habit with that name already exists."));
    assert!(body.contains(r#"value="READ""#));
    assert!(backend.hits().is_empty());
}

#[tokio::test]
async fn http_edit_and_delete_flow() {
    let backend = MockBackend::with_habits(&["Read", "Walk"]);
    let base_url = dashboard_for(&backend).await;

    let page = client()
        .get(format!("{base_url}/?edit=2"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"action="/habits/2/edit""#));

    let resp = client()
        .post(format!("{base_url}/habits/2/edit"))
        .form(&[("name", "read"), ("description", "x"), ("frequency", "Diaria")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = client()
        .post(format!("{base_url}/habits/2/edit"))
        .form(&[("name", "Long walk"), ("description", "x"), ("frequency", "Mensual")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(table(&base_url).await[0].name, "Long walk");

    let resp = client()
        .post(format!("{base_url}/habits/1/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let rows = table(&base_url).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Long walk");
}

#[tokio::test]
async fn http_record_flows_into_table() {
    let backend = MockBackend::with_habits(&["Read"]);
    backend.set_records(json!([]));
    let base_url = dashboard_for(&backend).await;

    let resp = client()
        .post(format!("{base_url}/records"))
        .form(&[("habit_id", "0"), ("date", "2026-05-01"), ("completed", "true"), ("notes", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains("Select a habit before saving."));

    let resp = client()
        .post(format!("{base_url}/records"))
        .form(&[("habit_id", "1"), ("date", "2026-05-01"), ("completed", "true"), ("notes", "ten pages")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let rows = table(&base_url).await;
    assert_eq!(rows[0].date, "2026-05-01");
    assert_eq!(rows[0].completed, "✅");
    assert_eq!(rows[0].notes, "ten pages");
}

#[tokio::test]
async fn http_blank_habit_choice_shows_inline_banner() {
    let backend = MockBackend::with_habits(&["Read"]);
    let base_url = dashboard_for(&backend).await;
    backend.clear_hits();

    let resp = client()
        .post(format!("{base_url}/records"))
        .form(&[("habit_id", ""), ("date", "2026-05-01"), ("completed", "true"), ("notes", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Select a habit before saving."));
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(backend.hits().is_empty());
}

#[tokio::test]
async fn http_table_uses_first_record_in_backend_order() {
    let backend = MockBackend::with_habits(&["Read"]);
    backend.set_records(json!([
        {"id": 1, "habito_id": 1, "fecha": "2026-02-01", "completado": false, "notas": "first listed"},
        {"id": 2, "habito_id": 1, "fecha": "2026-02-02", "completado": true, "notas": "second listed"}
    ]));
    let base_url = dashboard_for(&backend).await;

    let rows = table(&base_url).await;
    assert_eq!(rows[0].date, "2026-02-01");
    assert_eq!(rows[0].notes, "first listed");
    assert_eq!(rows[0].completed, "❌");

    let page = client().get(&base_url).send().await.unwrap().text().await.unwrap();
    let newer = page.find("Notes: second listed").unwrap();
    let older = page.find("Notes: first listed").unwrap();
    assert!(newer < older);
}

#[tokio::test]
async fn http_habit_with_null_description_still_lists() {
    let backend = MockBackend::default();
    backend.set_habits(json!([
        {"id": 1, "nombre": "Read", "descripcion": null, "meta_frecuencia": "Diaria"},
        {"id": 2, "nombre": "Walk", "descripcion": "Park", "meta_frecuencia": "Semanal"}
    ]));
    let base_url = dashboard_for(&backend).await;

    let rows = table(&base_url).await;
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Walk", "Read"]);
    assert_eq!(rows[1].description, "-");
}

#[tokio::test]
async fn http_refresh_picks_up_backend_changes() {
    let backend = MockBackend::with_habits(&["Read"]);
    let base_url = dashboard_for(&backend).await;
    assert_eq!(table(&base_url).await[0].date, "-");

    backend.set_records(json!([{"habito_id": 1, "fecha": "2026-07-07", "completado": false, "notas": "skipped"}]));
    let resp = client()
        .post(format!("{base_url}/table/refresh"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let rows = table(&base_url).await;
    assert_eq!(rows[0].date, "2026-07-07");
    assert_eq!(rows[0].completed, "❌");
    assert_eq!(rows[0].notes, "skipped");
}

#[tokio::test]
async fn http_backend_down_surfaces_generic_message() {
    let state = loaded_state(&dead_url().await).await;
    let base_url = serve(habit_board::router(state)).await;

    let page = client().get(&base_url).send().await.unwrap().text().await.unwrap();
    assert!(page.contains("Connection error with the backend."));

    let resp = client()
        .post(format!("{base_url}/habits"))
        .form(&[("name", "Read"), ("description", "Daily reading"), ("frequency", "Diaria")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = resp.text().await.unwrap();
    assert!(body.contains("An error occurred while creating the habit."));
    assert!(body.contains(r#"value="Daily reading""#));
}

#[tokio::test]
async fn http_storefront_pages() {
    let backend = MockBackend::default();
    let base_url = dashboard_for(&backend).await;

    let checkout = client()
        .get(format!("{base_url}/checkout"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(checkout.contains("3 items"));
    assert!(checkout.contains("$115"));
    assert!(checkout.contains(r#"href="/orders/123""#));

    let order = client()
        .get(format!("{base_url}/orders/123"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(order.contains("Order #123"));
    assert!(order.contains("Paid"));

    let slides = client()
        .get(format!("{base_url}/products/quilted_shirt_jacket"))
        .send()
        .await
        .unwrap();
    assert_eq!(slides.status(), StatusCode::OK);
    assert!(slides.text().await.unwrap().contains(r#"data-delay="3500""#));

    let missing = client()
        .get(format!("{base_url}/products/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
