use std::{fs, path::Path};

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use server::{AppState, app, config::Config, database::read_records, error::SERVER_ERROR};
use tokio::net::TcpListener;

const MENU: &str = r#"{
    "milk tea": [
        {"name": "Classic", "price": 4.50, "image": "imgs/classic.png"},
        {"name": "Taro", "price": 5.00}
    ],
    "fruit tea": [
        {"name": "Mango", "price": 5.25}
    ]
}"#;

const CUSTOMIZATIONS: &str = r#"{
    "iceLevels": ["Regular Ice", "Less Ice"],
    "sugarLevels": ["100%", "50%"],
    "toppings": [{"name": "Boba", "price": 0.75}]
}"#;

async fn spawn(dir: &Path) -> String {
    let state = AppState::new(Config::with_data_dir(dir));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("serve");
    });

    format!("http://{address}")
}

fn seeded() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("menu.json"), MENU).expect("write menu");
    fs::write(dir.path().join("customizations.json"), CUSTOMIZATIONS).expect("write customizations");
    dir
}

#[tokio::test]
async fn menu_and_products_serve_the_same_document() {
    let dir = seeded();
    let base = spawn(dir.path()).await;

    let menu: Value = reqwest::get(format!("{base}/menu")).await.unwrap().json().await.unwrap();
    let products: Value = reqwest::get(format!("{base}/products"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(menu, products);
    let keys: Vec<&String> = menu.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["milk tea", "fruit tea"]);
    assert_eq!(menu["milk tea"][0]["price"], 4.5);
}

#[tokio::test]
async fn category_lookup_ignores_case_and_underscores() {
    let dir = seeded();
    let base = spawn(dir.path()).await;

    let items: Value = reqwest::get(format!("{base}/menu/Milk_Tea"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(items.as_array().unwrap().len(), 2);

    let response = reqwest::get(format!("{base}/products/smoothies")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), SERVER_ERROR);
}

#[tokio::test]
async fn missing_files_serve_empty_documents() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn(dir.path()).await;

    let menu: Value = reqwest::get(format!("{base}/menu")).await.unwrap().json().await.unwrap();
    assert_eq!(menu, json!({}));

    let catalog: Value = reqwest::get(format!("{base}/customizations"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(catalog, json!({"iceLevels": [], "sugarLevels": [], "toppings": []}));
}

#[tokio::test]
async fn reviews_are_validated_and_stored() {
    let dir = seeded();
    let base = spawn(dir.path()).await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/reviews"))
        .json(&json!({"name": "Ann", "rating": "5", "message": "great boba"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(format!("{base}/reviews"))
        .json(&json!({"name": "Ann", "rating": 0, "message": "?"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let records = read_records(&dir.path().join("reviews.json")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["message"], "great boba");
}

#[tokio::test]
async fn orders_are_stored_with_totals() {
    let dir = seeded();
    let base = spawn(dir.path()).await;
    let client = Client::new();

    let order = json!([{
        "name": "Classic",
        "price": 4.5,
        "finalPrice": 5.25,
        "customization": {
            "iceLevel": "Less Ice",
            "sugarLevel": "50%",
            "toppings": [{"name": "Boba", "price": 0.75}]
        }
    }]);

    let response = client.post(format!("{base}/cart")).json(&order).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let empty = client.post(format!("{base}/cart")).json(&json!([])).send().await.unwrap();
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let records = read_records(&dir.path().join("orders.json")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["total"], 5.25);
    assert_eq!(records[0]["items"][0]["finalPrice"], 5.25);
}

#[tokio::test]
async fn oversized_prices_are_rejected() {
    let dir = seeded();
    let base = spawn(dir.path()).await;
    let client = Client::new();

    let order = json!([{
        "name": "Classic",
        "price": 1e300,
        "customization": {
            "iceLevel": "Less Ice",
            "sugarLevel": "50%",
            "toppings": [{"name": "Boba", "price": 0.75}]
        }
    }]);

    let response = client.post(format!("{base}/cart")).json(&order).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!dir.path().join("orders.json").exists());

    let menu = client.get(format!("{base}/menu")).send().await.unwrap();
    assert_eq!(menu.status(), StatusCode::OK);
}
