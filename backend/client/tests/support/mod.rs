use std::{fs, path::Path};

use axum::Router;
use client::{ClientConfig, HeadlessView, MemoryStorage, Shop};
use server::{AppState, app, config::Config};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const CUSTOMIZATIONS: &str = r#"{
    "iceLevels": ["Regular Ice", "Less Ice", "No Ice"],
    "sugarLevels": ["100%", "50%", "0%"],
    "toppings": [
        {"name": "Boba", "price": 0.75},
        {"name": "Lychee Jelly", "price": 0.50}
    ]
}"#;

pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });

    format!("http://{address}")
}

pub async fn spawn_shop_server(dir: &Path) -> String {
    serve(app(AppState::new(Config::with_data_dir(dir)))).await
}

/// A data directory holding `menu` and the standard customizations.
pub fn data_dir(menu: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("menu.json"), menu).expect("write menu");
    fs::write(dir.path().join("customizations.json"), CUSTOMIZATIONS).expect("write customizations");
    dir
}

/// `count` drinks spread over two categories.
pub fn big_menu(count: usize) -> String {
    let item = |i: usize| format!(r#"{{"name": "Tea {i}", "price": 4.00}}"#);
    let split = count / 2;

    let milk: Vec<String> = (0..split).map(item).collect();
    let fruit: Vec<String> = (split..count).map(item).collect();

    format!(
        r#"{{"Milk Tea": [{}], "Fruit Tea": [{}]}}"#,
        milk.join(","),
        fruit.join(",")
    )
}

pub fn config(base: &str) -> ClientConfig {
    ClientConfig {
        api_base_url: base.to_string(),
        ..ClientConfig::default()
    }
}

pub async fn shop(base: &str) -> Shop<MemoryStorage, HeadlessView> {
    Shop::init(&config(base), MemoryStorage::default(), HeadlessView::default())
        .await
        .expect("shop init")
}

/// A base URL nothing is listening on.
pub async fn dead_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    drop(listener);

    format!("http://{address}")
}
