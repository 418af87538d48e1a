use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use api_types::MEDIA_TYPE;
use engine::Engine;
use server::types::fund::{Currency, FundList, FundNew};

async fn app_with_db() -> (Router, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (server::router(Arc::new(engine)), db)
}

async fn post_fund(app: &Router, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/fund")
        .header(CONTENT_TYPE, MEDIA_TYPE)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn list_funds(app: &Router) -> FundList {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/fund")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn empty_database_lists_no_funds() {
    let (app, _db) = app_with_db().await;

    assert!(list_funds(&app).await.data.is_empty());
}

#[tokio::test]
async fn created_fund_is_listed_with_its_currency() {
    let (app, _db) = app_with_db().await;
    let body = serde_json::to_value(FundNew::new("General", "CAD")).unwrap();

    let res = post_fund(&app, body).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let list = list_funds(&app).await;
    assert_eq!(list.data.len(), 1);
    assert_eq!(list.data[0].kind, "fund");
    assert_eq!(list.data[0].attributes.name, "General");
    assert_eq!(list.data[0].attributes.currency, Currency::CAD);
    assert_eq!(list.data[0].attributes.currency.code(), "CAD");
}

#[tokio::test]
async fn invalid_currency_stores_nothing() {
    let (app, _db) = app_with_db().await;
    let body = serde_json::to_value(FundNew::new("General", "BADDD")).unwrap();

    let res = post_fund(&app, body).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(list_funds(&app).await.data.is_empty());
}

#[tokio::test]
async fn rows_inserted_directly_are_listed() {
    let (app, db) = app_with_db().await;
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO funds (id, name, currency) VALUES (?, ?, ?)",
        vec![1.into(), "General".into(), 26.into()],
    ))
    .await
    .unwrap();

    let list = list_funds(&app).await;

    assert_eq!(list.data.len(), 1);
    assert_eq!(list.data[0].id.as_deref(), Some("1"));
    assert_eq!(
        serde_json::to_value(&list.data[0].attributes).unwrap(),
        json!({ "name": "General", "currency": "CAD" })
    );
}

#[tokio::test]
async fn several_funds_are_listed_in_creation_order() {
    let (app, _db) = app_with_db().await;

    for (name, currency) in [("General", "CAD"), ("Special", "usd"), ("Testing", "XTS")] {
        let body = serde_json::to_value(FundNew::new(name, currency)).unwrap();
        assert_eq!(post_fund(&app, body).await.status(), StatusCode::CREATED);
    }

    let list = list_funds(&app).await;
    let funds: Vec<(&str, &str)> = list
        .data
        .iter()
        .map(|r| (r.attributes.name.as_str(), r.attributes.currency.code()))
        .collect();
    assert_eq!(
        funds,
        vec![("General", "CAD"), ("Special", "USD"), ("Testing", "XTS")]
    );
}
