use anyhow::Result;
use httpmock::prelude::*;
use std::sync::Arc;
use storefront_client::app::{CheckoutForm, Storefront};
use storefront_client::card::CardInfo;
use storefront_client::domain::model::{DeliveryData, TransactionStatus};
use storefront_client::domain::ports::TokenStore;
use storefront_client::guard::{guard, Access, Route};
use storefront_client::{ApiClient, LocalStorage, StorefrontError};
use tempfile::TempDir;

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": "u-1",
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "role": "customer"
    })
}

fn product_json(id: &str, price: &str, stock: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Product {}", id),
        "description": "",
        "price": price,
        "rating": 4.5,
        "imageUrl": null,
        "stock": stock
    })
}

fn delivery() -> serde_json::Value {
    serde_json::json!({
        "recipient": "Ada Lovelace",
        "address": "12 St James's Square",
        "city": "London",
        "phone": "+44 20 0000 0000"
    })
}

fn open_session(server: &MockServer, dir: &TempDir) -> Result<(Storefront<ApiClient>, Arc<LocalStorage>)> {
    let storage = Arc::new(LocalStorage::open(dir.path())?);
    let api = Arc::new(ApiClient::new(server.url("/api"), storage.clone()));
    Ok((Storefront::new(api, storage.clone()), storage))
}

/// Login, browse, add to cart, pay, then track the delivery in a fresh session.
#[tokio::test]
async fn test_full_purchase_flow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let login_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .header_missing("authorization");
        then.status(200)
            .json_body(serde_json::json!({ "token": "session-token-1", "user": user_json() }));
    });

    let products_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/products")
            .header("authorization", "Bearer session-token-1");
        then.status(200).json_body(serde_json::json!([
            product_json("p1", "12.00", 5),
            product_json("p2", "3.50", 10)
        ]));
    });

    let product_mock = server.mock(|when, then| {
        when.method(GET).path("/api/products/p1");
        then.status(200).json_body(product_json("p1", "12.00", 5));
    });

    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/transactions")
            .header("authorization", "Bearer session-token-1")
            .json_body(serde_json::json!({
                "items": [{ "productId": "p1", "name": "Product p1", "unitPrice": "12.00", "quantity": 2 }],
                "delivery": delivery(),
                "total": "24.00"
            }));
        then.status(201).json_body(serde_json::json!({
            "id": "tx-1",
            "items": [{ "productId": "p1", "name": "Product p1", "unitPrice": "12.00", "quantity": 2 }],
            "delivery": delivery(),
            "status": "PENDING",
            "total": "24.00"
        }));
    });

    let payment_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/transactions/tx-1/payment")
            .json_body(serde_json::json!({
                "payment": {
                    "cardType": "VISA",
                    "maskedNumber": "**** **** **** 1111",
                    "cardHolder": "Ada Lovelace",
                    "installments": 1
                },
                "cardToken": null
            }));
        then.status(200).json_body(serde_json::json!({
            "data": {
                "id": "tx-1",
                "items": [{ "productId": "p1", "name": "Product p1", "unitPrice": "12.00", "quantity": 2 }],
                "payment": {
                    "cardType": "VISA",
                    "maskedNumber": "**** **** **** 1111",
                    "cardHolder": "Ada Lovelace",
                    "installments": 1
                },
                "delivery": delivery(),
                "status": "APPROVED",
                "total": "24.00",
                "createdAt": "2026-10-19T10:00:00Z"
            }
        }));
    });

    let delivery_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/deliveries/transaction/tx-1")
            .header("authorization", "Bearer session-token-1");
        then.status(200).json_body(serde_json::json!({
            "id": "d-1",
            "transactionId": "tx-1",
            "status": "IN_TRANSIT",
            "address": "12 St James's Square",
            "updates": [
                { "status": "PENDING", "description": "Label created", "at": "2026-10-19T11:00:00Z" },
                { "status": "IN_TRANSIT", "description": "Left the warehouse", "at": "2026-10-20T08:30:00Z" }
            ]
        }));
    });

    {
        let (mut session, storage) = open_session(&server, &temp_dir)?;
        assert_eq!(guard(&Route::Orders, session.store()), Access::Redirect(Route::Login));

        session.login("ada@example.com", "correct-horse").await?;
        assert_eq!(storage.token().as_deref(), Some("session-token-1"));

        assert_eq!(session.load_products().await?.len(), 2);

        let product = session.load_product("p1").await?;
        session.add_to_cart(product, 2);
        assert_eq!(guard(&Route::Checkout, session.store()), Access::Allow);

        let form = CheckoutForm {
            card: CardInfo {
                number: "4111-1111-1111-1111".to_string(),
                holder: "Ada Lovelace".to_string(),
                expiry: "12/99".to_string(),
                cvv: "123".to_string(),
            },
            delivery: serde_json::from_value::<DeliveryData>(delivery())?,
            installments: 1,
        };
        let transaction = session.checkout(&form).await?;

        assert_eq!(transaction.status, TransactionStatus::Approved);
        assert!(session.store().cart.is_empty());
    }

    // A new process picks the session token up from disk.
    let (mut session, _storage) = open_session(&server, &temp_dir)?;
    assert!(session.store().auth.is_authenticated());
    assert!(session.store().cart.is_empty());

    let tracked = session.track_order("tx-1").await?;
    assert_eq!(tracked.updates.len(), 2);

    login_mock.assert();
    products_mock.assert();
    product_mock.assert();
    create_mock.assert();
    payment_mock.assert();
    delivery_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_cart_survives_restart_without_login() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/products/p2");
        then.status(200).json_body(product_json("p2", "3.50", 10));
    });

    {
        let (mut session, _storage) = open_session(&server, &temp_dir)?;
        let product = session.load_product("p2").await?;
        session.add_to_cart(product.clone(), 3);
        session.add_to_wishlist(product);
    }

    let (session, _storage) = open_session(&server, &temp_dir)?;
    assert_eq!(session.store().cart.quantity_of("p2"), 3);
    assert_eq!(session.store().cart.total().to_string(), "10.50");
    assert!(session.store().wishlist.contains("p2"));
    assert!(!session.store().auth.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_expired_token_is_reported_to_the_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/transactions")
            .header("authorization", "Bearer old-token");
        then.status(401)
            .json_body(serde_json::json!({ "message": "Token expired" }));
    });

    let storage = Arc::new(LocalStorage::open(temp_dir.path())?);
    storage.set_token("old-token")?;
    let api = Arc::new(ApiClient::new(server.url("/api"), storage.clone()));
    let mut session = Storefront::new(api, storage);

    let result = session.load_orders().await;

    mock.assert();
    assert!(matches!(result, Err(StorefrontError::Unauthorized { .. })));
    assert_eq!(
        session.store().transactions.error.as_deref(),
        Some("Token expired")
    );
    assert!(!session.store().transactions.loading);
    Ok(())
}

#[tokio::test]
async fn test_register_rejected_locally_makes_no_request() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/auth/register");
        then.status(200);
    });

    let (mut session, _storage) = open_session(&server, &temp_dir)?;
    let data = storefront_client::domain::model::RegisterData {
        first_name: "Ada".to_string(),
        last_name: String::new(),
        email: "ada@example.com".to_string(),
        password: "analytical".to_string(),
        confirm_password: "analytical".to_string(),
    };

    let result = session.register(&data).await;

    assert!(matches!(result, Err(StorefrontError::ValidationError { ref field, .. }) if field == "lastName"));
    assert_eq!(session.store().auth.error.as_deref(), Some("Last name is required"));
    mock.assert_hits(0);
    Ok(())
}
