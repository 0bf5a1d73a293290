use crate::domain::model::{
    AuthSession, Customer, Delivery, LoginCredentials, NewCustomer, NewTransaction,
    PaymentRequest, Product, RegisterData, Transaction,
};
use crate::domain::ports::{
    AuthRepository, CustomerRepository, DeliveryRepository, ProductRepository, TokenStore,
    TransactionRepository,
};
use crate::utils::error::{Result, StorefrontError};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL_ENV: &str = "STOREFRONT_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Explicit value first, then the environment, then the built-in default.
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .filter(|url| !url.trim().is_empty())
        .or_else(|| std::env::var(BASE_URL_ENV).ok().filter(|url| !url.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Some deployments wrap payloads as `{ "data": ... }`, others return them bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(data) => data,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// REST adapter for the store API. Implements every repository port.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            tokens,
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Auth endpoints pass `authenticated = false` so a stale token is never sent.
    fn request(&self, method: Method, path: &str, authenticated: bool) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        if !authenticated {
            return builder;
        }
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, resource: &str) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status for {}: {}", resource, status);

        if status.is_success() {
            let envelope: Envelope<T> = response.json().await?;
            return Ok(envelope.into_inner());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string()
            });

        tracing::warn!("API request for {} failed with {}: {}", resource, status, message);

        Err(match status {
            StatusCode::UNAUTHORIZED => StorefrontError::Unauthorized { message },
            StatusCode::NOT_FOUND => StorefrontError::NotFound {
                resource: resource.to_string(),
            },
            _ => StorefrontError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<T> {
        self.send(self.request(Method::GET, path, true), resource).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        resource: &str,
    ) -> Result<T> {
        self.send(self.request(Method::POST, path, true).json(body), resource)
            .await
    }

    async fn authenticate<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<AuthSession> {
        let request = self.request(Method::POST, path, false).json(body);
        let session: AuthSession = self.send(request, "session").await?;
        tracing::info!("Authenticated as {}", session.user.email);
        Ok(session)
    }
}

#[async_trait]
impl AuthRepository for ApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession> {
        self.authenticate("/auth/login", credentials).await
    }

    async fn register(&self, data: &RegisterData) -> Result<AuthSession> {
        self.authenticate("/auth/register", data).await
    }
}

#[async_trait]
impl ProductRepository for ApiClient {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.get("/products", "products").await
    }

    async fn get_product(&self, id: &str) -> Result<Product> {
        self.get(&format!("/products/{}", id), &format!("Product {}", id))
            .await
    }
}

#[async_trait]
impl TransactionRepository for ApiClient {
    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.get("/transactions", "transactions").await
    }

    async fn get_transaction(&self, id: &str) -> Result<Transaction> {
        self.get(&format!("/transactions/{}", id), &format!("Transaction {}", id))
            .await
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        self.post("/transactions", transaction, "transaction").await
    }

    async fn process_payment(&self, transaction_id: &str, payment: &PaymentRequest) -> Result<Transaction> {
        self.post(
            &format!("/transactions/{}/payment", transaction_id),
            payment,
            &format!("Transaction {}", transaction_id),
        )
        .await
    }
}

#[async_trait]
impl DeliveryRepository for ApiClient {
    async fn list_deliveries(&self) -> Result<Vec<Delivery>> {
        self.get("/deliveries", "deliveries").await
    }

    async fn get_delivery_by_transaction(&self, transaction_id: &str) -> Result<Delivery> {
        self.get(
            &format!("/deliveries/transaction/{}", transaction_id),
            &format!("Delivery for transaction {}", transaction_id),
        )
        .await
    }
}

#[async_trait]
impl CustomerRepository for ApiClient {
    async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.get("/customers", "customers").await
    }

    async fn get_customer(&self, id: &str) -> Result<Customer> {
        self.get(&format!("/customers/{}", id), &format!("Customer {}", id))
            .await
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        self.post("/customers", customer, "customer").await
    }
}
