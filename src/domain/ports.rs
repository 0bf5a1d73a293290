use crate::domain::model::{
    AuthSession, Customer, Delivery, LoginCredentials, NewCustomer, NewTransaction,
    PaymentRequest, Product, RegisterData, Transaction,
};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession>;
    async fn register(&self, data: &RegisterData) -> Result<AuthSession>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn get_product(&self, id: &str) -> Result<Product>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;
    async fn get_transaction(&self, id: &str) -> Result<Transaction>;
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction>;
    async fn process_payment(&self, transaction_id: &str, payment: &PaymentRequest) -> Result<Transaction>;
}

#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    async fn list_deliveries(&self) -> Result<Vec<Delivery>>;
    async fn get_delivery_by_transaction(&self, transaction_id: &str) -> Result<Delivery>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn list_customers(&self) -> Result<Vec<Customer>>;
    async fn get_customer(&self, id: &str) -> Result<Customer>;
    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer>;
}

/// Everything the storefront needs from the backend in one bound.
pub trait StoreApi:
    AuthRepository + ProductRepository + TransactionRepository + DeliveryRepository + CustomerRepository
{
}

impl<T> StoreApi for T where
    T: AuthRepository + ProductRepository + TransactionRepository + DeliveryRepository + CustomerRepository
{
}

/// Where the bearer token lives between runs.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str) -> Result<()>;
    fn clear_token(&self) -> Result<()>;
}
