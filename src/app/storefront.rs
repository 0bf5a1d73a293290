use crate::adapters::storage::LocalStorage;
use crate::app::auth::{LoginUseCase, RegisterUseCase};
use crate::domain::card::{validate_card_info, CardInfo};
use crate::domain::model::{
    AuthSession, Delivery, DeliveryData, NewTransaction, PaymentRequest, Product, RegisterData, Transaction,
    TransactionItem, TransactionStatus, User,
};
use crate::domain::ports::{StoreApi, TokenStore};
use crate::store::{
    Action, AuthAction, CartAction, CartState, ResourceAction, Store, WishlistAction,
    WishlistState,
};
use crate::utils::error::{Result, StorefrontError};
use crate::utils::validation::validate_required;
use chrono::Utc;
use std::sync::Arc;

const CART_KEY: &str = "cart";
const WISHLIST_KEY: &str = "wishlist";

#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub card: CardInfo,
    pub delivery: DeliveryData,
    pub installments: u32,
}

/// Binds the [`Store`] to the API and local storage.
///
/// Every remote call follows the same shape: mark the slice as loading, await
/// the call, then dispatch either the result or the error message.
pub struct Storefront<A: StoreApi + ?Sized> {
    api: Arc<A>,
    storage: Arc<LocalStorage>,
    store: Store,
}

impl<A: StoreApi + ?Sized> Storefront<A> {
    /// Restores the token, cart and wishlist persisted by a previous run.
    pub fn new(api: Arc<A>, storage: Arc<LocalStorage>) -> Self {
        let mut store = Store::new();

        if let Some(token) = storage.token() {
            store.dispatch(Action::Auth(AuthAction::Restored(token)));
        }
        if let Some(cart) = storage.get::<CartState>(CART_KEY) {
            store.dispatch(Action::Cart(CartAction::Replace(cart.items)));
        }
        if let Some(wishlist) = storage.get::<WishlistState>(WISHLIST_KEY) {
            store.dispatch(Action::Wishlist(WishlistAction::Replace(wishlist.items)));
        }

        Self { api, storage, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn dispatch(&mut self, action: Action) {
        let persist = matches!(
            action,
            Action::Cart(_) | Action::Wishlist(_) | Action::MoveToCart { .. }
        );
        self.store.dispatch(action);
        if persist {
            self.persist_local_state();
        }
    }

    fn persist_local_state(&self) {
        if let Err(e) = self.storage.set(CART_KEY, &self.store.cart) {
            tracing::warn!("Failed to persist cart: {}", e);
        }
        if let Err(e) = self.storage.set(WISHLIST_KEY, &self.store.wishlist) {
            tracing::warn!("Failed to persist wishlist: {}", e);
        }
    }

    pub fn add_to_cart(&mut self, product: Product, quantity: u32) {
        self.dispatch(Action::Cart(CartAction::Add { product, quantity }));
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.dispatch(Action::Cart(CartAction::Remove {
            product_id: product_id.to_string(),
        }));
    }

    pub fn set_cart_quantity(&mut self, product_id: &str, quantity: u32) {
        self.dispatch(Action::Cart(CartAction::SetQuantity {
            product_id: product_id.to_string(),
            quantity,
        }));
    }

    pub fn add_to_wishlist(&mut self, product: Product) {
        self.dispatch(Action::Wishlist(WishlistAction::Add {
            product,
            at: Utc::now(),
        }));
    }

    pub fn remove_from_wishlist(&mut self, product_id: &str) {
        self.dispatch(Action::Wishlist(WishlistAction::Remove {
            product_id: product_id.to_string(),
        }));
    }

    pub fn move_to_cart(&mut self, product_id: &str) {
        self.dispatch(Action::MoveToCart {
            product_id: product_id.to_string(),
        });
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        self.dispatch(Action::Auth(AuthAction::Started));
        let result = LoginUseCase::new(self.api.clone()).execute(email, password).await;
        self.finish_auth(result)
    }

    pub async fn register(&mut self, data: &RegisterData) -> Result<User> {
        self.dispatch(Action::Auth(AuthAction::Started));
        let result = RegisterUseCase::new(self.api.clone()).execute(data).await;
        self.finish_auth(result)
    }

    /// Persists the token of a new session so later runs start signed in.
    fn finish_auth(&mut self, result: Result<AuthSession>) -> Result<User> {
        let stored = result.and_then(|session| {
            self.storage.set_token(&session.token)?;
            Ok(session)
        });
        match stored {
            Ok(session) => {
                let user = session.user.clone();
                self.dispatch(Action::Auth(AuthAction::Succeeded(session)));
                Ok(user)
            }
            Err(e) => {
                self.dispatch(Action::Auth(AuthAction::Failed(e.user_friendly_message())));
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.storage.clear_token()?;
        self.dispatch(Action::Auth(AuthAction::Logout));
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn load_products(&mut self) -> Result<&[Product]> {
        self.dispatch(Action::Products(ResourceAction::Started));
        match self.api.list_products().await {
            Ok(products) => {
                tracing::debug!("Loaded {} products", products.len());
                self.dispatch(Action::Products(ResourceAction::Loaded(products)));
                Ok(&self.store.products.items)
            }
            Err(e) => {
                self.dispatch(Action::Products(ResourceAction::Failed(e.user_friendly_message())));
                Err(e)
            }
        }
    }

    pub async fn load_product(&mut self, id: &str) -> Result<Product> {
        self.dispatch(Action::Products(ResourceAction::Started));
        match self.api.get_product(id).await {
            Ok(product) => {
                self.dispatch(Action::Products(ResourceAction::SelectedLoaded(product.clone())));
                Ok(product)
            }
            Err(e) => {
                self.dispatch(Action::Products(ResourceAction::Failed(e.user_friendly_message())));
                Err(e)
            }
        }
    }

    pub async fn load_orders(&mut self) -> Result<&[Transaction]> {
        self.require_login()?;
        self.dispatch(Action::Transactions(ResourceAction::Started));
        match self.api.list_transactions().await {
            Ok(transactions) => {
                self.dispatch(Action::Transactions(ResourceAction::Loaded(transactions)));
                Ok(&self.store.transactions.items)
            }
            Err(e) => Err(self.transaction_failed(e)),
        }
    }

    pub async fn load_order(&mut self, id: &str) -> Result<Transaction> {
        self.require_login()?;
        self.dispatch(Action::Transactions(ResourceAction::Started));
        match self.api.get_transaction(id).await {
            Ok(transaction) => {
                self.dispatch(Action::Transactions(ResourceAction::SelectedLoaded(
                    transaction.clone(),
                )));
                Ok(transaction)
            }
            Err(e) => Err(self.transaction_failed(e)),
        }
    }

    pub async fn track_order(&mut self, transaction_id: &str) -> Result<Delivery> {
        self.require_login()?;
        self.dispatch(Action::Deliveries(ResourceAction::Started));
        match self.api.get_delivery_by_transaction(transaction_id).await {
            Ok(delivery) => {
                self.dispatch(Action::Deliveries(ResourceAction::SelectedLoaded(delivery.clone())));
                Ok(delivery)
            }
            Err(e) => {
                self.dispatch(Action::Deliveries(ResourceAction::Failed(e.user_friendly_message())));
                Err(e)
            }
        }
    }

    pub fn validate_delivery(delivery: &DeliveryData) -> Result<()> {
        validate_required("recipient", &delivery.recipient, "Recipient is required")?;
        validate_required("address", &delivery.address, "Address is required")?;
        validate_required("city", &delivery.city, "City is required")?;
        validate_required("phone", &delivery.phone, "Phone is required")?;
        Ok(())
    }

    /// Creates a transaction from the cart and pays for it.
    ///
    /// A declined payment is not an error: the transaction is returned with its
    /// status and the cart is kept so the customer can retry. The cart is cleared
    /// only once the payment is approved.
    pub async fn checkout(&mut self, form: &CheckoutForm) -> Result<Transaction> {
        self.require_login()?;
        if self.store.cart.is_empty() {
            return Err(StorefrontError::CheckoutError {
                message: "Your cart is empty".to_string(),
            });
        }

        let validation = validate_card_info(&form.card);
        if let Some((field, message)) = validation.errors.iter().next() {
            return Err(StorefrontError::validation(field.as_str(), message.clone()));
        }
        Self::validate_delivery(&form.delivery)?;

        let order = NewTransaction {
            items: self.store.cart.items.iter().map(TransactionItem::from).collect(),
            delivery: form.delivery.clone(),
            total: self.store.cart.total(),
        };
        let payment = PaymentRequest {
            payment: form.card.to_payment_data(form.installments),
            card_token: None,
        };

        self.dispatch(Action::Transactions(ResourceAction::Started));

        let created = match self.api.create_transaction(&order).await {
            Ok(created) => created,
            Err(e) => return Err(self.transaction_failed(e)),
        };
        tracing::info!("Created transaction {} for {}", created.id, order.total);

        let paid = match self.api.process_payment(&created.id, &payment).await {
            Ok(paid) => paid,
            Err(e) => return Err(self.transaction_failed(e)),
        };
        tracing::info!("Transaction {} finished with status {}", paid.id, paid.status);

        let mut history = self.store.transactions.items.clone();
        history.retain(|t| t.id != paid.id);
        history.insert(0, paid.clone());
        self.dispatch(Action::Transactions(ResourceAction::Loaded(history)));
        self.dispatch(Action::Transactions(ResourceAction::SelectedLoaded(paid.clone())));

        if paid.status == TransactionStatus::Approved {
            self.dispatch(Action::Cart(CartAction::Clear));
        }
        Ok(paid)
    }

    fn require_login(&self) -> Result<()> {
        if self.store.auth.is_authenticated() {
            Ok(())
        } else {
            Err(StorefrontError::Unauthorized {
                message: "Log in to continue".to_string(),
            })
        }
    }

    fn transaction_failed(&mut self, error: StorefrontError) -> StorefrontError {
        self.dispatch(Action::Transactions(ResourceAction::Failed(
            error.user_friendly_message(),
        )));
        error
    }
}
