use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub rating: f32,
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product: Product,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Declined,
    Error,
}

impl TransactionStatus {
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Declined => "DECLINED",
            Self::Error => "ERROR",
        };
        f.pad(label)
    }
}

/// Card details as they travel to the server: masked, never the CVV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub card_type: String,
    pub masked_number: String,
    pub card_holder: String,
    #[serde(default = "default_installments")]
    pub installments: u32,
}

fn default_installments() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryData {
    pub recipient: String,
    pub address: String,
    pub city: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl From<&CartItem> for TransactionItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            unit_price: item.product.price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub items: Vec<TransactionItem>,
    pub payment: Option<PaymentData>,
    pub delivery: DeliveryData,
    pub status: TransactionStatus,
    pub total: Decimal,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Pending,
    InTransit,
    Delivered,
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "PENDING",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingUpdate {
    pub status: DeliveryStatus,
    pub description: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: String,
    pub transaction_id: String,
    pub status: DeliveryStatus,
    pub address: String,
    #[serde(default)]
    pub updates: Vec<TrackingUpdate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub email: String,
    pub full_name: String,
}

// Request bodies

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub items: Vec<TransactionItem>,
    pub delivery: DeliveryData,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub payment: PaymentData,
    /// Opaque token for the card, produced by the payment provider.
    pub card_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub email: String,
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(price: &str) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Mug".to_string(),
            description: String::new(),
            price: Decimal::from_str(price).unwrap(),
            rating: 4.5,
            image_url: None,
            stock: 10,
        }
    }

    #[test]
    fn test_cart_item_subtotal() {
        let item = CartItem {
            product: product("12.50"),
            quantity: 3,
        };
        assert_eq!(item.subtotal(), Decimal::from_str("37.50").unwrap());
    }

    #[test]
    fn test_product_deserializes_camel_case() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "42",
            "name": "Lamp",
            "price": "19.99",
            "rating": 4.0,
            "imageUrl": "https://cdn.example.com/lamp.png"
        }))
        .unwrap();

        assert_eq!(product.price, Decimal::from_str("19.99").unwrap());
        assert_eq!(product.image_url.as_deref(), Some("https://cdn.example.com/lamp.png"));
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn test_user_role_defaults_to_customer() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "email": "a@b.co",
            "firstName": "Ada",
            "lastName": "Lovelace"
        }))
        .unwrap();
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_user_profile_flattens_user_fields() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "email": "a@b.co",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "role": "admin",
            "phone": "555-0100",
            "city": "London"
        }))
        .unwrap();
        assert_eq!(profile.user.role, Role::Admin);
        assert_eq!(profile.phone.as_deref(), Some("555-0100"));
        assert_eq!(profile.address, None);
    }

    #[test]
    fn test_transaction_status_wire_format() {
        let status: TransactionStatus = serde_json::from_str("\"APPROVED\"").unwrap();
        assert_eq!(status, TransactionStatus::Approved);
        assert!(status.is_final());
        assert!(!TransactionStatus::Pending.is_final());
    }

    #[test]
    fn test_register_data_never_sends_confirmation() {
        let data = RegisterData {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret-pass".to_string(),
            confirm_password: "secret-pass".to_string(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("confirmPassword").is_none());
        assert_eq!(json["firstName"], "Ada");
    }
}
