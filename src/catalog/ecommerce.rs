//! Products, customers and orders

use serde::{Deserialize, Serialize};

use super::auth::User;
use crate::schema::{
    Entity, EntitySchema, FieldDef, FieldType, Format, IntWidth, LiteralEnum, Nullish, Reference,
    Rule, SchemaRegistry, SchemaResult,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl LiteralEnum for OrderStatus {
    const NAME: &'static str = "OrderStatus";
    const VARIANTS: &'static [&'static str] =
        &["Pending", "Processing", "Shipped", "Delivered", "Cancelled"];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    #[default]
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
    Other,
}

impl LiteralEnum for ProductCategory {
    const NAME: &'static str = "ProductCategory";
    const VARIANTS: &'static [&'static str] =
        &["Electronics", "Clothing", "Books", "Home", "Sports", "Other"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: u32,
    pub category: ProductCategory,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub image_url: Nullish<String>,
    pub is_available: bool,
    pub created_at: String,
}

impl Entity for Product {
    const NAME: &'static str = "Product";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(
                FieldDef::required("name", FieldType::String)
                    .rules([Rule::NonEmpty, Rule::MaxLength(200)]),
            )
            .field(FieldDef::required("description", FieldType::String).rule(Rule::MaxLength(5000)))
            .field(FieldDef::required("price", FieldType::Float).rule(Rule::Positive))
            .field(
                FieldDef::required("stockQuantity", FieldType::int(IntWidth::U32))
                    .rule(Rule::NonNegative),
            )
            .field(FieldDef::required(
                "category",
                FieldType::enumeration(ProductCategory::NAME),
            ))
            .field(
                FieldDef::optional("imageUrl", FieldType::String)
                    .rule(Rule::Url)
                    .format(Format::Url("example.com".into())),
            )
            .field(FieldDef::required("isAvailable", FieldType::Bool))
            .field(FieldDef::required("createdAt", FieldType::String).format(Format::DateTime))
    }
}

/// Postal address, embedded in customers and orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// ISO 3166 alpha-2, normalized to uppercase
    pub country: String,
}

impl Entity for Address {
    const NAME: &'static str = "Address";

    fn schema() -> EntitySchema {
        EntitySchema::value_object(Self::NAME)
            .field(
                FieldDef::required("street", FieldType::String)
                    .rules([Rule::NonEmpty, Rule::MaxLength(200)]),
            )
            .field(
                FieldDef::required("city", FieldType::String)
                    .rules([Rule::NonEmpty, Rule::MaxLength(100)]),
            )
            .field(FieldDef::required("state", FieldType::String).rule(Rule::MaxLength(100)))
            .field(
                FieldDef::required("postalCode", FieldType::String)
                    .rules([Rule::NonEmpty, Rule::MaxLength(20)]),
            )
            .field(FieldDef::required("country", FieldType::String).rules([
                Rule::NonEmpty,
                Rule::MinLength(2),
                Rule::MaxLength(2),
                Rule::Uppercased,
            ]))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub user: Reference<User>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub shipping_address: Nullish<Address>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub billing_address: Nullish<Address>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub phone: Nullish<String>,
    pub created_at: String,
}

impl Entity for Customer {
    const NAME: &'static str = "Customer";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("user", FieldType::reference(User::NAME)))
            .field(FieldDef::optional("shippingAddress", FieldType::object(Address::NAME)))
            .field(FieldDef::optional("billingAddress", FieldType::object(Address::NAME)))
            .field(FieldDef::optional("phone", FieldType::String).format(Format::PhoneNumber))
            .field(FieldDef::required("createdAt", FieldType::String).format(Format::DateTime))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl Entity for CartItem {
    const NAME: &'static str = "CartItem";

    fn schema() -> EntitySchema {
        EntitySchema::value_object(Self::NAME)
            .field(FieldDef::required("productId", FieldType::String).rule(Rule::NonEmpty))
            .field(
                FieldDef::required("productName", FieldType::String)
                    .rules([Rule::NonEmpty, Rule::MaxLength(200)]),
            )
            .field(FieldDef::required("quantity", FieldType::int(IntWidth::U32)).rule(Rule::Positive))
            .field(FieldDef::required("unitPrice", FieldType::Float).rule(Rule::Positive))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer: Reference<Customer>,
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping_cost: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub shipping_address: Address,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub notes: Nullish<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub shipped_at: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub delivered_at: Nullish<String>,
}

impl Entity for Order {
    const NAME: &'static str = "Order";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("customer", FieldType::reference(Customer::NAME)))
            .field(FieldDef::required(
                "items",
                FieldType::array(FieldType::object(CartItem::NAME)),
            ))
            .field(FieldDef::required("subtotal", FieldType::Float).rule(Rule::NonNegative))
            .field(FieldDef::required("tax", FieldType::Float).rule(Rule::NonNegative))
            .field(FieldDef::required("shippingCost", FieldType::Float).rule(Rule::NonNegative))
            .field(FieldDef::required("total", FieldType::Float).rule(Rule::Positive))
            .field(FieldDef::required("status", FieldType::enumeration(OrderStatus::NAME)))
            .field(FieldDef::required("shippingAddress", FieldType::object(Address::NAME)))
            .field(FieldDef::optional("notes", FieldType::String).rule(Rule::MaxLength(1000)))
            .field(FieldDef::required("createdAt", FieldType::String).format(Format::DateTime))
            .field(FieldDef::optional("shippedAt", FieldType::String).format(Format::DateTime))
            .field(FieldDef::optional("deliveredAt", FieldType::String).format(Format::DateTime))
    }
}

pub fn register(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register_literal_enum::<OrderStatus>()?;
    registry.register_literal_enum::<ProductCategory>()?;
    registry.register::<Product>()?;
    registry.register::<Address>()?;
    registry.register::<Customer>()?;
    registry.register::<CartItem>()?;
    registry.register::<Order>()?;
    Ok(())
}
