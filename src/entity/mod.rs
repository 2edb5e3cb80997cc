pub mod audit_logs;
pub mod kv_entries;
pub mod merchant_order_items;
pub mod merchant_orders;
pub mod merchant_products;
pub mod merchants;
pub mod users;
