//! Merchant storefront: products, incoming orders and sales reports.
//!
//! A merchant is a user with the `merchant` role and a `merchants` row keyed
//! by the same id.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, ActiveValue::NotSet,
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    domain::{
        merchant_order::{MerchantOrderStatus, TransitionError},
        order::OrderType,
        report::{ReportOrder, SalesLine, build_sales_report},
    },
    dto::merchant::{
        CreateMerchantOrderRequest, CreateProductRequest, MerchantOrderList,
        MerchantOrderWithItems, MerchantRegistered, ProductList, RegisterMerchantRequest,
        ReportList, ReportQuery, UpdateOrderStatusRequest, UpdateProductRequest,
    },
    entity::{
        merchant_order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        merchant_orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
        merchant_products::{
            ActiveModel as ProductActive, Column as ProdCol, Entity as Products,
        },
        merchants::{ActiveModel as MerchantActive, Entity as Merchants},
        users::{ActiveModel as UserActive, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ROLE_MERCHANT, ensure_merchant},
    models::{MerchantOrder, MerchantOrderItem, MerchantProduct},
    money::Money,
    response::{ApiResponse, Meta},
    services::auth_service::issue_token,
    state::AppState,
};

fn ensure_owner(user: &AuthUser, merchant_id: Uuid) -> AppResult<()> {
    ensure_merchant(user)?;
    if user.user_id != merchant_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Highest price a merchant can list a product at.
pub const MAX_PRODUCT_PRICE: Money = Money::from_pesos(1_000_000);

fn ensure_price(price: Money) -> AppResult<()> {
    if price.centavos() < 0 {
        return Err(AppError::Validation("Price cannot be negative".into()));
    }
    if price > MAX_PRODUCT_PRICE {
        return Err(AppError::Validation(format!(
            "Price cannot exceed {MAX_PRODUCT_PRICE}"
        )));
    }
    Ok(())
}

/// Sum of unit price times quantity, rejected rather than wrapped when it
/// does not fit.
fn order_total(lines: impl IntoIterator<Item = (Money, i32)>) -> AppResult<Money> {
    let out_of_range = || AppError::Validation("Order total is out of range".into());
    lines.into_iter().try_fold(Money::ZERO, |total, (price, quantity)| {
        let quantity = u32::try_from(quantity).map_err(|_| out_of_range())?;
        price
            .checked_times(quantity)
            .and_then(|amount| total.checked_add(amount))
            .ok_or_else(out_of_range)
    })
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

pub async fn register_merchant(
    state: &AppState,
    user: &AuthUser,
    payload: RegisterMerchantRequest,
) -> AppResult<ApiResponse<MerchantRegistered>> {
    let business_name = required(&payload.business_name, "Business name")?;
    let business_type = required(&payload.business_type, "Business type")?;
    let address = required(&payload.address, "Address")?;
    let phone = required(&payload.phone, "Phone")?;

    let txn = state.orm.begin().await?;

    let account = Users::find_by_id(user.user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    if Merchants::find_by_id(user.user_id).one(&txn).await?.is_some() {
        return Err(AppError::InvalidState("Already registered as a merchant".into()));
    }

    let merchant = MerchantActive {
        user_id: Set(user.user_id),
        business_name: Set(business_name),
        business_type: Set(business_type),
        address: Set(address),
        phone: Set(phone),
        logo: Set(payload.logo),
        is_verified: Set(false),
    }
    .insert(&txn)
    .await?;

    let mut active: UserActive = account.into();
    active.role = Set(ROLE_MERCHANT.to_string());
    active.update(&txn).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::MerchantRegister,
        serde_json::json!({ "merchant_id": user.user_id }),
    )
    .await;

    let token = issue_token(&state.config.jwt_secret, user.user_id, ROLE_MERCHANT)?;
    Ok(ApiResponse::success(
        "Merchant registered",
        MerchantRegistered {
            merchant: merchant.into(),
            token,
        },
        Some(Meta::empty()),
    ))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<MerchantProduct>> {
    ensure_merchant(user)?;
    let name = required(&payload.name, "Product name")?;
    ensure_price(payload.price)?;

    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        merchant_id: Set(user.user_id),
        name: Set(name),
        description: Set(payload.description),
        price: Set(payload.price.centavos()),
        category: Set(payload.category),
        image: Set(payload.image),
        is_available: Set(payload.is_available),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::ProductCreate,
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_products(
    state: &AppState,
    merchant_id: Uuid,
) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<MerchantProduct> = Products::find()
        .filter(ProdCol::MerchantId.eq(merchant_id))
        .order_by_asc(ProdCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(MerchantProduct::from)
        .collect();

    let meta = Meta::all(items.len());
    Ok(ApiResponse::success("OK", ProductList { items }, Some(meta)))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<MerchantProduct>> {
    ensure_merchant(user)?;
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    if existing.merchant_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let mut active: ProductActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required(&name, "Product name")?);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        ensure_price(price)?;
        active.price = Set(price.centavos());
    }
    if let Some(category) = payload.category {
        active.category = Set(Some(category));
    }
    if let Some(image) = payload.image {
        active.image = Set(Some(image));
    }
    if let Some(is_available) = payload.is_available {
        active.is_available = Set(is_available);
    }
    let updated = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::ProductUpdate,
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product updated",
        updated.into(),
        Some(Meta::empty()),
    ))
}

/// A customer submits an order to a merchant. Unit prices come from the
/// merchant's current product rows, never from the request.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMerchantOrderRequest,
) -> AppResult<ApiResponse<MerchantOrderWithItems>> {
    if payload.items.is_empty() {
        return Err(AppError::InvalidState("Order has no items".into()));
    }
    if payload.items.iter().any(|line| line.quantity <= 0) {
        return Err(AppError::Validation(
            "quantity must be greater than 0".into(),
        ));
    }
    let delivery_address = match payload.order_type {
        OrderType::Delivery => Some(required(
            payload.delivery_address.as_deref().unwrap_or_default(),
            "Delivery address",
        )?),
        OrderType::Pickup => None,
    };

    let txn = state.orm.begin().await?;

    if Merchants::find_by_id(payload.merchant_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Merchant"));
    }

    let product_ids: Vec<Uuid> = payload.items.iter().map(|line| line.product_id).collect();
    let products: HashMap<Uuid, _> = Products::find()
        .filter(
            Condition::all()
                .add(ProdCol::Id.is_in(product_ids))
                .add(ProdCol::MerchantId.eq(payload.merchant_id)),
        )
        .all(&txn)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let mut priced = Vec::with_capacity(payload.items.len());
    for line in &payload.items {
        let product = products
            .get(&line.product_id)
            .ok_or_else(|| AppError::not_found("Product"))?;
        if !product.is_available {
            return Err(AppError::Validation(format!(
                "{} is currently unavailable",
                product.name
            )));
        }
        priced.push((Money::from_centavos(product.price), line.quantity));
    }
    let total_amount = order_total(priced)?;

    let now = Utc::now();
    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        order_number: Set(payload.order_number),
        customer_id: Set(user.user_id),
        merchant_id: Set(payload.merchant_id),
        status: Set(MerchantOrderStatus::INITIAL.as_str().to_string()),
        order_type: Set(payload.order_type.as_str().to_string()),
        total_amount: Set(total_amount.centavos()),
        delivery_address: Set(delivery_address),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<MerchantOrderItem> = Vec::with_capacity(payload.items.len());
    for line in &payload.items {
        let Some(product) = products.get(&line.product_id) else {
            continue;
        };
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(product.id),
            name: Set(product.name.clone()),
            quantity: Set(line.quantity),
            price: Set(product.price),
        }
        .insert(&txn)
        .await?;
        items.push(item.into());
    }

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        merchant_id = %order.merchant_id,
        total = %total_amount,
        "merchant order created"
    );
    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::MerchantOrderCreate,
        serde_json::json!({ "order_id": order.id, "merchant_id": order.merchant_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        MerchantOrderWithItems {
            order: order.try_into()?,
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    merchant_id: Uuid,
    status: Option<String>,
) -> AppResult<ApiResponse<MerchantOrderList>> {
    ensure_owner(user, merchant_id)?;

    let mut condition = Condition::all().add(OrderCol::MerchantId.eq(merchant_id));
    if let Some(status) = status.as_deref().filter(|s| !s.is_empty()) {
        let status: MerchantOrderStatus = status.parse()?;
        condition = condition.add(OrderCol::Status.eq(status.as_str()));
    }

    let orders = Orders::find()
        .filter(condition)
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let items = with_items(state, orders).await?;
    let meta = Meta::all(items.len());
    Ok(ApiResponse::success(
        "Orders",
        MerchantOrderList { items },
        Some(meta),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<MerchantOrderWithItems>> {
    let target: MerchantOrderStatus = payload.status.trim().parse()?;
    transition(state, user, id, |current| current.transition_to(target)).await
}

/// Only a pending order can be cancelled.
pub async fn cancel_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<MerchantOrderWithItems>> {
    transition(state, user, id, MerchantOrderStatus::cancel).await
}

async fn transition<F>(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    step: F,
) -> AppResult<ApiResponse<MerchantOrderWithItems>>
where
    F: FnOnce(MerchantOrderStatus) -> Result<MerchantOrderStatus, TransitionError>,
{
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;
    ensure_owner(user, order.merchant_id)?;

    let current: MerchantOrderStatus = order.status.parse()?;
    let next = step(current)?;

    let mut active: OrderActive = order.into();
    active.status = Set(next.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    tracing::info!(order_id = %id, from = %current, to = %next, "merchant order status changed");
    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::MerchantOrderStatus,
        serde_json::json!({ "order_id": id, "from": current.as_str(), "to": next.as_str() }),
    )
    .await;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ApiResponse::success(
        "Order updated",
        MerchantOrderWithItems {
            order: updated.try_into()?,
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn sales_reports(
    state: &AppState,
    user: &AuthUser,
    merchant_id: Uuid,
    query: ReportQuery,
) -> AppResult<ApiResponse<ReportList>> {
    ensure_owner(user, merchant_id)?;

    let orders = Orders::find()
        .filter(OrderCol::MerchantId.eq(merchant_id))
        .all(&state.orm)
        .await?;
    let mut items = load_items(state, &orders).await?;

    let mut report_orders = Vec::with_capacity(orders.len());
    for order in orders {
        let lines = items
            .remove(&order.id)
            .unwrap_or_default()
            .into_iter()
            .map(|item| SalesLine {
                name: item.name,
                quantity: u32::try_from(item.quantity).unwrap_or(0),
                price: Money::from_centavos(item.price),
            })
            .collect();
        let order = MerchantOrder::try_from(order)?;
        report_orders.push(ReportOrder {
            created_at: order.created_at,
            status: order.status,
            total: order.total_amount,
            lines,
        });
    }

    let reports = build_sales_report(&report_orders, query.timeframe);
    let meta = Meta::all(reports.len());
    Ok(ApiResponse::success(
        "Sales reports",
        ReportList {
            timeframe: query.timeframe,
            reports,
        },
        Some(meta),
    ))
}

async fn load_items(
    state: &AppState,
    orders: &[OrderModel],
) -> AppResult<HashMap<Uuid, Vec<OrderItemModel>>> {
    let order_ids: Vec<Uuid> = orders.iter().map(|order| order.id).collect();
    let mut grouped: HashMap<Uuid, Vec<OrderItemModel>> = HashMap::new();
    if order_ids.is_empty() {
        return Ok(grouped);
    }
    for item in OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(order_ids))
        .all(&state.orm)
        .await?
    {
        grouped.entry(item.order_id).or_default().push(item);
    }
    Ok(grouped)
}

async fn with_items(
    state: &AppState,
    orders: Vec<OrderModel>,
) -> AppResult<Vec<MerchantOrderWithItems>> {
    let mut items = load_items(state, &orders).await?;
    orders
        .into_iter()
        .map(|order| {
            let lines = items
                .remove(&order.id)
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect();
            Ok(MerchantOrderWithItems {
                order: order.try_into()?,
                items: lines,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_total_rejects_overflow_instead_of_wrapping() {
        let total = order_total([(Money::from_pesos(95), 2), (Money::from_pesos(10), 1)]);
        assert_eq!(total.ok(), Some(Money::from_pesos(200)));

        let huge = Money::from_centavos(90_000_000_000_000_000);
        assert!(matches!(
            order_total([(huge, 1000)]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            order_total([(huge, 1), (huge, 1), (huge, 1), (huge, 1000)]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn prices_are_bounded() {
        assert!(ensure_price(Money::from_pesos(95)).is_ok());
        assert!(ensure_price(MAX_PRODUCT_PRICE).is_ok());
        assert!(ensure_price(Money::from_centavos(-1)).is_err());
        assert!(ensure_price(Money::from_centavos(90_000_000_000_000_000)).is_err());
    }
}
