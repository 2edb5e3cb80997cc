use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "merchant_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Customer-side order number, when the order came through checkout.
    pub order_number: Option<String>,
    pub customer_id: Uuid,
    pub merchant_id: Uuid,
    pub status: String,
    pub order_type: String,
    pub total_amount: i64,
    pub delivery_address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id"
    )]
    Customers,
    #[sea_orm(
        belongs_to = "super::merchants::Entity",
        from = "Column::MerchantId",
        to = "super::merchants::Column::UserId"
    )]
    Merchants,
    #[sea_orm(has_many = "super::merchant_order_items::Entity")]
    MerchantOrderItems,
}

impl Related<super::merchants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Merchants.def()
    }
}

impl Related<super::merchant_order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MerchantOrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
