use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "merchant_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Centavos.
    pub price: i64,
    pub category: Option<String>,
    pub image: Option<String>,
    pub is_available: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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
