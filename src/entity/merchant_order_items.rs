use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "merchant_order_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i32,
    /// Unit price in centavos, frozen when the order was created.
    pub price: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::merchant_orders::Entity",
        from = "Column::OrderId",
        to = "super::merchant_orders::Column::Id"
    )]
    MerchantOrders,
    #[sea_orm(
        belongs_to = "super::merchant_products::Entity",
        from = "Column::ProductId",
        to = "super::merchant_products::Column::Id"
    )]
    MerchantProducts,
}

impl Related<super::merchant_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MerchantOrders.def()
    }
}

impl Related<super::merchant_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MerchantProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
