use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "merchants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub business_name: String,
    pub business_type: String,
    pub address: String,
    pub phone: String,
    pub logo: Option<String>,
    pub is_verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::merchant_products::Entity")]
    MerchantProducts,
    #[sea_orm(has_many = "super::merchant_orders::Entity")]
    MerchantOrders,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::merchant_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MerchantProducts.def()
    }
}

impl Related<super::merchant_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MerchantOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
