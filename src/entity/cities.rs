use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub country: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::weather_readings::Entity")]
    WeatherReadings,
}

impl Related<super::weather_readings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeatherReadings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
