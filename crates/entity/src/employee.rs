use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i32,

    pub first_name: String,

    pub last_name: String,

    /// Inactive employees are kept for historical timesheets but are hidden
    /// from the sign-in picker.
    pub active: bool,

    /// Unix timestamp (seconds).
    pub created_at: i64,

    /// Unix timestamp (seconds).
    pub updated_at: i64,
}

impl Model {
    /// Display name as shown in the employee picker.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::pin_credential::Entity")]
    PinCredential,
}

impl Related<super::pin_credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PinCredential.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
