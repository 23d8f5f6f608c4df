use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One credential row per employee. A row exists iff a PIN has been set;
/// resets overwrite the row in place, it is never deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "pin_credentials")]
pub struct Model {
    /// Foreign key to employees table; also the primary key, which enforces
    /// the one-to-one relationship.
    #[sea_orm(primary_key, auto_increment = false)]
    pub employee_id: i32,

    /// SHA-256 digest of (PIN bytes ++ salt bytes).
    pub pin_hash: Vec<u8>,

    /// 16 random bytes, regenerated on every write.
    pub salt: Vec<u8>,

    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
