/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::upgrade_record::UpgradeStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum UpgradeType {
    #[sea_orm(num_value = 1)]
    Upgrade,
    #[sea_orm(num_value = 2)]
    Add,
}

/// Tracks one component inside an application upgrade or rollback attempt.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "component_upgrade_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub upgrade_record: Uuid,
    pub component: Uuid,
    pub component_name: String,
    pub upgrade_type: UpgradeType,
    /// Correlation id returned by the region for the submitted operation.
    pub event_id: Option<String>,
    pub status: UpgradeStatus,
    /// Serialized property changes applied to the component.
    pub update: Json,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::upgrade_record::Entity",
        from = "Column::UpgradeRecord",
        to = "super::upgrade_record::Column::Id"
    )]
    UpgradeRecord,
}

impl Related<super::upgrade_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UpgradeRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }
}
