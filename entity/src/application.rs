/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_env: Uuid,
    pub tenant_name: String,
    pub name: String,
    pub region_name: String,
    pub region_app_id: String,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::component_group::Entity")]
    ComponentGroup,
    #[sea_orm(has_many = "super::upgrade_record::Entity")]
    UpgradeRecord,
}

impl Related<super::component_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComponentGroup.def()
    }
}

impl Related<super::upgrade_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UpgradeRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
