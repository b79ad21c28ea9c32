/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status shared by application and component upgrade records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum UpgradeStatus {
    #[sea_orm(num_value = 1)]
    Not,
    #[sea_orm(num_value = 2)]
    Upgrading,
    #[sea_orm(num_value = 3)]
    Upgraded,
    #[sea_orm(num_value = 4)]
    Rolling,
    #[sea_orm(num_value = 5)]
    Rollback,
    #[sea_orm(num_value = 6)]
    PartialUpgraded,
    #[sea_orm(num_value = 7)]
    PartialRollback,
    #[sea_orm(num_value = 8)]
    UpgradeFailed,
    #[sea_orm(num_value = 9)]
    RollbackFailed,
    #[sea_orm(num_value = 10)]
    DeployFailed,
}

impl UpgradeStatus {
    /// Statuses that still count against the single unfinished record of a scope.
    pub const UNFINISHED: [UpgradeStatus; 3] = [
        UpgradeStatus::Not,
        UpgradeStatus::Upgrading,
        UpgradeStatus::Rolling,
    ];

    pub fn is_finished(self) -> bool {
        !Self::UNFINISHED.contains(&self)
    }

    pub fn is_failed(self) -> bool {
        matches!(
            self,
            UpgradeStatus::UpgradeFailed | UpgradeStatus::RollbackFailed | UpgradeStatus::DeployFailed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    #[sea_orm(num_value = 1)]
    Upgrade,
    #[sea_orm(num_value = 2)]
    Rollback,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "upgrade_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_env: Uuid,
    pub application: Uuid,
    pub upgrade_group: Uuid,
    pub group_key: String,
    pub group_name: String,
    pub version: String,
    pub old_version: String,
    pub status: UpgradeStatus,
    pub record_type: RecordType,
    pub snapshot: Option<Uuid>,
    pub parent: Option<Uuid>,
    pub is_from_cloud: bool,
    pub market_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::application::Entity",
        from = "Column::Application",
        to = "super::application::Column::Id"
    )]
    Application,
    #[sea_orm(has_many = "super::component_upgrade_record::Entity")]
    ComponentUpgradeRecord,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl Related<super::component_upgrade_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComponentUpgradeRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn can_upgrade(&self) -> bool {
        self.status == UpgradeStatus::Not
    }

    pub fn can_rollback(&self) -> bool {
        self.record_type == RecordType::Upgrade
            && matches!(
                self.status,
                UpgradeStatus::Upgraded
                    | UpgradeStatus::Rollback
                    | UpgradeStatus::PartialUpgraded
                    | UpgradeStatus::PartialRollback
                    | UpgradeStatus::DeployFailed
            )
    }

    pub fn can_deploy(&self) -> bool {
        self.is_finished()
            && matches!(
                self.status,
                UpgradeStatus::UpgradeFailed
                    | UpgradeStatus::RollbackFailed
                    | UpgradeStatus::PartialUpgraded
                    | UpgradeStatus::PartialRollback
                    | UpgradeStatus::DeployFailed
            )
    }

    /// Status an attempt of this record moves to while its components are outstanding.
    pub fn in_progress_status(&self) -> UpgradeStatus {
        match self.record_type {
            RecordType::Upgrade => UpgradeStatus::Upgrading,
            RecordType::Rollback => UpgradeStatus::Rolling,
        }
    }
}
