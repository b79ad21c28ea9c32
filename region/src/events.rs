/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub event_ids: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EventStatus {
    #[serde(alias = "EventID")]
    pub event_id: String,
    #[serde(alias = "Status", default)]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Success,
    Failure,
    Timeout,
    /// Still running, or a status this client does not know.
    Pending,
}

impl EventStatus {
    pub fn outcome(&self) -> EventOutcome {
        match self.status.as_str() {
            "success" => EventOutcome::Success,
            "failure" => EventOutcome::Failure,
            "timeout" => EventOutcome::Timeout,
            _ => EventOutcome::Pending,
        }
    }
}
