// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the alert shown for one inquiry.

use lookout_core::types::{NotificationAction, NotificationData};
use lookout_core::{Inquiry, Notification};

/// Body used when the inquiry carries no name, project, or budget.
pub const GENERIC_BODY: &str = "A new inquiry has arrived.";

/// What a caller already knows about an inquiry it wants to announce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryAlert {
    pub id: String,
    pub name: Option<String>,
    pub project_type: Option<String>,
    pub budget: Option<String>,
}

impl InquiryAlert {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl From<&Inquiry> for InquiryAlert {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            id: inquiry.id.clone(),
            name: inquiry.full_name.clone(),
            project_type: inquiry.project_type.clone(),
            budget: inquiry.budget.clone(),
        }
    }
}

/// Render `alert` with the given title.
///
/// The tag is the inquiry id, so a repeat emission replaces the first.
pub fn compose(title: &str, alert: &InquiryAlert) -> Notification {
    let lines: Vec<String> = [
        present(&alert.name).map(str::to_string),
        present(&alert.project_type).map(|p| format!("Project: {p}")),
        present(&alert.budget).map(|b| format!("Budget: {b}")),
    ]
    .into_iter()
    .flatten()
    .collect();

    let body = if lines.is_empty() {
        GENERIC_BODY.to_string()
    } else {
        lines.join("\n")
    };

    Notification {
        tag: alert.id.clone(),
        title: title.to_string(),
        body,
        actions: vec![
            NotificationAction {
                action: "view".into(),
                title: "View".into(),
            },
            NotificationAction {
                action: "dismiss".into(),
                title: "Dismiss".into(),
            },
        ],
        data: NotificationData {
            inquiry_id: alert.id.clone(),
        },
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
