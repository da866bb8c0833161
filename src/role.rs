//! Platform roles. Each role owns a landing dashboard and the marketing copy
//! shown while it is selected on the registration form.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    Reviewer,
    Viewer,
}

/// Themed copy for a role, or for the platform when no role applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleContent {
    pub title: &'static str,
    pub description: &'static str,
    /// Image asset name; `None` means the randomly picked office background.
    pub image: Option<&'static str>,
}

pub const PLATFORM_CONTENT: RoleContent = RoleContent {
    title: "Enterprise Workflow Platform",
    description: "The Intelligent Enterprise Operations & Decision Platform (IEODP) is a \
        next-generation, AI-enhanced workflow automation and decision-making platform designed \
        to streamline enterprise operations, enforce governance, simplify approval workflows, \
        and provide real-time insights across organizational teams.",
    image: None,
};

impl Role {
    pub const ALL: [Self; 4] = [Self::Admin, Self::Manager, Self::Reviewer, Self::Viewer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Reviewer => "REVIEWER",
            Self::Viewer => "VIEWER",
        }
    }

    /// Human label used in role pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Reviewer => "Reviewer",
            Self::Viewer => "Viewer",
        }
    }

    #[must_use]
    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin-dashboard",
            Self::Manager => "/manager-dashboard",
            Self::Reviewer => "/reviewer-dashboard",
            Self::Viewer => "/viewer-dashboard",
        }
    }

    #[must_use]
    pub const fn content(self) -> RoleContent {
        match self {
            Self::Admin => RoleContent {
                title: "Enterprise Administration & Governance",
                description: "Administrators manage governance, access control, compliance, \
                    audits, and system stability.",
                image: Some("admin.jpg"),
            },
            Self::Manager => RoleContent {
                title: "Team Leadership & Performance Management",
                description: "Managers oversee workflows, team productivity, approvals, \
                    analytics, and operational efficiency.",
                image: Some("manager.jpg"),
            },
            Self::Reviewer => RoleContent {
                title: "Workflow Review & Quality Assurance",
                description: "Reviewers validate workflows, ensure quality, and maintain \
                    compliance.",
                image: Some("reviewer.jpg"),
            },
            Self::Viewer => RoleContent {
                title: "Insights, Monitoring & Transparency",
                description: "Viewers access dashboards and reports in read-only mode.",
                image: Some("viewer.jpg"),
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive; any other difference, whitespace included, is an unknown role.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "REVIEWER" => Ok(Self::Reviewer),
            "VIEWER" => Ok(Self::Viewer),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}
