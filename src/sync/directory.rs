//! Directory-to-requester sync.
//!
//! Takes users exported from a directory service, sorts them into cohorts by
//! organizational unit, and creates a requester (plus requester group
//! membership) for every user whose email is not already known.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RunOptions;
use crate::api_client::{ApiClient, ListParams};
use crate::error::FreshError;
use crate::models::{NewRequester, Requester};

/// A user from a directory export (Google Workspace Directory shape).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    /// Primary email address.
    pub primary_email: String,

    /// Structured name, as returned by the Directory API.
    #[serde(default)]
    pub name: Option<DirectoryName>,

    /// Flat given name, for exports that flatten the name.
    #[serde(default)]
    pub given_name: Option<String>,

    /// Flat family name, for exports that flatten the name.
    #[serde(default)]
    pub family_name: Option<String>,

    /// Organizational unit path, e.g. `/Staff` or `/Students/2027`.
    #[serde(default)]
    pub org_unit_path: String,
}

/// Structured directory name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryName {
    /// Given name.
    #[serde(default)]
    pub given_name: Option<String>,

    /// Family name.
    #[serde(default)]
    pub family_name: Option<String>,
}

impl DirectoryUser {
    /// Given name from the structured name, falling back to the flat field.
    pub fn first_name(&self) -> Option<&str> {
        self.name
            .as_ref()
            .and_then(|n| n.given_name.as_deref())
            .or(self.given_name.as_deref())
    }

    /// Family name from the structured name, falling back to the flat field.
    pub fn last_name(&self) -> Option<&str> {
        self.name
            .as_ref()
            .and_then(|n| n.family_name.as_deref())
            .or(self.family_name.as_deref())
    }

    /// Builds the requester payload for this user.
    ///
    /// Freshservice requires a first name; the email's local part stands in
    /// when the directory has none.
    pub fn to_new_requester(&self) -> NewRequester {
        let first_name = self
            .first_name()
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                self.primary_email
                    .split('@')
                    .next()
                    .unwrap_or_default()
                    .to_string()
            });

        NewRequester {
            first_name,
            last_name: self.last_name().map(str::to_string),
            primary_email: self.primary_email.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DirectoryExport {
    Users(Vec<DirectoryUser>),
    Page { users: Vec<DirectoryUser> },
}

/// Parses a directory export: either a bare array of users or an object
/// with a `users` array.
pub fn parse_directory_export(json: &str) -> Result<Vec<DirectoryUser>, FreshError> {
    let export: DirectoryExport = serde_json::from_str(json)?;
    Ok(match export {
        DirectoryExport::Users(users) => users,
        DirectoryExport::Page { users } => users,
    })
}

/// Reads and parses a directory export file.
pub fn load_directory_export(path: &Path) -> Result<Vec<DirectoryUser>, FreshError> {
    let json = std::fs::read_to_string(path)?;
    let users = parse_directory_export(&json)?;
    tracing::info!(path = %path.display(), users = users.len(), "Loaded directory export");
    Ok(users)
}

/// How a cohort rule compares an organizational unit path.
///
/// Comparisons ignore ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgUnitMatch {
    /// The path equals the pattern.
    Exact(String),
    /// The path contains the pattern.
    Contains(String),
}

impl OrgUnitMatch {
    fn matches(&self, org_unit_path: &str) -> bool {
        let path = org_unit_path.to_lowercase();
        match self {
            OrgUnitMatch::Exact(pattern) => path == pattern.to_lowercase(),
            OrgUnitMatch::Contains(pattern) => path.contains(&pattern.to_lowercase()),
        }
    }
}

/// Maps an organizational unit to a requester group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortRule {
    /// Cohort name used in logs and reports.
    pub name: String,

    /// Which organizational units belong to the cohort.
    pub org_unit: OrgUnitMatch,

    /// Requester group new members are added to.
    pub group_id: u64,
}

impl CohortRule {
    /// Returns true if the user belongs to this cohort.
    pub fn matches(&self, user: &DirectoryUser) -> bool {
        self.org_unit.matches(&user.org_unit_path)
    }
}

impl FromStr for CohortRule {
    type Err = FreshError;

    /// Parses `NAME:exact|contains:GROUP_ID:PATTERN`.
    ///
    /// The pattern comes last so it may itself contain `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            FreshError::validation(format!(
                "cohort rule {:?} must look like NAME:exact|contains:GROUP_ID:PATTERN",
                s
            ))
        };

        let mut parts = s.splitn(4, ':');
        let name = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let mode = parts.next().ok_or_else(invalid)?;
        let group_id = parts
            .next()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .ok_or_else(invalid)?;
        let pattern = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(invalid)?
            .to_string();

        let org_unit = match mode.to_ascii_lowercase().as_str() {
            "exact" => OrgUnitMatch::Exact(pattern),
            "contains" => OrgUnitMatch::Contains(pattern),
            _ => return Err(invalid()),
        };

        Ok(CohortRule {
            name: name.to_string(),
            org_unit,
            group_id,
        })
    }
}

/// A requester to create and the group to attach them to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRequester {
    /// Cohort the user matched.
    pub cohort: String,

    /// Requester group to join.
    pub group_id: u64,

    /// Payload for the create call.
    pub requester: NewRequester,
}

/// Works out which directory users still need a requester.
///
/// Each user is assigned to the first matching rule; users matching no rule
/// are ignored. Emails are compared case-insensitively against existing
/// requesters, and a user appearing twice in the export is planned once.
pub fn plan_requester_sync(
    users: &[DirectoryUser],
    existing: &[Requester],
    rules: &[CohortRule],
) -> Vec<PlannedRequester> {
    let mut known: HashSet<String> = existing
        .iter()
        .filter_map(Requester::email)
        .map(str::to_lowercase)
        .collect();

    let mut plan = Vec::new();
    for user in users {
        let Some(rule) = rules.iter().find(|rule| rule.matches(user)) else {
            continue;
        };

        let email = user.primary_email.trim().to_lowercase();
        if email.is_empty() || !known.insert(email) {
            continue;
        }

        plan.push(PlannedRequester {
            cohort: rule.name.clone(),
            group_id: rule.group_id,
            requester: user.to_new_requester(),
        });
    }
    plan
}

/// One requester created by a sync run.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedRequester {
    /// Email of the new requester.
    pub email: String,
    /// Cohort the requester was placed in.
    pub cohort: String,
    /// New requester ID (`None` on dry runs).
    pub requester_id: Option<u64>,
    /// Whether group membership was added.
    pub added_to_group: bool,
}

/// A user the sync could not process.
#[derive(Debug, Clone, Serialize)]
pub struct SyncFailure {
    /// Email of the user.
    pub email: String,
    /// What went wrong.
    pub error: String,
}

/// Outcome of a requester sync.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Requesters created (or that would be, on a dry run).
    pub created: Vec<CreatedRequester>,
    /// Users that failed.
    pub failed: Vec<SyncFailure>,
}

/// Creates the planned requesters and attaches them to their groups.
///
/// A failure on one user is recorded and the run continues. Errors that
/// make the rest of the batch pointless (authentication, client setup)
/// abort the run.
pub async fn apply_requester_sync(
    client: &ApiClient,
    plan: &[PlannedRequester],
    options: &RunOptions,
) -> Result<SyncReport, FreshError> {
    let mut report = SyncReport::default();

    for (index, planned) in plan.iter().enumerate() {
        let email = planned.requester.primary_email.clone();

        if options.dry_run {
            tracing::info!(email = %email, cohort = %planned.cohort, "Would create requester");
            report.created.push(CreatedRequester {
                email,
                cohort: planned.cohort.clone(),
                requester_id: None,
                added_to_group: false,
            });
            continue;
        }

        if index > 0 {
            options.pause().await;
        }

        let requester = match client.create_requester(&planned.requester).await {
            Ok(requester) => requester,
            Err(e) if e.is_fatal_for_batch() => return Err(e),
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Failed to create requester");
                report.failed.push(SyncFailure {
                    email,
                    error: e.to_string(),
                });
                continue;
            }
        };

        tracing::info!(email = %email, requester_id = requester.id, "Created requester");

        let added_to_group = match client.add_group_member(planned.group_id, requester.id).await {
            Ok(_) => true,
            Err(e) if e.is_fatal_for_batch() => return Err(e),
            Err(e) => {
                tracing::warn!(
                    email = %email,
                    group_id = planned.group_id,
                    error = %e,
                    "Failed to add requester to group"
                );
                report.failed.push(SyncFailure {
                    email: email.clone(),
                    error: format!("created but not added to group {}: {}", planned.group_id, e),
                });
                false
            }
        };

        report.created.push(CreatedRequester {
            email,
            cohort: planned.cohort.clone(),
            requester_id: Some(requester.id),
            added_to_group,
        });
    }

    Ok(report)
}

/// Runs a full sync: lists existing requesters, plans, and applies.
pub async fn sync_requesters(
    client: &ApiClient,
    users: &[DirectoryUser],
    rules: &[CohortRule],
    options: &RunOptions,
) -> Result<SyncReport, FreshError> {
    if rules.is_empty() {
        return Err(FreshError::validation("at least one cohort rule is required"));
    }

    let existing = client.all_requesters(ListParams::new()).await?;
    let plan = plan_requester_sync(users, &existing, rules);
    tracing::info!(
        directory_users = users.len(),
        existing_requesters = existing.len(),
        to_create = plan.len(),
        "Planned requester sync"
    );

    apply_requester_sync(client, &plan, options).await
}
