//! Asset "used by" assignment.
//!
//! Managed devices report who last signed in through an asset type field.
//! This workflow matches that value against requesters and sets the asset's
//! `user_id` to the matching requester.

use std::str::FromStr;

use serde::Serialize;
use serde_json::json;

use super::RunOptions;
use crate::api_client::{ApiClient, ListParams};
use crate::error::FreshError;
use crate::models::{Asset, Requester};

/// How the last-login value identifies a requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Compare against first and last name joined without a space.
    CompactName,
    /// Compare against the primary email.
    Email,
}

impl FromStr for MatchMode {
    type Err = FreshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "compact-name" => Ok(MatchMode::CompactName),
            "email" => Ok(MatchMode::Email),
            other => Err(FreshError::validation(format!(
                "unknown match mode {:?}; expected `name` or `email`",
                other
            ))),
        }
    }
}

/// Finds the requester a last-login value refers to. Case-insensitive.
pub fn match_requester<'a>(
    last_login: &str,
    requesters: &'a [Requester],
    mode: MatchMode,
) -> Option<&'a Requester> {
    let wanted = last_login.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    requesters.iter().find(|requester| match mode {
        MatchMode::CompactName => requester.compact_name().to_lowercase() == wanted,
        MatchMode::Email => requester
            .email()
            .is_some_and(|email| email.to_lowercase() == wanted),
    })
}

/// An asset whose `user_id` should change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAssignment {
    /// Asset display ID.
    pub display_id: u64,
    /// Asset name for reporting.
    pub asset_name: String,
    /// Last-login value that matched.
    pub last_login: String,
    /// Requester to assign.
    pub user_id: u64,
}

/// Plans `user_id` updates for assets whose last login matches a requester.
///
/// Assets without the field, without a match, or already assigned to the
/// matched requester are skipped.
pub fn plan_asset_assignments(
    assets: &[Asset],
    requesters: &[Requester],
    last_login_field: &str,
    mode: MatchMode,
) -> Vec<PlannedAssignment> {
    assets
        .iter()
        .filter_map(|asset| {
            let last_login = asset.type_field(last_login_field)?;
            let requester = match_requester(&last_login, requesters, mode)?;
            if asset.user_id == Some(requester.id) {
                return None;
            }
            Some(PlannedAssignment {
                display_id: asset.display_id,
                asset_name: asset.display_name(),
                last_login,
                user_id: requester.id,
            })
        })
        .collect()
}

/// A failed asset update.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentFailure {
    /// Asset display ID.
    pub display_id: u64,
    /// What went wrong.
    pub error: String,
}

/// Outcome of an assignment run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentReport {
    /// Assets considered.
    pub assets_scanned: usize,
    /// Assignments made (or planned, on a dry run).
    pub assigned: Vec<PlannedAssignment>,
    /// Updates that failed.
    pub failed: Vec<AssignmentFailure>,
}

/// Applies planned assignments, recording per-asset failures.
pub async fn apply_asset_assignments(
    client: &ApiClient,
    plan: &[PlannedAssignment],
    options: &RunOptions,
) -> Result<AssignmentReport, FreshError> {
    let mut report = AssignmentReport::default();

    for (index, planned) in plan.iter().enumerate() {
        if options.dry_run {
            tracing::info!(
                asset = %planned.asset_name,
                user_id = planned.user_id,
                "Would assign asset"
            );
            report.assigned.push(planned.clone());
            continue;
        }

        if index > 0 {
            options.pause().await;
        }

        let payload = json!({ "user_id": planned.user_id });
        match client.update_asset(planned.display_id, &payload).await {
            Ok(_) => {
                tracing::info!(
                    asset = %planned.asset_name,
                    display_id = planned.display_id,
                    user_id = planned.user_id,
                    "Assigned asset"
                );
                report.assigned.push(planned.clone());
            }
            Err(e) if e.is_fatal_for_batch() => return Err(e),
            Err(e) => {
                tracing::warn!(display_id = planned.display_id, error = %e, "Failed to assign asset");
                report.failed.push(AssignmentFailure {
                    display_id: planned.display_id,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Parameters of an assignment run that depend on the deployment.
#[derive(Debug, Clone)]
pub struct AssignmentTarget {
    /// Asset type name to restrict to (e.g., "Laptop").
    pub asset_type: String,
    /// Type field holding the last sign-in (e.g., `last_login_by_17000000908`).
    pub last_login_field: String,
    /// How to match the field against requesters.
    pub mode: MatchMode,
    /// Restrict candidates to this requester group; all requesters otherwise.
    pub requester_group_id: Option<u64>,
}

/// Runs a full assignment: resolves the asset type, lists assets and
/// candidate requesters, plans, and applies.
pub async fn assign_assets(
    client: &ApiClient,
    target: &AssignmentTarget,
    options: &RunOptions,
) -> Result<AssignmentReport, FreshError> {
    let asset_type = client
        .list_asset_types()
        .await?
        .into_iter()
        .find(|t| {
            t.name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(&target.asset_type))
        })
        .ok_or_else(|| {
            FreshError::validation(format!("no asset type named {:?}", target.asset_type))
        })?;

    let assets: Vec<Asset> = client
        .list_assets(ListParams::new().with_type_fields())
        .await?
        .into_iter()
        .filter(|asset| asset.asset_type_id == Some(asset_type.id))
        .collect();

    let requesters = match target.requester_group_id {
        Some(group_id) => {
            client
                .requester_group_members(group_id, ListParams::new())
                .await?
        }
        None => client.all_requesters(ListParams::new()).await?,
    };

    let plan = plan_asset_assignments(&assets, &requesters, &target.last_login_field, target.mode);
    tracing::info!(
        asset_type = %target.asset_type,
        assets = assets.len(),
        requesters = requesters.len(),
        to_assign = plan.len(),
        "Planned asset assignments"
    );

    let mut report = apply_asset_assignments(client, &plan, options).await?;
    report.assets_scanned = assets.len();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn requester(id: u64, first: &str, last: &str, email: &str) -> Requester {
        serde_json::from_value(json!({
            "id": id,
            "first_name": first,
            "last_name": last,
            "primary_email": email
        }))
        .unwrap()
    }

    fn asset(display_id: u64, last_login: serde_json::Value, user_id: Option<u64>) -> Asset {
        serde_json::from_value(json!({
            "display_id": display_id,
            "name": format!("LT-{}", display_id),
            "user_id": user_id,
            "type_fields": {"last_login_by_9": last_login}
        }))
        .unwrap()
    }

    fn people() -> Vec<Requester> {
        vec![
            requester(1, "Ada", "Lovelace", "ada@x.org"),
            requester(2, "Alan", "Turing", "alan@x.org"),
        ]
    }

    #[test]
    fn test_match_mode_parse() {
        assert_eq!("name".parse::<MatchMode>().unwrap(), MatchMode::CompactName);
        assert_eq!("EMAIL".parse::<MatchMode>().unwrap(), MatchMode::Email);
        assert!("uid".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_match_by_compact_name() {
        let people = people();
        let found = match_requester("alanturing", &people, MatchMode::CompactName).unwrap();
        assert_eq!(found.id, 2);
        assert!(match_requester("Alan Turing", &people, MatchMode::CompactName).is_none());
    }

    #[test]
    fn test_match_by_email() {
        let people = people();
        let found = match_requester("ADA@x.org", &people, MatchMode::Email).unwrap();
        assert_eq!(found.id, 1);
        assert!(match_requester("", &people, MatchMode::Email).is_none());
    }

    #[test]
    fn test_plan_skips_null_unmatched_and_already_assigned() {
        let assets = vec![
            asset(10, json!("AdaLovelace"), None),
            asset(11, json!(null), None),
            asset(12, json!("Nobody"), None),
            asset(13, json!("AlanTuring"), Some(2)),
            asset(14, json!("AlanTuring"), Some(1)),
        ];

        let plan = plan_asset_assignments(&assets, &people(), "last_login_by_9", MatchMode::CompactName);

        assert_eq!(
            plan,
            vec![
                PlannedAssignment {
                    display_id: 10,
                    asset_name: "LT-10".to_string(),
                    last_login: "AdaLovelace".to_string(),
                    user_id: 1,
                },
                PlannedAssignment {
                    display_id: 14,
                    asset_name: "LT-14".to_string(),
                    last_login: "AlanTuring".to_string(),
                    user_id: 2,
                },
            ]
        );
    }

    #[test]
    fn test_plan_with_wrong_field_is_empty() {
        let assets = vec![asset(10, json!("AdaLovelace"), None)];
        let plan = plan_asset_assignments(&assets, &people(), "other_field", MatchMode::CompactName);
        assert!(plan.is_empty());
    }

    #[tokio::test]
    async fn test_assign_assets_updates_matching_assets() {
        use wiremock::matchers::{body_json, method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/asset_types"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "asset_types": [{"id": 3, "name": "Laptop"}, {"id": 4, "name": "Printer"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/assets"))
            .and(query_param("include", "type_fields"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "assets": [
                    {"display_id": 1, "name": "LT-1", "asset_type_id": 3,
                     "type_fields": {"last_login_by_9": "AdaLovelace"}},
                    {"display_id": 2, "name": "PR-2", "asset_type_id": 4,
                     "type_fields": {"last_login_by_9": "AdaLovelace"}},
                    {"display_id": 3, "name": "LT-3", "asset_type_id": 3,
                     "type_fields": {"last_login_by_9": null}}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/requester_groups/50/members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "requesters": [{"id": 1, "first_name": "Ada", "last_name": "Lovelace"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v2/assets/1"))
            .and(body_json(json!({"user_id": 1})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"asset": {"display_id": 1, "user_id": 1}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = crate::config::Config::new(&server.uri(), "test_key").unwrap();
        let client = ApiClient::new(&config).unwrap();
        let target = AssignmentTarget {
            asset_type: "laptop".to_string(),
            last_login_field: "last_login_by_9".to_string(),
            mode: MatchMode::CompactName,
            requester_group_id: Some(50),
        };

        let report = assign_assets(&client, &target, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(report.assets_scanned, 2);
        assert_eq!(report.assigned.len(), 1);
        assert_eq!(report.assigned[0].display_id, 1);
        assert!(report.failed.is_empty());
    }

    #[tokio::test]
    async fn test_assign_assets_unknown_type() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/asset_types"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"asset_types": []})),
            )
            .mount(&server)
            .await;

        let config = crate::config::Config::new(&server.uri(), "test_key").unwrap();
        let client = ApiClient::new(&config).unwrap();
        let target = AssignmentTarget {
            asset_type: "Laptop".to_string(),
            last_login_field: "f".to_string(),
            mode: MatchMode::Email,
            requester_group_id: None,
        };

        let err = assign_assets(&client, &target, &RunOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FreshError::Validation(_)));
    }
}
