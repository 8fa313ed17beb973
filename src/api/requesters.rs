//! Requester operations.
//!
//! Requesters are the people who raise tickets. Besides CRUD, Freshservice
//! exposes lifecycle transitions: deactivate (soft delete), forget
//! (permanent delete), reactivate, merge, and conversion to an agent.

use serde::Serialize;

use super::resource::{AGENTS, REQUESTERS};
use super::Lookup;
use crate::api_client::{ApiClient, ListParams};
use crate::error::FreshError;
use crate::models::{Agent, FieldDefinition, Requester};

impl ApiClient {
    /// Creates a requester.
    pub async fn create_requester<P>(&self, payload: &P) -> Result<Requester, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.create_item(&REQUESTERS, payload).await
    }

    /// Looks up requesters by email or by ID.
    ///
    /// Exactly one of `email` and `requester_id` must be supplied. An email
    /// lookup may return zero or more records; an ID lookup returns one.
    ///
    /// # Errors
    ///
    /// Returns `FreshError::Validation` when neither or both are supplied.
    pub async fn view_requester(
        &self,
        email: Option<&str>,
        requester_id: Option<u64>,
    ) -> Result<Vec<Requester>, FreshError> {
        let lookup = Lookup::from_options(email, requester_id)?;
        self.lookup(&REQUESTERS, lookup).await
    }

    /// Returns the requester with this email, if one exists.
    pub async fn find_requester_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Requester>, FreshError> {
        let found = self.view_requester(Some(email), None).await?;
        Ok(found.into_iter().next())
    }

    /// Lists every requester, following pages.
    pub async fn all_requesters(&self, params: ListParams) -> Result<Vec<Requester>, FreshError> {
        self.list_items(&REQUESTERS, &params).await
    }

    /// Lists the requester form fields.
    pub async fn requester_fields(&self) -> Result<Vec<FieldDefinition>, FreshError> {
        self.list_at("/requester_fields", "requester_fields", false, &ListParams::new())
            .await
    }

    /// Updates a requester.
    pub async fn update_requester<P>(
        &self,
        requester_id: u64,
        payload: &P,
    ) -> Result<Requester, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.update_item(&REQUESTERS, requester_id, payload).await
    }

    /// Deactivates a requester. The record is kept and can be reactivated.
    pub async fn deactivate_requester(&self, requester_id: u64) -> Result<String, FreshError> {
        self.delete_at(&REQUESTERS.item_path(requester_id)).await?;
        Ok(format!("Successfully deactivated requester: {}", requester_id))
    }

    /// Permanently deletes a requester and their tickets.
    pub async fn delete_requester(&self, requester_id: u64) -> Result<String, FreshError> {
        self.delete_at(&REQUESTERS.action_path(requester_id, "forget"))
            .await?;
        Ok(format!("Successfully deleted requester: {}", requester_id))
    }

    /// Converts a requester into an agent.
    pub async fn convert_requester_to_agent(&self, requester_id: u64) -> Result<Agent, FreshError> {
        let path = REQUESTERS.action_path(requester_id, "convert_to_agent");
        self.transition(&path, &[], AGENTS.item_key).await
    }

    /// Merges secondary requesters into a primary one.
    pub async fn merge_requesters(
        &self,
        requester_id: u64,
        secondary_ids: &[u64],
    ) -> Result<Requester, FreshError> {
        if secondary_ids.is_empty() {
            return Err(FreshError::validation(
                "at least one secondary requester is required",
            ));
        }
        if secondary_ids.contains(&requester_id) {
            return Err(FreshError::validation(
                "a requester cannot be merged into itself",
            ));
        }

        let secondary = secondary_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let path = REQUESTERS.action_path(requester_id, "merge");
        self.transition(&path, &[("secondary_requesters", secondary)], REQUESTERS.item_key)
            .await
    }

    /// Reactivates a deactivated requester.
    pub async fn reactivate_requester(&self, requester_id: u64) -> Result<Requester, FreshError> {
        let path = REQUESTERS.action_path(requester_id, "reactivate");
        self.transition(&path, &[], REQUESTERS.item_key).await
    }
}
