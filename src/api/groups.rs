//! Role, agent group and requester group operations.

use serde::Serialize;

use super::resource::{AGENT_GROUPS, REQUESTERS, REQUESTER_GROUPS, ROLES};
use crate::api_client::{ApiClient, ListParams};
use crate::error::FreshError;
use crate::models::{AgentGroup, Requester, RequesterGroup, Role};

impl ApiClient {
    // ========================================================================
    // Agent roles
    // ========================================================================

    /// Gets a single agent role.
    pub async fn view_role(&self, role_id: u64) -> Result<Role, FreshError> {
        self.view_item(&ROLES, role_id, &[]).await
    }

    /// Lists agent roles.
    pub async fn all_roles(&self) -> Result<Vec<Role>, FreshError> {
        self.list_items(&ROLES, &ListParams::new()).await
    }

    // ========================================================================
    // Agent groups
    // ========================================================================

    /// Creates an agent group.
    pub async fn create_agent_group<P>(&self, payload: &P) -> Result<AgentGroup, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.create_item(&AGENT_GROUPS, payload).await
    }

    /// Gets a single agent group.
    pub async fn view_agent_group(&self, group_id: u64) -> Result<AgentGroup, FreshError> {
        self.view_item(&AGENT_GROUPS, group_id, &[]).await
    }

    /// Lists agent groups.
    pub async fn all_agent_groups(&self) -> Result<Vec<AgentGroup>, FreshError> {
        self.list_items(&AGENT_GROUPS, &ListParams::new()).await
    }

    /// Updates an agent group.
    pub async fn update_agent_group<P>(
        &self,
        group_id: u64,
        payload: &P,
    ) -> Result<AgentGroup, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.update_item(&AGENT_GROUPS, group_id, payload).await
    }

    /// Deletes an agent group.
    pub async fn delete_agent_group(&self, group_id: u64) -> Result<String, FreshError> {
        self.delete_item(&AGENT_GROUPS, group_id).await
    }

    // ========================================================================
    // Requester groups
    // ========================================================================

    /// Creates a requester group.
    pub async fn create_requester_group<P>(&self, payload: &P) -> Result<RequesterGroup, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.create_item(&REQUESTER_GROUPS, payload).await
    }

    /// Gets a single requester group.
    pub async fn view_requester_group(&self, group_id: u64) -> Result<RequesterGroup, FreshError> {
        self.view_item(&REQUESTER_GROUPS, group_id, &[]).await
    }

    /// Lists requester groups.
    pub async fn all_requester_groups(
        &self,
        params: ListParams,
    ) -> Result<Vec<RequesterGroup>, FreshError> {
        self.list_items(&REQUESTER_GROUPS, &params).await
    }

    /// Updates a requester group.
    pub async fn update_requester_group<P>(
        &self,
        group_id: u64,
        payload: &P,
    ) -> Result<RequesterGroup, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.update_item(&REQUESTER_GROUPS, group_id, payload).await
    }

    /// Deletes a requester group.
    pub async fn delete_requester_group(&self, group_id: u64) -> Result<String, FreshError> {
        self.delete_item(&REQUESTER_GROUPS, group_id).await
    }

    /// Adds a requester to a manual requester group.
    pub async fn add_group_member(
        &self,
        group_id: u64,
        requester_id: u64,
    ) -> Result<String, FreshError> {
        let path = members_path(group_id, Some(requester_id));
        let url = self.endpoint(&path, &[])?;
        self.create(&url, None).await?;
        Ok(format!(
            "Successfully added requester: {} to requester group: {}",
            requester_id, group_id
        ))
    }

    /// Removes a requester from a manual requester group.
    pub async fn delete_group_member(
        &self,
        group_id: u64,
        requester_id: u64,
    ) -> Result<String, FreshError> {
        self.delete_at(&members_path(group_id, Some(requester_id)))
            .await?;
        Ok(format!(
            "Successfully removed requester: {} from requester group: {}",
            requester_id, group_id
        ))
    }

    /// Lists the members of a requester group, following pages.
    pub async fn requester_group_members(
        &self,
        group_id: u64,
        params: ListParams,
    ) -> Result<Vec<Requester>, FreshError> {
        self.list_at(
            &members_path(group_id, None),
            REQUESTERS.collection_key,
            true,
            &params,
        )
        .await
    }
}

fn members_path(group_id: u64, requester_id: Option<u64>) -> String {
    let members = REQUESTER_GROUPS.action_path(group_id, "members");
    match requester_id {
        Some(id) => format!("{}/{}", members, id),
        None => members,
    }
}
