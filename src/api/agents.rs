//! Agent operations.

use serde::Serialize;

use super::resource::{AGENTS, REQUESTERS};
use super::Lookup;
use crate::api_client::{ApiClient, ListParams};
use crate::error::FreshError;
use crate::models::{Agent, FieldDefinition, Requester};

impl ApiClient {
    /// Creates an agent.
    pub async fn create_agent<P>(&self, payload: &P) -> Result<Agent, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.create_item(&AGENTS, payload).await
    }

    /// Looks up agents by email or by ID.
    ///
    /// Exactly one of `email` and `agent_id` must be supplied.
    ///
    /// # Errors
    ///
    /// Returns `FreshError::Validation` when neither or both are supplied.
    pub async fn view_agent(
        &self,
        email: Option<&str>,
        agent_id: Option<u64>,
    ) -> Result<Vec<Agent>, FreshError> {
        let lookup = Lookup::from_options(email, agent_id)?;
        self.lookup(&AGENTS, lookup).await
    }

    /// Lists every agent, following pages.
    pub async fn all_agents(&self, params: ListParams) -> Result<Vec<Agent>, FreshError> {
        self.list_items(&AGENTS, &params).await
    }

    /// Updates an agent.
    pub async fn update_agent<P>(&self, agent_id: u64, payload: &P) -> Result<Agent, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.update_item(&AGENTS, agent_id, payload).await
    }

    /// Deactivates an agent.
    pub async fn deactivate_agent(&self, agent_id: u64) -> Result<String, FreshError> {
        self.delete_at(&AGENTS.item_path(agent_id)).await?;
        Ok(format!("Successfully deactivated agent: {}", agent_id))
    }

    /// Permanently deletes an agent.
    pub async fn forget_agent(&self, agent_id: u64) -> Result<String, FreshError> {
        self.delete_at(&AGENTS.action_path(agent_id, "forget")).await?;
        Ok(format!("Successfully deleted agent: {}", agent_id))
    }

    /// Reactivates a deactivated agent.
    pub async fn reactivate_agent(&self, agent_id: u64) -> Result<Agent, FreshError> {
        let path = AGENTS.action_path(agent_id, "reactivate");
        self.transition(&path, &[], AGENTS.item_key).await
    }

    /// Converts an agent into a requester.
    pub async fn convert_agent_to_requester(&self, agent_id: u64) -> Result<Requester, FreshError> {
        let path = AGENTS.action_path(agent_id, "convert_to_requester");
        self.transition(&path, &[], REQUESTERS.item_key).await
    }

    /// Lists the agent form fields.
    pub async fn agent_fields(&self) -> Result<Vec<FieldDefinition>, FreshError> {
        self.list_at("/agent_fields", "agent_fields", false, &ListParams::new())
            .await
    }
}
