//! Ticket operations.

use serde::Serialize;

use super::resource::TICKETS;
use crate::api_client::{ApiClient, ListParams};
use crate::error::FreshError;
use crate::models::Ticket;

impl ApiClient {
    /// Creates a ticket.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let ticket = client
    ///     .create_ticket(&json!({
    ///         "subject": "Printer not working",
    ///         "email": "ada@example.com",
    ///         "priority": 1,
    ///         "status": 2
    ///     }))
    ///     .await?;
    /// println!("Created ticket #{}", ticket.id);
    /// ```
    pub async fn create_ticket<P>(&self, payload: &P) -> Result<Ticket, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.create_item(&TICKETS, payload).await
    }

    /// Gets a single ticket.
    ///
    /// # Errors
    ///
    /// Returns `FreshError::NotFound` if the ticket doesn't exist.
    pub async fn view_ticket(&self, ticket_id: u64) -> Result<Ticket, FreshError> {
        self.view_item(&TICKETS, ticket_id, &[]).await
    }

    /// Lists every ticket, following pages.
    pub async fn all_tickets(&self, params: ListParams) -> Result<Vec<Ticket>, FreshError> {
        self.list_items(&TICKETS, &params).await
    }

    /// Updates a ticket.
    pub async fn update_ticket<P>(&self, ticket_id: u64, payload: &P) -> Result<Ticket, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.update_item(&TICKETS, ticket_id, payload).await
    }

    /// Deletes a ticket.
    pub async fn delete_ticket(&self, ticket_id: u64) -> Result<String, FreshError> {
        self.delete_item(&TICKETS, ticket_id).await
    }
}
