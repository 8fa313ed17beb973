//! Resource operations for the Freshservice API.
//!
//! Every operation is the same composition: build a path from a
//! [`Resource`], call one verb primitive, follow pages if the resource is
//! paginated, and unwrap the expected envelope key. The generic template
//! lives in this module; the per-resource files are thin, declarative
//! calls into it.

mod agents;
mod assets;
mod catalog;
mod groups;
mod requesters;
pub mod resource;
mod tickets;

pub use resource::Resource;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api_client::{ApiClient, ListParams, MAX_PER_PAGE};
use crate::error::FreshError;

/// Identifies one person by exactly one of email or ID.
///
/// Requester and agent lookups accept both as optional arguments; exactly
/// one must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Filter the collection by email.
    Email(&'a str),
    /// Fetch the record by ID.
    Id(u64),
}

impl<'a> Lookup<'a> {
    /// Builds a lookup from the two optional arguments.
    ///
    /// # Errors
    ///
    /// Returns `FreshError::Validation` when neither or both are supplied,
    /// or when the email is blank.
    pub fn from_options(email: Option<&'a str>, id: Option<u64>) -> Result<Self, FreshError> {
        match (email.map(str::trim), id) {
            (Some(""), _) => Err(FreshError::validation("email must not be empty")),
            (Some(email), None) => Ok(Lookup::Email(email)),
            (None, Some(id)) => Ok(Lookup::Id(id)),
            (None, None) => Err(FreshError::validation(
                "either an email or an id is required",
            )),
            (Some(_), Some(_)) => Err(FreshError::validation(
                "email and id are mutually exclusive; supply only one",
            )),
        }
    }
}

/// Serializes a caller payload into the JSON body sent on the wire.
fn to_body<P>(payload: &P) -> Result<serde_json::Value, FreshError>
where
    P: Serialize + ?Sized,
{
    Ok(serde_json::to_value(payload)?)
}

impl ApiClient {
    /// Creates an item and unwraps the singleton key.
    pub async fn create_item<T, P>(&self, resource: &Resource, payload: &P) -> Result<T, FreshError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = self.endpoint(&resource.collection_path(), &[])?;
        let body = to_body(payload)?;
        self.create(&url, Some(&body)).await?.unwrap_key(resource.item_key)
    }

    /// Fetches one item by ID and unwraps the singleton key.
    pub async fn view_item<T>(
        &self,
        resource: &Resource,
        id: u64,
        query: &[(&str, String)],
    ) -> Result<T, FreshError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(&resource.item_path(id), query)?;
        self.fetch(&url)
            .await
            .map_err(|e| match e {
                FreshError::NotFound { .. } => {
                    FreshError::not_found(format!("{} {}", resource.noun, id))
                }
                other => other,
            })?
            .unwrap_key(resource.item_key)
    }

    /// Lists a collection.
    ///
    /// Paginated resources follow `link` headers and default to
    /// 100 items per page; the others return the first page only.
    pub async fn list_items<T>(
        &self,
        resource: &Resource,
        params: &ListParams,
    ) -> Result<Vec<T>, FreshError>
    where
        T: DeserializeOwned,
    {
        self.list_at(&resource.collection_path(), resource.collection_key, resource.paginated, params)
            .await
    }

    /// Lists the collection under `path`, unwrapping `key`.
    pub(crate) async fn list_at<T>(
        &self,
        path: &str,
        key: &str,
        paginated: bool,
        params: &ListParams,
    ) -> Result<Vec<T>, FreshError>
    where
        T: DeserializeOwned,
    {
        let mut query = params.to_query()?;
        if paginated && !query.iter().any(|(name, _)| *name == "per_page") {
            query.insert(0, ("per_page", MAX_PER_PAGE.to_string()));
        }

        let url = self.endpoint(path, &query)?;
        if paginated {
            self.fetch_all(url, key, params).await
        } else {
            self.fetch(&url).await?.unwrap_key(key)
        }
    }

    /// Updates an item with PUT and unwraps the singleton key.
    pub async fn update_item<T, P>(
        &self,
        resource: &Resource,
        id: u64,
        payload: &P,
    ) -> Result<T, FreshError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = self.endpoint(&resource.item_path(id), &[])?;
        let body = to_body(payload)?;
        self.replace(&url, Some(&body)).await?.unwrap_key(resource.item_key)
    }

    /// Issues a body-less PUT to `path` and unwraps `key`.
    ///
    /// Used by state-transition endpoints (reactivate, convert, merge).
    pub(crate) async fn transition<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        key: &str,
    ) -> Result<T, FreshError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, query)?;
        self.replace(&url, None).await?.unwrap_key(key)
    }

    /// Looks up people by email (collection filter) or by ID (singleton).
    ///
    /// Both forms return a list so callers handle "no match" uniformly.
    pub(crate) async fn lookup<T>(
        &self,
        resource: &Resource,
        lookup: Lookup<'_>,
    ) -> Result<Vec<T>, FreshError>
    where
        T: DeserializeOwned,
    {
        match lookup {
            Lookup::Email(email) => {
                let url = self.endpoint(
                    &resource.collection_path(),
                    &[("email", email.to_string())],
                )?;
                self.fetch(&url).await?.unwrap_key(resource.collection_key)
            }
            Lookup::Id(id) => Ok(vec![self.view_item(resource, id, &[]).await?]),
        }
    }

    /// Deletes an item and returns a confirmation message.
    pub async fn delete_item(&self, resource: &Resource, id: u64) -> Result<String, FreshError> {
        self.delete_at(&resource.item_path(id)).await?;
        Ok(format!("Successfully deleted {}: {}", resource.noun, id))
    }

    /// Issues a DELETE to `path`, discarding the body.
    pub(crate) async fn delete_at(&self, path: &str) -> Result<(), FreshError> {
        let url = self.endpoint(path, &[])?;
        self.delete(&url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Requester, Ticket};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(domain: &str) -> ApiClient {
        let config = Config::new(domain, "test_key").unwrap();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_lookup_email_only() {
        assert_eq!(
            Lookup::from_options(Some(" ada@example.com "), None).unwrap(),
            Lookup::Email("ada@example.com")
        );
    }

    #[test]
    fn test_lookup_id_only() {
        assert_eq!(Lookup::from_options(None, Some(9)).unwrap(), Lookup::Id(9));
    }

    #[test]
    fn test_lookup_requires_exactly_one() {
        let neither = Lookup::from_options(None, None).unwrap_err();
        assert!(matches!(neither, FreshError::Validation(_)));

        let both = Lookup::from_options(Some("ada@example.com"), Some(9)).unwrap_err();
        assert!(both.to_string().contains("mutually exclusive"));

        assert!(Lookup::from_options(Some("  "), None).is_err());
    }

    #[tokio::test]
    async fn test_create_ticket_unwraps_singleton_key() {
        let server = MockServer::start().await;
        let payload = json!({"subject": "Printer on fire", "email": "ada@example.com"});
        Mock::given(method("POST"))
            .and(path("/api/v2/tickets"))
            .and(body_json(&payload))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"ticket": {"id": 42, "subject": "Printer on fire"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let ticket = client.create_ticket(&payload).await.unwrap();
        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.display_subject(), "Printer on fire");
    }

    #[tokio::test]
    async fn test_view_item_not_found_names_the_resource() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/tickets/7"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.view_ticket(7).await.unwrap_err();
        assert!(matches!(err, FreshError::NotFound { ref resource } if resource == "ticket 7"));
    }

    #[tokio::test]
    async fn test_list_paginated_resource_defaults_per_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/requesters"))
            .and(query_param("per_page", "100"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"requesters": [{"id": 1}, {"id": 2}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let requesters = client.all_requesters(ListParams::new()).await.unwrap();
        assert_eq!(requesters.len(), 2);
    }

    #[tokio::test]
    async fn test_listing_is_read_only_and_repeatable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/tickets"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"tickets": [{"id": 3}]})),
            )
            .expect(2)
            .mount(&server)
            .await;
        for verb in ["POST", "PUT", "DELETE"] {
            Mock::given(method(verb))
                .respond_with(ResponseTemplate::new(500))
                .expect(0)
                .mount(&server)
                .await;
        }

        let client = test_client(&server.uri());
        let first: Vec<Ticket> = client.all_tickets(ListParams::new()).await.unwrap();
        let second: Vec<Ticket> = client.all_tickets(ListParams::new()).await.unwrap();
        let ids = |tickets: &[Ticket]| tickets.iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[tokio::test]
    async fn test_view_requester_by_email_filters_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/requesters"))
            .and(query_param("email", "ada@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "requesters": [{"id": 5, "primary_email": "ada@example.com"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let found: Vec<Requester> = client
            .view_requester(Some("ada@example.com"), None)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 5);
    }

    #[tokio::test]
    async fn test_view_requester_by_id_wraps_singleton() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/requesters/5"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"requester": {"id": 5}})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let found = client.view_requester(None, Some(5)).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_view_requester_validation_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let neither = client.view_requester(None, None).await.unwrap_err();
        let both = client
            .view_requester(Some("ada@example.com"), Some(5))
            .await
            .unwrap_err();
        assert!(matches!(neither, FreshError::Validation(_)));
        assert!(matches!(both, FreshError::Validation(_)));

        let agents = client.view_agent(None, None).await.unwrap_err();
        assert!(matches!(agents, FreshError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_confirmations() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v2/requester_groups/3/members/8"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(
            client.delete_ticket(11).await.unwrap(),
            "Successfully deleted ticket: 11"
        );
        assert_eq!(
            client.add_group_member(3, 8).await.unwrap(),
            "Successfully added requester: 8 to requester group: 3"
        );
        assert_eq!(
            client.delete_group_member(3, 8).await.unwrap(),
            "Successfully removed requester: 8 from requester group: 3"
        );
    }

    #[tokio::test]
    async fn test_update_requester_uses_put() {
        let server = MockServer::start().await;
        let payload = json!({"job_title": "Librarian"});
        Mock::given(method("PUT"))
            .and(path("/api/v2/requesters/5"))
            .and(body_json(&payload))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"requester": {"id": 5}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let updated = client.update_requester(5, &payload).await.unwrap();
        assert_eq!(updated.id, 5);
    }

    #[tokio::test]
    async fn test_merge_requesters_rejects_empty_list() {
        let client = test_client("https://acme.freshservice.com");
        let err = client.merge_requesters(1, &[]).await.unwrap_err();
        assert!(matches!(err, FreshError::Validation(_)));
    }

    #[tokio::test]
    async fn test_null_list_field_does_not_fail_the_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/requesters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "requesters": [
                    {"id": 1, "primary_email": "ada@example.com", "department_ids": [4]},
                    {"id": 2, "primary_email": "alan@example.com", "department_ids": null}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let requesters = client.all_requesters(ListParams::new()).await.unwrap();
        let ids: Vec<u64> = requesters.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(requesters[0].extra["department_ids"], json!([4]));
    }

    #[tokio::test]
    async fn test_asset_delete_confirmations() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/assets/12"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v2/assets/12/delete_forever"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(
            client.delete_asset(12).await.unwrap(),
            "Successfully deleted asset 12"
        );
        assert_eq!(
            client.delete_asset_forever(12).await.unwrap(),
            "Permanently deleted asset 12"
        );
    }
}
