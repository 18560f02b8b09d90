//! Resource handles: users, groups, and named collections

use kinvey_core::{GroupRequest, QueryOptions, RpcAction};
use kinvey_domain::{Credentials, EntityKind, KinveyError, Result, UsernameAvailability, Verb};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::instrument;

use super::call::EndpointCall;
use super::client::KinveyClient;

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(KinveyError::from)
}

/// `user/{appKey}` endpoints and the user RPC calls.
#[derive(Debug, Clone)]
pub struct Users {
    client: KinveyClient,
}

impl Users {
    pub(crate) fn new(client: KinveyClient) -> Self {
        Self { client }
    }

    fn call(verb: Verb) -> Result<EndpointCall> {
        EndpointCall::new(EntityKind::User, verb)
    }

    /// Log in; on success the session header becomes `Kinvey <token>` and
    /// the token is persisted.
    ///
    /// # Errors
    /// Returns `KinveyError::Auth` if the backend answers with an error
    /// payload; the session header is left unchanged.
    #[instrument(skip(self, password))]
    pub async fn login<T: DeserializeOwned>(&self, username: &str, password: &str) -> Result<T> {
        let call = Self::call(Verb::Login)?.json(&Credentials::new(username, password))?;
        decode(self.client.execute(call).await?)
    }

    /// Create a user with the basic credential and log in as them.
    ///
    /// # Errors
    /// Same as [`Users::login`].
    #[instrument(skip_all)]
    pub async fn signup<B, T>(&self, user: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let call = Self::call(Verb::Signup)?.json(user)?;
        decode(self.client.execute(call).await?)
    }

    /// End the session. Any server response reverts to the basic header.
    ///
    /// # Errors
    /// Transport failures leave the session intact and are returned as is.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.client.execute(Self::call(Verb::Logout)?).await.map(drop)
    }

    #[instrument(skip(self))]
    pub async fn current<T: DeserializeOwned>(&self) -> Result<T> {
        decode(self.client.execute(Self::call(Verb::Current)?).await?)
    }

    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        let call = Self::call(Verb::Get)?.id(id).require_id()?;
        decode(self.client.execute(call).await?)
    }

    /// Search users by attribute, e.g. `{"email": "ada@example.com"}`.
    #[instrument(skip_all)]
    pub async fn lookup<B, T>(&self, criteria: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let call = Self::call(Verb::Lookup)?.json(criteria)?;
        decode(self.client.execute(call).await?)
    }

    /// `PUT user/{appKey}/{_id}`; the id is read from the body.
    #[instrument(skip_all)]
    pub async fn save<B, T>(&self, user: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let call = Self::call(Verb::Save)?.json(user)?.require_id()?;
        decode(self.client.execute(call).await?)
    }

    #[instrument(skip_all)]
    pub async fn query<T: DeserializeOwned>(&self, options: &QueryOptions) -> Result<Vec<T>> {
        let call = Self::call(Verb::Query)?.options(options)?;
        decode(self.client.execute(call).await?)
    }

    /// Hard-delete the user.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<Value> {
        let call = Self::call(Verb::Remove)?.id(id).require_id()?;
        self.client.execute(call).await
    }

    /// Hard-delete the user.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Value> {
        let call = Self::call(Verb::Delete)?.id(id).require_id()?;
        self.client.execute(call).await
    }

    /// Soft-delete (suspend) the user.
    #[instrument(skip(self))]
    pub async fn suspend(&self, id: &str) -> Result<Value> {
        let call = Self::call(Verb::Suspend)?.id(id).require_id()?;
        self.client.execute(call).await
    }

    #[instrument(skip(self))]
    pub async fn verify_email(&self, username: &str) -> Result<()> {
        self.client.rpc(RpcAction::VerifyEmail, Some(username), json!({})).await.map(drop)
    }

    #[instrument(skip(self))]
    pub async fn reset_password(&self, username: &str) -> Result<()> {
        self.client.rpc(RpcAction::ResetPassword, Some(username), json!({})).await.map(drop)
    }

    /// # Errors
    /// Returns `KinveyError::Serialization` if the answer lacks
    /// `usernameExists`.
    #[instrument(skip(self))]
    pub async fn check_username_exists(&self, username: &str) -> Result<bool> {
        let body = json!({ "username": username });
        let answer: UsernameAvailability =
            decode(self.client.rpc(RpcAction::CheckUsernameExists, None, body).await?)?;
        Ok(answer.username_exists)
    }
}

/// `group/{appKey}` endpoints.
#[derive(Debug, Clone)]
pub struct Groups {
    client: KinveyClient,
}

impl Groups {
    pub(crate) fn new(client: KinveyClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        let call = EndpointCall::new(EntityKind::Group, Verb::Get)?.id(id).require_id()?;
        decode(self.client.execute(call).await?)
    }

    #[instrument(skip_all)]
    pub async fn save<B, T>(&self, group: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let call = EndpointCall::new(EntityKind::Group, Verb::Save)?.json(group)?.require_id()?;
        decode(self.client.execute(call).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Value> {
        let call = EndpointCall::new(EntityKind::Group, Verb::Delete)?.id(id).require_id()?;
        self.client.execute(call).await
    }
}

/// Number of entities matched by `_count`.
#[derive(Debug, serde::Deserialize)]
struct CountResponse {
    count: u64,
}

/// A named collection under `appdata/{appKey}/`.
#[derive(Debug, Clone)]
pub struct Collection {
    client: KinveyClient,
    name: String,
}

impl Collection {
    pub(crate) fn new(client: KinveyClient, name: String) -> Self {
        Self { client, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, verb: Verb) -> Result<EndpointCall> {
        Ok(EndpointCall::new(EntityKind::Object, verb)?.collection(&self.name))
    }

    /// `POST` a new entity; the backend assigns the `_id`.
    #[instrument(skip_all, fields(collection = %self.name))]
    pub async fn create<B, T>(&self, entity: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let call = self.call(Verb::Create)?.json(entity)?;
        decode(self.client.execute(call).await?)
    }

    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn get<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        let call = self.call(Verb::Get)?.id(id).require_id()?;
        decode(self.client.execute(call).await?)
    }

    #[instrument(skip_all, fields(collection = %self.name))]
    pub async fn count(&self, options: &QueryOptions) -> Result<u64> {
        let call = self.call(Verb::Count)?.options(options)?;
        let CountResponse { count } = decode(self.client.execute(call).await?)?;
        Ok(count)
    }

    /// `PUT` an entity back to its `_id`.
    #[instrument(skip_all, fields(collection = %self.name))]
    pub async fn save<B, T>(&self, entity: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let call = self.call(Verb::Save)?.json(entity)?.require_id()?;
        decode(self.client.execute(call).await?)
    }

    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn delete(&self, id: &str) -> Result<Value> {
        let call = self.call(Verb::Delete)?.id(id).require_id()?;
        self.client.execute(call).await
    }

    /// Delete every entity matching `options`.
    #[instrument(skip_all, fields(collection = %self.name))]
    pub async fn delete_where(&self, options: &QueryOptions) -> Result<Value> {
        let call = self.call(Verb::Delete)?.options(options)?;
        self.client.execute(call).await
    }

    #[instrument(skip_all, fields(collection = %self.name))]
    pub async fn query<T: DeserializeOwned>(&self, options: &QueryOptions) -> Result<Vec<T>> {
        let call = self.call(Verb::Query)?.options(options)?;
        decode(self.client.execute(call).await?)
    }

    /// `_group` aggregation; the reduce function is sent canonicalized.
    #[instrument(skip_all, fields(collection = %self.name))]
    pub async fn group(&self, request: &GroupRequest) -> Result<Vec<Value>> {
        let call = self.call(Verb::Group)?.group(request)?;
        decode(self.client.execute(call).await?)
    }
}
