//! Role management endpoints.

use serde_json::json;
use uuid::Uuid;

use crate::api::{
    self,
    models::{Role, RoleCount},
};
use crate::client::ApiClient;
use crate::error::Result;

pub async fn list(client: &ApiClient) -> Result<Vec<Role>> {
    let response = client.get("/role").await?;
    api::unwrap_data(response).await
}

pub async fn count(client: &ApiClient) -> Result<u64> {
    let response = client.get("/role/data/count").await?;
    let count: RoleCount = api::unwrap_data(response).await?;
    Ok(count.count)
}

pub async fn get(client: &ApiClient, id: Uuid) -> Result<Role> {
    let response = client.get(&format!("/role/{id}")).await?;
    api::unwrap_data(response).await
}

pub async fn create(client: &ApiClient, name: &str) -> Result<Role> {
    let response = client.post("/role", &json!({ "name": name })).await?;
    api::unwrap_data(response).await
}

pub async fn update(client: &ApiClient, id: Uuid, name: &str) -> Result<Role> {
    let response = client
        .put(&format!("/role/{id}"), &json!({ "name": name }))
        .await?;
    api::unwrap_data(response).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> Result<()> {
    let response = client.delete(&format!("/role/{id}")).await?;
    api::expect_success(response).await
}
