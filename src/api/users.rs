//! Admin user management endpoints.

use serde_json::{Value, json};
use uuid::Uuid;

use crate::api::{self, models::UserPage};
use crate::client::ApiClient;
use crate::error::Result;

/// Fixed page size of the user listing, matching the console.
pub const PAGE_SIZE: u64 = 10;

fn offset_for(page: u64) -> u64 {
    page.saturating_sub(1) * PAGE_SIZE
}

/// One page of all users. Pages are 1-based.
pub async fn list(client: &ApiClient, page: u64) -> Result<UserPage> {
    let path = format!("/admin/users?limit={}&offset={}", PAGE_SIZE, offset_for(page));
    let response = client.get(&path).await?;
    let value: Value = api::read_json(response).await?;
    Ok(UserPage::from_value(value))
}

/// One page of users matching an email search.
pub async fn search_by_email(client: &ApiClient, email: &str, page: u64) -> Result<UserPage> {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("email", email)
        .append_pair("limit", &PAGE_SIZE.to_string())
        .append_pair("offset", &offset_for(page).to_string())
        .finish();
    let response = client
        .get(&format!("/admin/users/search-by-email?{query}"))
        .await?;
    let value: Value = api::read_json(response).await?;
    Ok(UserPage::from_value(value))
}

/// Activate or deactivate an account.
pub async fn set_status(client: &ApiClient, id: Uuid, active: bool) -> Result<()> {
    let response = client
        .put(&format!("/admin/users/{id}/status"), &json!({ "isActive": active }))
        .await?;
    api::expect_success(response).await
}

/// Reassign a user's role.
pub async fn set_role(client: &ApiClient, id: Uuid, role_id: Uuid) -> Result<()> {
    let response = client
        .put(&format!("/admin/users/{id}/role"), &json!({ "roleId": role_id }))
        .await?;
    api::expect_success(response).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> Result<()> {
    let response = client.delete(&format!("/admin/users/{id}")).await?;
    api::expect_success(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_one_based() {
        assert_eq!(offset_for(1), 0);
        assert_eq!(offset_for(2), 10);
        assert_eq!(offset_for(0), 0);
    }
}
