//! Frontegg identity API wire types.
//!
//! Serialization structs matching the Frontegg REST API JSON bodies.
//! Field names follow the API's camelCase convention.

use serde::{Deserialize, Serialize};

/// Vendor credential bundle, sent verbatim as the `/auth/vendor` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub client_id: String,
    pub secret: String,
}

/// `/auth/vendor` response body.
///
/// `token` is optional so a success response without one can be surfaced as
/// an authentication error instead of a decode failure.
#[derive(Debug, Deserialize)]
pub(crate) struct VendorTokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Permission category from the Frontegg identity API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Set on categories Frontegg ships built-in.
    #[serde(default)]
    pub fe_category: bool,
}

/// Narrowed `{name, id}` category projection.
///
/// Ids differ between environments; the name is the cross-environment join
/// key, so nothing else is carried downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

impl From<Category> for CategoryRef {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

/// How a permission may be assigned to roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentType {
    /// Cannot be assigned to any role.
    Never,
    /// Granted to every role implicitly.
    Always,
    /// May be assigned to roles explicitly.
    #[default]
    Assignable,
}

/// Permission from the Frontegg identity API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Set on permissions Frontegg ships built-in.
    #[serde(default)]
    pub fe_permission: bool,
    #[serde(default)]
    pub assignment_type: AssignmentType,
}

/// Projection POSTed to the destination's permission-creation endpoint.
///
/// The source environment's own id and built-in flag are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermission {
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Destination category id; empty when the source category has no
    /// destination counterpart (the permission lands uncategorized).
    pub category_id: String,
    pub assignment_type: AssignmentType,
}
