//! Permission migration pipeline.
//!
//! Plans a migration by diffing the source environment's permissions against
//! the destination's and re-keying categories, then applies the plan with a
//! single batched creation request. All calls are sequential; a failure at
//! any stage aborts the run.

use std::collections::HashSet;

use tracing::info;

use crate::client::FronteggClient;
use crate::error::Result;
use crate::mapping::{id_index, name_index, remap_permissions};
use crate::types::{NewPermission, Permission};

/// The set of permissions a migration run would create.
#[derive(Debug, Clone, Default)]
pub struct MigrationPlan {
    /// Permissions to create in the destination, already re-keyed.
    pub permissions: Vec<NewPermission>,
}

impl MigrationPlan {
    /// True when the destination already holds every source permission.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

/// Source permissions whose key is absent from the destination.
///
/// Keys are globally unique and stable across environments, so re-running
/// after a completed migration yields an empty diff.
pub fn diff_permissions(source: Vec<Permission>, destination: &[Permission]) -> Vec<Permission> {
    let existing: HashSet<&str> = destination.iter().map(|p| p.key.as_str()).collect();
    source
        .into_iter()
        .filter(|p| !existing.contains(p.key.as_str()))
        .collect()
}

/// Compute the migration plan without mutating anything.
pub async fn plan(
    client: &FronteggClient,
    source: &str,
    destination: &str,
) -> Result<MigrationPlan> {
    let source_permissions = client.list_permissions(source).await?;
    let destination_permissions = client.list_permissions(destination).await?;
    let candidates = diff_permissions(source_permissions, &destination_permissions);

    let source_categories = client.list_categories(source).await?;
    let destination_categories = client.list_categories(destination).await?;
    // The name join assumes unique names on both sides; check before mapping.
    name_index(source, &source_categories)?;
    let dest_ids = name_index(destination, &destination_categories)?;
    let source_names = id_index(&source_categories);

    let permissions = remap_permissions(candidates, &source_names, &dest_ids);
    info!(
        source,
        destination,
        count = permissions.len(),
        "Planned migration"
    );
    Ok(MigrationPlan { permissions })
}

/// Apply a plan: one batched creation request, or a no-op for an empty plan.
pub async fn apply(
    client: &FronteggClient,
    destination: &str,
    plan: &MigrationPlan,
) -> Result<Vec<Permission>> {
    if plan.is_empty() {
        info!(destination, "No new permissions to migrate");
        return Ok(Vec::new());
    }
    let created = client
        .create_permissions(destination, &plan.permissions)
        .await?;
    info!(
        destination,
        count = created.len(),
        "Permissions migrated"
    );
    Ok(created)
}

/// Plan and apply in one step.
pub async fn migrate(
    client: &FronteggClient,
    source: &str,
    destination: &str,
) -> Result<Vec<Permission>> {
    let migration_plan = plan(client, source, destination).await?;
    apply(client, destination, &migration_plan).await
}
