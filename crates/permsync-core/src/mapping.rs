//! Cross-environment category mapping.
//!
//! Category ids differ between environments; names are the stable join key.
//! Each source permission's category id is resolved to a name through the
//! source's categories, then to the destination's id through the
//! destination's categories.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{CategoryRef, NewPermission, Permission};

/// Permission names that are never migrated.
pub const PROTECTED_PERMISSIONS: [&str; 2] = ["Read Only", "Admin"];

/// Build a name → id index for an environment's categories.
///
/// A repeated name makes the cross-environment join ambiguous, so this fails
/// fast instead of letting the last entry win.
pub fn name_index(
    environment: &str,
    categories: &[CategoryRef],
) -> Result<HashMap<String, String>> {
    let mut index = HashMap::with_capacity(categories.len());
    for category in categories {
        if index
            .insert(category.name.clone(), category.id.clone())
            .is_some()
        {
            return Err(Error::DuplicateCategory {
                environment: environment.to_string(),
                name: category.name.clone(),
            });
        }
    }
    Ok(index)
}

/// Build an id → name index for the source environment's categories.
pub fn id_index(categories: &[CategoryRef]) -> HashMap<String, String> {
    categories
        .iter()
        .map(|c| (c.id.clone(), c.name.clone()))
        .collect()
}

/// Re-key permissions onto the destination's categories.
///
/// Built-in permissions and [`PROTECTED_PERMISSIONS`] are dropped. A
/// permission whose category has no destination counterpart is kept with an
/// empty category id — it lands uncategorized rather than failing the run.
pub fn remap_permissions(
    permissions: Vec<Permission>,
    source_names: &HashMap<String, String>,
    dest_ids: &HashMap<String, String>,
) -> Vec<NewPermission> {
    permissions
        .into_iter()
        .filter(|p| !p.fe_permission && !PROTECTED_PERMISSIONS.contains(&p.name.as_str()))
        .map(|p| {
            let category_id = p
                .category_id
                .as_deref()
                .and_then(|id| source_names.get(id))
                .and_then(|name| dest_ids.get(name))
                .cloned()
                .unwrap_or_default();
            if category_id.is_empty() {
                warn!(key = %p.key, "No destination category; migrating uncategorized");
            }
            NewPermission {
                key: p.key,
                name: p.name,
                description: p.description,
                category_id,
                assignment_type: p.assignment_type,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssignmentType;

    fn category(id: &str, name: &str) -> CategoryRef {
        CategoryRef {
            id: id.into(),
            name: name.into(),
        }
    }

    fn permission(key: &str, name: &str, category_id: Option<&str>) -> Permission {
        Permission {
            id: format!("id-{key}"),
            key: key.into(),
            name: name.into(),
            description: None,
            category_id: category_id.map(Into::into),
            fe_permission: false,
            assignment_type: AssignmentType::Assignable,
        }
    }

    #[test]
    fn name_index_maps_name_to_id() {
        let index = name_index("qa", &[category("catZ", "Widgets")]).unwrap();
        assert_eq!(index["Widgets"], "catZ");
    }

    #[test]
    fn name_index_rejects_duplicate_names() {
        let err = name_index(
            "qa",
            &[category("catY", "Widgets"), category("catZ", "Widgets")],
        )
        .unwrap_err();
        match err {
            Error::DuplicateCategory { environment, name } => {
                assert_eq!(environment, "qa");
                assert_eq!(name, "Widgets");
            }
            other => panic!("expected DuplicateCategory, got {other:?}"),
        }
    }

    #[test]
    fn id_index_maps_id_to_name() {
        let index = id_index(&[category("catA", "Widgets"), category("catB", "Reports")]);
        assert_eq!(index["catA"], "Widgets");
        assert_eq!(index["catB"], "Reports");
    }

    #[test]
    fn remap_resolves_destination_category_by_name() {
        let source_names = id_index(&[category("catA", "Widgets")]);
        let dest_ids = name_index("qa", &[category("catZ", "Widgets")]).unwrap();
        let out = remap_permissions(
            vec![permission("p1", "Edit Widget", Some("catA"))],
            &source_names,
            &dest_ids,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category_id, "catZ");
    }

    #[test]
    fn remap_unmapped_category_becomes_empty_string() {
        let source_names = id_index(&[category("catA", "Widgets")]);
        let dest_ids = name_index("qa", &[category("catZ", "Reports")]).unwrap();
        let out = remap_permissions(
            vec![permission("p1", "Edit Widget", Some("catA"))],
            &source_names,
            &dest_ids,
        );
        assert_eq!(out[0].category_id, "");
    }

    #[test]
    fn remap_unknown_source_category_id_becomes_empty_string() {
        let source_names = id_index(&[]);
        let dest_ids = name_index("qa", &[category("catZ", "Widgets")]).unwrap();
        let out = remap_permissions(
            vec![permission("p1", "Edit Widget", Some("catGone"))],
            &source_names,
            &dest_ids,
        );
        assert_eq!(out[0].category_id, "");
    }

    #[test]
    fn remap_drops_builtin_permissions() {
        let mut builtin = permission("fe.read", "Secure Read", None);
        builtin.fe_permission = true;
        let out = remap_permissions(vec![builtin], &HashMap::new(), &HashMap::new());
        assert!(out.is_empty());
    }

    #[test]
    fn remap_drops_protected_names() {
        let out = remap_permissions(
            vec![
                permission("p1", "Read Only", None),
                permission("p2", "Admin", None),
                permission("p3", "Edit Widget", None),
            ],
            &HashMap::new(),
            &HashMap::new(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Edit Widget");
    }

    #[test]
    fn remap_projects_away_source_id() {
        let out = remap_permissions(
            vec![permission("p1", "Edit Widget", None)],
            &HashMap::new(),
            &HashMap::new(),
        );
        // NewPermission has no id field; key and name carry over.
        assert_eq!(out[0].key, "p1");
        assert_eq!(out[0].assignment_type, AssignmentType::Assignable);
    }
}
