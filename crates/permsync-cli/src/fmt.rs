//! Output formatting helpers.

use std::io::{self, Write};

use permsync_core::MigrationPlan;
use permsync_core::types::{AssignmentType, CategoryRef, NewPermission, Permission};

pub fn write_categories(w: &mut impl Write, categories: &[CategoryRef]) -> io::Result<()> {
    writeln!(w, "{:<32} {:<40}", "NAME", "ID")?;
    for c in categories {
        writeln!(w, "{:<32} {:<40}", truncate(&c.name, 32), c.id)?;
    }
    writeln!(w, "\n{} category(ies)", categories.len())
}

pub fn write_permissions(w: &mut impl Write, permissions: &[Permission]) -> io::Result<()> {
    writeln!(
        w,
        "{:<28} {:<28} {:<24} {:<10}",
        "KEY", "NAME", "CATEGORY", "ASSIGNMENT"
    )?;
    for p in permissions {
        writeln!(
            w,
            "{:<28} {:<28} {:<24} {:<10}",
            truncate(&p.key, 28),
            truncate(&p.name, 28),
            truncate(p.category_id.as_deref().unwrap_or("-"), 24),
            assignment_str(p.assignment_type),
        )?;
    }
    writeln!(w, "\n{} permission(s)", permissions.len())
}

pub fn write_plan(w: &mut impl Write, plan: &MigrationPlan) -> io::Result<()> {
    writeln!(w, "{:<28} {:<28} {:<24}", "KEY", "NAME", "CATEGORY")?;
    for p in &plan.permissions {
        writeln!(
            w,
            "{:<28} {:<28} {:<24}",
            truncate(&p.key, 28),
            truncate(&p.name, 28),
            plan_category(p),
        )?;
    }
    Ok(())
}

fn plan_category(p: &NewPermission) -> String {
    if p.category_id.is_empty() {
        "(uncategorized)".to_string()
    } else {
        truncate(&p.category_id, 24)
    }
}

pub fn assignment_str(assignment: AssignmentType) -> &'static str {
    match assignment {
        AssignmentType::Never => "never",
        AssignmentType::Always => "always",
        AssignmentType::Assignable => "assignable",
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max - 1).collect::<String>())
    }
}
