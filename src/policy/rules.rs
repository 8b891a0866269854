//! The ordered rule table
//!
//! Each rule is a named predicate returning `Some(decision)` when it claims
//! the request. [`RULES`] lists them in evaluation order; reordering entries
//! changes behavior.

use super::{has_prefix, Decision};
use crate::auth::models::{Identity, Role};

/// Path prefixes that require a non-null identity
pub const PROTECTED_PREFIXES: [&str; 2] = ["/dashboard", "/profile"];

/// Dashboard sections an editor may enter
const EDITOR_SECTIONS: [&str; 3] = ["/dashboard/news", "/dashboard/blog", "/dashboard/profile"];

/// Dashboard sections a teacher may not enter
const TEACHER_DENIED: [&str; 4] = [
    "/dashboard/blog",
    "/dashboard/users",
    "/dashboard/categories",
    "/dashboard/news",
];

/// Entry points reserved for anonymous visitors
const GUEST_ONLY: [&str; 2] = ["/login", "/register"];

pub type Rule = fn(&str, Option<&Identity>) -> Option<Decision>;

/// The policy table, first match wins
pub const RULES: [(&str, Rule); 6] = [
    ("protected-anonymous", protected_anonymous),
    ("editor-containment", editor_containment),
    ("teacher-containment", teacher_containment),
    ("staff-profile", staff_profile),
    ("student-dashboard", student_dashboard),
    ("guest-only-entry", guest_only_entry),
];

/// Rule names in evaluation order, for the CLI and diagnostics
pub fn rule_names() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|(name, _)| *name)
}

/// Anonymous visitors never reach a protected prefix.
fn protected_anonymous(path: &str, identity: Option<&Identity>) -> Option<Decision> {
    if identity.is_none() && PROTECTED_PREFIXES.iter().any(|p| has_prefix(path, p)) {
        return Some(Decision::Redirect("/"));
    }
    None
}

/// Editors stay inside the news, blog and profile sections of the dashboard.
fn editor_containment(path: &str, identity: Option<&Identity>) -> Option<Decision> {
    let identity = identity?;
    if identity.role == Role::Editor
        && has_prefix(path, "/dashboard")
        && !EDITOR_SECTIONS.iter().any(|p| has_prefix(path, p))
    {
        return Some(Decision::Redirect("/dashboard/news"));
    }
    None
}

/// Teachers are denied the content and user management sections.
fn teacher_containment(path: &str, identity: Option<&Identity>) -> Option<Decision> {
    let identity = identity?;
    if identity.role == Role::Teacher && TEACHER_DENIED.iter().any(|p| has_prefix(path, p)) {
        return Some(Decision::Redirect("/dashboard"));
    }
    None
}

/// Staff landing on the public profile page go to the dashboard profile.
fn staff_profile(path: &str, identity: Option<&Identity>) -> Option<Decision> {
    let identity = identity?;
    if path == "/profile" && identity.role.is_staff() {
        return Some(Decision::Redirect("/dashboard/profile"));
    }
    None
}

/// Students have no dashboard at all.
fn student_dashboard(path: &str, identity: Option<&Identity>) -> Option<Decision> {
    let identity = identity?;
    if identity.role == Role::Student && has_prefix(path, "/dashboard") {
        return Some(Decision::Redirect("/profile"));
    }
    None
}

/// Authenticated users are bounced off the login and register pages.
fn guest_only_entry(path: &str, identity: Option<&Identity>) -> Option<Decision> {
    let identity = identity?;
    if GUEST_ONLY.contains(&path) {
        let target = if identity.role == Role::Student {
            "/profile"
        } else {
            "/dashboard"
        };
        return Some(Decision::Redirect(target));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(role: Role) -> Identity {
        Identity::new("u-1", role)
    }

    #[test]
    fn test_rules_only_claim_their_own_cases() {
        // Each rule individually: no identity-specific rule fires for anonymous
        for (name, rule) in &RULES[1..] {
            assert_eq!(rule("/dashboard", None), None, "rule {name} fired for anonymous");
        }
        // And the anonymous rule never fires once authenticated
        for role in Role::ALL {
            let id = ident(role);
            assert_eq!(protected_anonymous("/dashboard", Some(&id)), None);
        }
    }

    #[test]
    fn test_staff_profile_is_exact_match_only() {
        let teacher = ident(Role::Teacher);
        assert_eq!(
            staff_profile("/profile", Some(&teacher)),
            Some(Decision::Redirect("/dashboard/profile"))
        );
        assert_eq!(staff_profile("/profile/edit", Some(&teacher)), None);
        let student = ident(Role::Student);
        assert_eq!(staff_profile("/profile", Some(&student)), None);
    }

    #[test]
    fn test_guest_only_targets_by_role() {
        let student = ident(Role::Student);
        assert_eq!(
            guest_only_entry("/login", Some(&student)),
            Some(Decision::Redirect("/profile"))
        );
        for role in [Role::SuperAdmin, Role::Admin, Role::Editor, Role::Teacher] {
            let id = ident(role);
            assert_eq!(
                guest_only_entry("/register", Some(&id)),
                Some(Decision::Redirect("/dashboard")),
                "role {role}"
            );
        }
    }

    #[test]
    fn test_table_order_is_stable() {
        let names: Vec<_> = rule_names().collect();
        assert_eq!(
            names,
            vec![
                "protected-anonymous",
                "editor-containment",
                "teacher-containment",
                "staff-profile",
                "student-dashboard",
                "guest-only-entry",
            ]
        );
    }
}
