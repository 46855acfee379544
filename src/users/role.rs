pub const ROLE_PREFIX: &str = "ROLE_";

/// Uppercase a role and make sure it carries the `ROLE_` prefix exactly once.
pub fn normalize_role(role: &str) -> String {
    let upper = role.to_uppercase();
    if upper.starts_with(ROLE_PREFIX) {
        upper
    } else {
        format!("{ROLE_PREFIX}{upper}")
    }
}
