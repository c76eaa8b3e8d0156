/// Role code with full access, including user management.
pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, PartialEq)]
pub enum Permission {
    ManageClients,
    ManageUsers,
}

pub fn has_permission(role: &str, permission: &Permission) -> bool {
    match role {
        ADMIN_ROLE => true,
        "MANAGER" | "USER" => matches!(permission, Permission::ManageClients),
        _ => false,
    }
}
