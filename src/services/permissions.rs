use std::collections::{HashMap, HashSet};

use crate::types::internal::auth::Role;

/// Permission string granting every capability
pub const WILDCARD: &str = "*";

/// Immutable role -> permission-set table, injected into the API layer at
/// construction rather than read from a module-level constant.
///
/// The table must be total: every [`Role`] has an entry, even if empty.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    grants: HashMap<Role, HashSet<String>>,
}

impl PermissionTable {
    /// Build a table from explicit grants, validating that it is total
    pub fn new(grants: HashMap<Role, HashSet<String>>) -> Result<Self, Role> {
        for role in Role::ALL {
            if !grants.contains_key(&role) {
                return Err(role);
            }
        }
        Ok(Self { grants })
    }

    /// The hospital's default permission grants
    pub fn defaults() -> Self {
        let entries: [(Role, &[&str]); 9] = [
            (Role::Admin, &[WILDCARD]),
            (
                Role::Doctor,
                &[
                    "patients.read",
                    "patients.write",
                    "appointments.read",
                    "appointments.write",
                    "prescriptions.write",
                    "lab.request",
                    "radiology.request",
                    "dashboard.read",
                ],
            ),
            (
                Role::Nurse,
                &[
                    "patients.read",
                    "patients.write",
                    "appointments.read",
                    "appointments.write",
                    "dashboard.read",
                ],
            ),
            (
                Role::Receptionist,
                &[
                    "patients.read",
                    "patients.write",
                    "appointments.read",
                    "appointments.write",
                    "billing.read",
                    "dashboard.read",
                ],
            ),
            (
                Role::Pharmacist,
                &[
                    "patients.read",
                    "prescriptions.read",
                    "prescriptions.dispense",
                    "pharmacy.manage",
                    "dashboard.read",
                ],
            ),
            (
                Role::LabTech,
                &[
                    "patients.read",
                    "lab.read",
                    "lab.write",
                    "lab.results",
                    "dashboard.read",
                ],
            ),
            (
                Role::Radiologist,
                &[
                    "patients.read",
                    "radiology.read",
                    "radiology.write",
                    "radiology.report",
                    "dashboard.read",
                ],
            ),
            (
                Role::Finance,
                &[
                    "patients.read",
                    "billing.read",
                    "billing.write",
                    "reports.financial",
                    "dashboard.read",
                ],
            ),
            (
                Role::Researcher,
                &[
                    "patients.read",
                    "research.read",
                    "research.write",
                    "reports.research",
                    "dashboard.read",
                ],
            ),
        ];

        let grants = entries
            .into_iter()
            .map(|(role, perms)| (role, perms.iter().map(|p| p.to_string()).collect()))
            .collect();

        // Defaults cover every role, so this cannot fail
        Self::new(grants).unwrap_or_else(|role| panic!("missing grants for role {}", role))
    }

    /// True iff `permission` is in the role's grant set, or the role holds
    /// the wildcard grant
    pub fn has_permission(&self, role: Role, permission: &str) -> bool {
        match self.grants.get(&role) {
            Some(perms) => perms.contains(WILDCARD) || perms.contains(permission),
            None => false,
        }
    }

    /// Permissions granted to a role
    pub fn grants_for(&self, role: Role) -> impl Iterator<Item = &str> {
        self.grants
            .get(&role)
            .into_iter()
            .flat_map(|perms| perms.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_wildcard_satisfies_every_permission() {
        let table = PermissionTable::defaults();
        assert!(table.has_permission(Role::Admin, "patients.write"));
        assert!(table.has_permission(Role::Admin, "anything.at.all"));
    }

    #[test]
    fn grants_match_static_lists() {
        let table = PermissionTable::defaults();
        assert!(table.has_permission(Role::Doctor, "appointments.write"));
        assert!(table.has_permission(Role::Receptionist, "billing.read"));
        assert!(!table.has_permission(Role::Finance, "appointments.write"));
        assert!(!table.has_permission(Role::Researcher, "patients.write"));
    }

    #[test]
    fn defaults_are_total_over_roles() {
        let table = PermissionTable::defaults();
        for role in Role::ALL {
            // Every role can at least read the dashboard or holds the wildcard
            assert!(
                table.has_permission(role, "dashboard.read"),
                "role {} has no dashboard.read",
                role
            );
        }
    }

    #[test]
    fn custom_table_missing_a_role_is_rejected() {
        let mut grants: HashMap<Role, HashSet<String>> = HashMap::new();
        grants.insert(Role::Admin, [WILDCARD.to_string()].into_iter().collect());

        assert!(PermissionTable::new(grants).is_err());
    }

    #[test]
    fn custom_table_with_empty_entries_is_accepted() {
        let grants: HashMap<Role, HashSet<String>> =
            Role::ALL.into_iter().map(|r| (r, HashSet::new())).collect();

        let table = PermissionTable::new(grants).unwrap();
        assert!(!table.has_permission(Role::Admin, "patients.read"));
    }
}
