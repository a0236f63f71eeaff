use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Access role stored on each customer row.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Publisher,
    Manager,
    Admin,
}

impl Role {
    /// Ordering used when reporting role counts.
    pub const REPORT_ORDER: [Role; 4] =
        [Role::Admin, Role::Manager, Role::Publisher, Role::Customer];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Publisher => "publisher",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Admins and managers.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "publisher" => Ok(Self::Publisher),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            other => Err(Error::Unsupported(format!("role '{other}'"))),
        }
    }
}

/// Fixed identity-to-role mapping applied by the `roles` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleAssignments {
    pub admin_ids: Vec<i64>,
    pub manager_ids: Vec<i64>,
    pub publisher_ids: Vec<i64>,
}

impl Default for RoleAssignments {
    fn default() -> Self {
        Self {
            admin_ids: vec![2],
            manager_ids: vec![3, 4, 5],
            publisher_ids: Vec::new(),
        }
    }
}

/// Customer row holding a staff role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub role: Role,
}

/// One `UPDATE ... SET role` to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleUpdate {
    pub role: Role,
    pub ids: Vec<i64>,
}

impl RoleAssignments {
    /// Resolve the mapping into per-role updates.
    ///
    /// Each id lands in exactly one update; on overlap the higher role wins.
    /// Roles with no ids are omitted.
    pub fn plan(&self) -> Vec<RoleUpdate> {
        let mut resolved: BTreeMap<i64, Role> = BTreeMap::new();
        let sources = [
            (Role::Publisher, &self.publisher_ids),
            (Role::Manager, &self.manager_ids),
            (Role::Admin, &self.admin_ids),
        ];
        for (role, ids) in sources {
            for id in ids {
                let entry = resolved.entry(*id).or_insert(role);
                if role > *entry {
                    *entry = role;
                }
            }
        }

        Role::REPORT_ORDER
            .iter()
            .filter_map(|role| {
                let ids: Vec<i64> = resolved
                    .iter()
                    .filter(|(_, assigned)| *assigned == role)
                    .map(|(id, _)| *id)
                    .collect();
                (!ids.is_empty()).then_some(RoleUpdate { role: *role, ids })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_case_insensitively() {
        assert_eq!("Admin".parse::<Role>().ok(), Some(Role::Admin));
        assert_eq!(" manager ".parse::<Role>().ok(), Some(Role::Manager));
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::Customer);
    }

    #[test]
    fn default_plan_matches_bookstore_staff() {
        let plan = RoleAssignments::default().plan();
        assert_eq!(
            plan,
            vec![
                RoleUpdate {
                    role: Role::Admin,
                    ids: vec![2],
                },
                RoleUpdate {
                    role: Role::Manager,
                    ids: vec![3, 4, 5],
                },
            ]
        );
    }

    #[test]
    fn overlapping_ids_take_the_higher_role() {
        let assignments = RoleAssignments {
            admin_ids: vec![4],
            manager_ids: vec![4, 7, 7],
            publisher_ids: vec![7, 9],
        };
        let plan = assignments.plan();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].ids, vec![4]);
        assert_eq!(plan[1].ids, vec![7]);
        assert_eq!(plan[2].role, Role::Publisher);
        assert_eq!(plan[2].ids, vec![9]);
    }
}
