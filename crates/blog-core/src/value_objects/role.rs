//! Caller roles and the acting principal

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Role carried in the caller's access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Elevated roles may act on other users' reactions and content
    #[inline]
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The authenticated principal performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user(user_id: UserId) -> Self {
        Self::new(user_id, Role::User)
    }

    pub fn admin(user_id: UserId) -> Self {
        Self::new(user_id, Role::Admin)
    }

    /// True if the actor owns the resource or holds an elevated role
    pub fn may_act_for(&self, owner: UserId) -> bool {
        self.user_id == owner || self.role.is_elevated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("moderator".parse::<Role>().is_err());
    }

    #[test]
    fn test_only_admin_is_elevated() {
        assert!(Role::Admin.is_elevated());
        assert!(!Role::User.is_elevated());
    }

    #[test]
    fn test_may_act_for() {
        let owner = UserId::new();
        let stranger = UserId::new();

        assert!(Actor::user(owner).may_act_for(owner));
        assert!(!Actor::user(stranger).may_act_for(owner));
        assert!(Actor::admin(stranger).may_act_for(owner));
    }
}
