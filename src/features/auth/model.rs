use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Stable user identifier (JWT subject)
    pub sub: String,
    /// Display name, when the identity provider supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub is_superuser: bool,
    pub is_staff: bool,
}

impl AuthenticatedUser {
    /// Check if the user holds an administrator role.
    ///
    /// This is the single authorization predicate for the whole service:
    /// a user is an administrator when either the superuser or the staff
    /// flag is set. Every admin-gated route goes through this check.
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.is_staff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_superuser: bool, is_staff: bool) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            username: None,
            is_superuser,
            is_staff,
        }
    }

    #[test]
    fn superuser_is_admin() {
        assert!(user(true, false).is_admin());
    }

    #[test]
    fn staff_is_admin() {
        assert!(user(false, true).is_admin());
    }

    #[test]
    fn superuser_and_staff_is_admin() {
        assert!(user(true, true).is_admin());
    }

    #[test]
    fn regular_user_is_not_admin() {
        assert!(!user(false, false).is_admin());
    }
}
