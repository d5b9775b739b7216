//! Connection status: who this connection is authenticated as.

use serde::Deserialize;

/// An authenticated user and the database it authenticated against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRef {
    pub user: String,
    pub db: String,
}

/// A granted role and the database that defines it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleRef {
    pub role: String,
    pub db: String,
}

/// `connectionStatus.authInfo`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    #[serde(default)]
    pub authenticated_users: Vec<UserRef>,
    #[serde(default)]
    pub authenticated_user_roles: Vec<RoleRef>,
}

/// The reply to `connectionStatus`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    #[serde(default)]
    pub auth_info: AuthInfo,
}

impl ConnectionStatus {
    /// `user/db` lines followed by `role/db` lines.
    pub fn principal_lines(&self) -> Vec<String> {
        let users = self
            .auth_info
            .authenticated_users
            .iter()
            .map(|u| format!("{}/{}", u.user, u.db));
        let roles = self
            .auth_info
            .authenticated_user_roles
            .iter()
            .map(|r| format!("{}/{}", r.role, r.db));
        users.chain(roles).collect()
    }
}
