//! Token claim structures.
//!
//! A token is a snapshot of the holder's authorization state at issuance
//! time. Role or permission changes made afterwards are not reflected until
//! a new token is issued.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use usersvc_core::PermissionId;

/// Application-specific claims attached to a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrivateClaims {
    /// Holder's email address
    pub email: String,
    /// Codes of the roles held at issuance
    pub roles: Vec<String>,
    /// Permission codes granted through those roles
    pub permission_ids: Vec<PermissionId>,
}

/// Full token payload: registered claims plus [`PrivateClaims`].
///
/// ```json
/// {
///   "iss": "usersvc",
///   "sub": "6f1c...",
///   "exp": 1735689600,
///   "email": "ana@example.com",
///   "roles": ["ADMIN"],
///   "permissionIds": [301, 302]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Issuer (fixed service name)
    pub iss: String,
    /// User ID (subject claim)
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    #[serde(flatten)]
    pub private: PrivateClaims,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.private.email
    }

    pub fn roles(&self) -> &[String] {
        &self.private.roles
    }

    pub fn permission_ids(&self) -> &[PermissionId] {
        &self.private.permission_ids
    }

    /// Linear scan of the permission snapshot.
    pub fn has_permission(&self, permission: PermissionId) -> bool {
        self.private.permission_ids.contains(&permission)
    }

    pub fn has_role(&self, code: &str) -> bool {
        self.private.roles.iter().any(|r| r == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> Claims {
        Claims {
            iss: "usersvc".to_string(),
            sub: "user-1".to_string(),
            exp: 1_700_000_000,
            private: PrivateClaims {
                email: "ana@example.com".to_string(),
                roles: vec!["ADMIN".to_string()],
                permission_ids: vec![301, 501],
            },
        }
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(claims()).unwrap();

        assert_eq!(json["iss"], "usersvc");
        assert_eq!(json["sub"], "user-1");
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["roles"][0], "ADMIN");
        assert_eq!(json["permissionIds"][1], 501);
        assert!(json.get("private").is_none());
    }

    #[test]
    fn permission_and_role_checks() {
        let claims = claims();
        assert!(claims.has_permission(501));
        assert!(!claims.has_permission(502));
        assert!(claims.has_role("ADMIN"));
        assert!(!claims.has_role("USER"));
    }
}
