//! Auth data models.

use tricto::orders::UserId;

/// Role carried by a principal. Anything the backend does not recognise as
/// an administrator is a plain shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Parse the backend's role string, defaulting to `User`.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        if value == "ADMIN" { Self::Admin } else { Self::User }
    }

    /// The backend's string for this role.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Login credentials. `name` is an optional display name carried alongside
/// the email/password pair; when absent the email's local part is used.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Registration payload.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// An authenticated principal with its opaque bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Shopper identifier used on order submissions.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email address, from the token's subject claim.
    pub email: String,

    /// Role decoded from the token, for display and client-side gating only.
    pub role: Role,

    /// Opaque bearer token attached to every authenticated call.
    pub token: String,
}

impl Session {
    /// Token to place in the `Authorization: Bearer` header.
    pub fn bearer(&self) -> &str {
        &self.token
    }

    /// Whether this principal may use the admin back-office.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
