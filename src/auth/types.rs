//! Types for authentication and registration

use serde::Serialize;

use crate::resources::{Preferences, User};

/// Body of `POST /login/`
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Outcome of a registration
#[derive(Debug, Clone)]
pub struct Registration {
    /// The created account
    pub user: User,

    /// The default preferences, if creating them succeeded
    pub preferences: Option<Preferences>,
}
