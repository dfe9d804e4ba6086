//! Authentication and session lifecycle

mod session;
mod types;

use std::sync::{Arc, RwLock};

use log::{info, warn};
use reqwest::Client;
use serde_json::Value;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::resources::{NewPreferences, NewUser, ResourceClient, UserPreferences, Users};
use crate::storage::SessionStore;

pub use session::*;
pub use types::*;

/// Client for login, registration and the local session
#[derive(Clone)]
pub struct Auth {
    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,

    /// The current session
    session: Arc<RwLock<Option<Session>>>,

    /// Where the session is persisted
    store: Arc<dyn SessionStore>,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(client: Client, options: ClientOptions, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            options,
            session: Arc::new(RwLock::new(None)),
            store,
        }
    }

    fn users(&self) -> ResourceClient<Users> {
        ResourceClient::new(&self.options.base_url, &self.options.client_info, self.client.clone())
    }

    fn preferences(&self) -> ResourceClient<UserPreferences> {
        ResourceClient::new(&self.options.base_url, &self.options.client_info, self.client.clone())
    }

    fn set_session(&self, session: Option<Session>) {
        let mut current = match self.session.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = session;
    }

    /// Log in with email and password.
    ///
    /// The server answers with an opaque user payload; the session is built
    /// from its user id and persisted to the session store.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/login/", self.options.base_url.trim_end_matches('/'));
        let credentials = LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let payload = Fetch::post(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .json(&credentials)?
            .execute::<Value>()
            .await?;

        let session = Session::from_login_payload(payload)?;
        self.store.save(&session.to_stored()).await?;
        self.set_session(Some(session.clone()));

        info!("logged in as user {}", session.user_id);
        Ok(session)
    }

    /// Create an account together with its default preferences.
    ///
    /// Failing to create the preferences is logged and does not fail the
    /// registration. Registering does not log in.
    pub async fn register(&self, new_user: &NewUser) -> Result<Registration> {
        let user = self.users().create(new_user).await?;
        info!("registered user {}", user.id);

        let preferences = match self
            .preferences()
            .create(&NewPreferences::defaults_for(user.id))
            .await
        {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                warn!("failed to create default preferences for user {}: {}", user.id, e);
                None
            }
        };

        Ok(Registration { user, preferences })
    }

    /// End the session and forget the stored user. No request is made.
    ///
    /// The stored user is cleared first; if that fails the session stays
    /// active and the error is returned.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        let previous = self.session();
        self.set_session(None);

        if let Some(session) = previous {
            info!("logged out user {}", session.user_id);
        }
        Ok(())
    }

    /// Delete the logged-in user's account, then log out
    pub async fn delete_account(&self) -> Result<()> {
        let user_id = self.require_user_id()?;
        self.users().delete(user_id).await?;
        info!("deleted account {}", user_id);
        self.logout().await
    }

    /// Resume the session persisted by an earlier login, if any
    pub async fn restore(&self) -> Result<Option<Session>> {
        let session = self.store.load().await?.map(Session::from_stored);
        if let Some(ref s) = session {
            info!("resumed session for user {}", s.user_id);
        }
        self.set_session(session.clone());
        Ok(session)
    }

    /// Get the current session
    pub fn session(&self) -> Option<Session> {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether a session is active
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// The logged-in user's id, or an auth error when logged out
    pub fn require_user_id(&self) -> Result<i64> {
        self.session()
            .map(|s| s.user_id)
            .ok_or_else(|| Error::auth("Not logged in"))
    }
}
