//! ZenMotion Rust Client Library
//!
//! A Rust client for the ZenMotion fitness backend: typed access to its REST
//! resources, the login session, and the daily and weekly summaries the app
//! screens are built from.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod input;
pub mod resources;
pub mod storage;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::Auth;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::resources::{
    Goals, HealthReports, Meals, Notifications, Predictions, Resource, ResourceClient, StepRecords,
    UserPreferences, Users, Workouts,
};
use crate::storage::{FileSessionStore, MemorySessionStore, SessionStore};

/// The main entry point for the ZenMotion client
#[derive(Clone)]
pub struct ZenMotion {
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client for login and the local session
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
}

impl ZenMotion {
    /// Create a new client for the API at `base_url`
    ///
    /// # Example
    ///
    /// ```
    /// use zenmotion_rust::ZenMotion;
    ///
    /// let zen = ZenMotion::new("http://localhost:8000/api").unwrap();
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        Self::new_with_options(ClientOptions::default().with_base_url(base_url))
    }

    /// Create a new client with custom options.
    ///
    /// The session is kept in `options.session_file` when set, in memory
    /// otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use zenmotion_rust::{ZenMotion, config::ClientOptions};
    ///
    /// let options = ClientOptions::default()
    ///     .with_base_url("http://localhost:8000/api")
    ///     .with_request_timeout(Some(Duration::from_secs(10)));
    /// let zen = ZenMotion::new_with_options(options).unwrap();
    /// ```
    pub fn new_with_options(options: ClientOptions) -> Result<Self> {
        let store: Arc<dyn SessionStore> = match &options.session_file {
            Some(path) => Arc::new(FileSessionStore::new(path.clone())),
            None => Arc::new(MemorySessionStore::new()),
        };
        Self::with_store(options, store)
    }

    /// Create a new client that persists its session in `store`
    pub fn with_store(options: ClientOptions, store: Arc<dyn SessionStore>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let auth = Auth::new(http_client.clone(), options.clone(), store);

        Ok(Self {
            http_client,
            auth,
            options,
        })
    }

    /// Create a new client configured from the environment and `.env`
    pub fn from_env() -> Result<Self> {
        Self::new_with_options(ClientOptions::from_env()?)
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// A client for any resource
    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(
            &self.options.base_url,
            &self.options.client_info,
            self.http_client.clone(),
        )
    }

    /// Client for `/user`
    pub fn users(&self) -> ResourceClient<Users> {
        self.resource()
    }

    /// Client for `/user_preferences`
    pub fn preferences(&self) -> ResourceClient<UserPreferences> {
        self.resource()
    }

    /// Client for `/goal`
    pub fn goals(&self) -> ResourceClient<Goals> {
        self.resource()
    }

    /// Client for `/health_report`
    pub fn health_reports(&self) -> ResourceClient<HealthReports> {
        self.resource()
    }

    /// Client for `/meal`
    pub fn meals(&self) -> ResourceClient<Meals> {
        self.resource()
    }

    /// Client for `/notification`
    pub fn notifications(&self) -> ResourceClient<Notifications> {
        self.resource()
    }

    /// Client for `/prediction_history`
    pub fn predictions(&self) -> ResourceClient<Predictions> {
        self.resource()
    }

    /// Client for `/step_record`
    pub fn step_records(&self) -> ResourceClient<StepRecords> {
        self.resource()
    }

    /// Client for `/workout`
    pub fn workouts(&self) -> ResourceClient<Workouts> {
        self.resource()
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::Session;
    pub use crate::config::ClientOptions;
    pub use crate::dashboard::{DailySummary, DayKey, WeeklyActivity};
    pub use crate::error::{Error, Result};
    pub use crate::resources::*;
    pub use crate::ZenMotion;
}
