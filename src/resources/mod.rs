//! Per-resource REST operations
//!
//! Every backend resource exposes the same six routes:
//!
//! | operation   | request                              |
//! |-------------|--------------------------------------|
//! | `get_all`   | `GET /<resource>`                    |
//! | `get_by_id` | `GET /<resource>/id/<id>`            |
//! | `search`    | `GET /<resource>/search/?search=..`  |
//! | `create`    | `POST /<resource>`                   |
//! | `update`    | `PATCH /<resource>/id/<id>`          |
//! | `delete`    | `DELETE /<resource>/id/<id>`         |
//!
//! [`ResourceClient`] implements them once, generically over a [`Resource`]
//! description.

mod number;
mod types;

use std::marker::PhantomData;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::fetch::{Fetch, FetchBuilder};

pub use types::*;

/// Describes one REST resource: its path and payload types
pub trait Resource {
    /// Path segment under the API base URL
    const PATH: &'static str;

    /// The record returned by the server
    type Record: DeserializeOwned + Send;

    /// The body sent on create
    type New: Serialize + Sync;

    /// The body sent on update
    type Patch: Serialize + Sync;

    /// Path of the collection listing
    fn list_path() -> String {
        format!("/{}", Self::PATH)
    }
}

macro_rules! resource {
    ($(#[$meta:meta])* $name:ident, $path:literal, $record:ty, $new:ty, $patch:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Resource for $name {
            const PATH: &'static str = $path;
            type Record = $record;
            type New = $new;
            type Patch = $patch;
        }
    };
}

resource!(
    /// `/user`
    Users, "user", User, NewUser, UserPatch
);
resource!(
    /// `/user_preferences`
    UserPreferences, "user_preferences", Preferences, NewPreferences, PreferencesPatch
);
resource!(
    /// `/goal`
    Goals, "goal", Goal, NewGoal, GoalPatch
);
resource!(
    /// `/health_report`
    HealthReports, "health_report", HealthReport, NewHealthReport, HealthReportPatch
);
resource!(
    /// `/meal`
    Meals, "meal", Meal, NewMeal, MealPatch
);
resource!(
    /// `/prediction_history`
    Predictions, "prediction_history", PredictionHistory, NewPrediction, PredictionPatch
);
resource!(
    /// `/step_record`
    StepRecords, "step_record", StepRecord, NewStepRecord, StepRecordPatch
);
resource!(
    /// `/workout`
    Workouts, "workout", Workout, NewWorkout, WorkoutPatch
);

/// `/notification`
#[derive(Debug, Clone, Copy)]
pub struct Notifications;

impl Resource for Notifications {
    const PATH: &'static str = "notification";
    type Record = Notification;
    type New = NewNotification;
    type Patch = NotificationPatch;

    // the listing route is registered with a trailing slash
    fn list_path() -> String {
        "/notification/".to_string()
    }
}

/// Client for one REST resource
pub struct ResourceClient<R: Resource> {
    /// The API base URL
    base_url: String,

    /// Value of the `X-Client-Info` header
    client_info: String,

    /// HTTP client
    client: Client,

    _resource: PhantomData<R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client_info: self.client_info.clone(),
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    /// Create a new ResourceClient
    pub fn new(base_url: &str, client_info: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client_info: client_info.to_string(),
            client,
            _resource: PhantomData,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn item_url(&self, id: i64) -> String {
        self.url(&format!("/{}/id/{}", R::PATH, id))
    }

    fn tagged<'a>(&self, fetch: FetchBuilder<'a>) -> FetchBuilder<'a> {
        fetch.header("X-Client-Info", &self.client_info)
    }

    /// Fetch every record of this resource
    pub async fn get_all(&self) -> Result<Vec<R::Record>> {
        let url = self.url(&R::list_path());
        self.tagged(Fetch::get(&self.client, &url)).execute().await
    }

    /// Fetch one record by id
    pub async fn get_by_id(&self, id: i64) -> Result<R::Record> {
        let url = self.item_url(id);
        self.tagged(Fetch::get(&self.client, &url)).execute().await
    }

    /// Full-text search over the resource
    pub async fn search(&self, term: &str) -> Result<Vec<R::Record>> {
        let url = self.url(&format!("/{}/search/", R::PATH));
        self.tagged(Fetch::get(&self.client, &url))
            .query("search", term)
            .execute()
            .await
    }

    /// Create a record and return the stored representation
    pub async fn create(&self, body: &R::New) -> Result<R::Record> {
        let url = self.url(&format!("/{}", R::PATH));
        self.tagged(Fetch::post(&self.client, &url))
            .json(body)?
            .execute()
            .await
    }

    /// Apply a partial update and return the stored representation
    pub async fn update(&self, id: i64, patch: &R::Patch) -> Result<R::Record> {
        let url = self.item_url(id);
        self.tagged(Fetch::patch(&self.client, &url))
            .json(patch)?
            .execute()
            .await
    }

    /// Delete a record
    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = self.item_url(id);
        self.tagged(Fetch::delete(&self.client, &url))
            .execute_empty()
            .await
    }
}

impl<R> ResourceClient<R>
where
    R: Resource,
    R::Record: Owned,
{
    /// Fetch every record and keep the ones owned by `user_id`
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<R::Record>> {
        let mut records = self.get_all().await?;
        records.retain(|r| r.owner() == user_id);
        Ok(records)
    }
}
