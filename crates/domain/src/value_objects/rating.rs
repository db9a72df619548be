//! A user's rating of a learning object

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::{now_millis, to_epoch_millis_string};
use crate::entities::User;

/// One user's score and comment.
///
/// Ratings are owned by the rating service; the domain only carries them.
/// `date` is kept as stored (epoch milliseconds for ratings created here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user: User,
    pub number: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rating {
    /// A rating made now.
    pub fn new(user: User, number: f64, comment: impl Into<String>) -> Self {
        Self {
            id: None,
            user,
            number,
            comment: comment.into(),
            date: to_epoch_millis_string(&now_millis()),
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
