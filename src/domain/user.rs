use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;

/// A user that customers can be assigned to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}
