use serde::{Deserialize, Serialize};
use tripline_domain::{User, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub email: String,
    pub full_name: String,
    pub created: i64,
    pub updated: i64,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            created: user.created,
            updated: user.updated,
        }
    }
}
