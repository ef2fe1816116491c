use serde::{Deserialize, Serialize};

/// Contact channels for one owner, resolved at dispatch time from the
/// owners table. Never persisted. Both fields are independently nullable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerContact {
    pub line_user_id: Option<String>,
    pub email: Option<String>,
}

impl OwnerContact {
    pub fn unreachable(&self) -> bool {
        self.line_user_id.is_none() && self.email.is_none()
    }
}
