use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Schedule,
    Services,
    Conversation,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Schedule => "schedule",
            Route::Services => "services",
            Route::Conversation => "conversation",
        }
    }
}

/// Which FAQ entry a services question lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceTopic {
    HealthTech,
    FemTech,
    AgeTech,
    General,
}
