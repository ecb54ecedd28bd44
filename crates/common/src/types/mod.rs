use serde::{Deserialize, Serialize};

pub const HEALTH_MESSAGE: &str = "convenience store seating service is running";

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: String,
    pub message: String,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok".into(), message: HEALTH_MESSAGE.into() }
    }
}

/// Body of every failed API response.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
