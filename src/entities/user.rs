use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Rider,
    Driver,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub vehicle_no: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
}

impl User {
    pub fn is_driver(&self) -> bool {
        self.role == Role::Driver
    }

    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }

    pub fn apply(&mut self, profile: &User) {
        self.name = profile.name.clone();
        self.phone = profile.phone.clone();
        self.is_active = profile.is_active;
        self.vehicle_no = profile.vehicle_no.clone();
        self.vehicle_model = profile.vehicle_model.clone();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Validate)]
pub struct SignupFields {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub role: Role,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub vehicle_no: String,
    pub vehicle_model: String,
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone().unwrap_or_default(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            is_active: user.is_active,
            vehicle_no: user.vehicle_no.clone().unwrap_or_default(),
            vehicle_model: user.vehicle_model.clone().unwrap_or_default(),
        }
    }
}

/// Driver contact card shown to a rider for a given ride.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vehicle_no: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}
