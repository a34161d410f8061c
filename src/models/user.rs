use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Postal address embedded in a user document.
///
/// Addresses are owned by their parent user and have no independent
/// lifecycle; they are replaced wholesale when the user is updated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Address {
    #[serde(rename = "type")]
    pub address_type: String,
    pub line_one: String,
    pub line_two: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub phone: String,
    pub date_created: bson::DateTime,
    pub date_modified: bson::DateTime,
}

impl Address {
    /// Build an address from a request, stamping both timestamps.
    pub fn from_request(req: &CreateAddressRequest, now: bson::DateTime) -> Self {
        Self {
            address_type: req.address_type.clone(),
            line_one: req.line_one.clone(),
            line_two: req.line_two.clone(),
            city: req.city.clone(),
            state: req.state.clone(),
            zipcode: req.zipcode.clone(),
            phone: req.phone.clone(),
            date_created: now,
            date_modified: now,
        }
    }
}

/// User document stored in MongoDB.
///
/// `user_id` is a hex ObjectId string held in its own field, distinct from
/// the driver-assigned `_id`. It is assigned at creation and never changes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub user_id: String,
    pub user_type: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub date_created: bson::DateTime,
    pub date_modified: bson::DateTime,
}

impl User {
    /// Materialize a full user document from a create request.
    ///
    /// `now` becomes both the creation and modification timestamp, on the
    /// user and on every embedded address.
    pub fn from_request(user_id: String, req: &CreateUserRequest, now: DateTime<Utc>) -> Self {
        let now = bson::DateTime::from_millis(now.timestamp_millis());
        Self {
            user_id,
            user_type: req.user_type.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            company: req.company.clone(),
            addresses: req
                .addresses
                .iter()
                .map(|a| Address::from_request(a, now))
                .collect(),
            date_created: now,
            date_modified: now,
        }
    }
}

/// Address fields supplied by a caller; timestamps are assigned by the
/// repository.
#[derive(Debug, Deserialize, Clone)]
pub struct CreateAddressRequest {
    #[serde(rename = "type")]
    pub address_type: String,
    pub line_one: String,
    pub line_two: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub phone: String,
}

/// Request payload for creating or replacing a user.
///
/// Carries no identifier and no timestamps; both are assigned by the
/// repository. Callers are expected to run `validate()` at the edge before
/// handing the request down.
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct CreateUserRequest {
    pub user_type: String,
    /// First name (max 50 characters)
    #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
    pub first_name: String,
    /// Last name (max 50 characters)
    #[validate(length(max = 50, message = "Last name must be at most 50 characters"))]
    pub last_name: String,
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub company: String,
    #[serde(default)]
    pub addresses: Vec<CreateAddressRequest>,
}
