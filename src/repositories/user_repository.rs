//! User repository for all MongoDB operations related to users.
//!
//! Each method performs exactly one round trip against the `users`
//! collection. The repository holds no state of its own beyond the
//! collection handle, so a single instance is safe to share across
//! concurrent callers; the store arbitrates concurrent writes
//! (last-write-wins on update). Cancellation is the caller's concern:
//! dropping a method's future, for example through `tokio::time::timeout`,
//! abandons the in-flight round trip.

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use log::debug;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::{Collection, Database};

use crate::constants::COLLECTION_USERS;
use crate::errors::StoreError;
use crate::models::{Address, CreateUserRequest, User};
use crate::validators::validate_user_id;

/// Repository for user-related database operations.
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    /// Create a new UserRepository instance.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_USERS),
        }
    }

    /// Retrieve all users. An empty collection yields an empty vec, not an
    /// error.
    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        debug!("Repository: Listing users");
        let filter = doc! {};

        let cursor = self
            .collection
            .find(filter.clone())
            .await
            .map_err(|e| StoreError::database(format!("db.users.find({})", filter), e))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::database(format!("db.users.find({})", filter), e))
    }

    /// Get the user with the given ID.
    ///
    /// Fails with [`StoreError::InvalidId`] before any store access when the
    /// ID is malformed, and with [`StoreError::NotFound`] when no document
    /// matches.
    pub async fn retrieve(&self, user_id: &str) -> Result<User, StoreError> {
        validate_user_id(user_id)?;
        debug!("Repository: Finding user by ID: {}", user_id);

        let filter = doc! { "user_id": user_id };
        let user = self
            .collection
            .find_one(filter.clone())
            .await
            .map_err(|e| StoreError::database(format!("db.users.find({})", filter), e))?;

        user.ok_or(StoreError::NotFound)
    }

    /// Insert a new user built from the request.
    ///
    /// A fresh identifier is generated here and `now` is stamped as both
    /// timestamps on the user and on every embedded address. Returns the
    /// fully populated document as persisted.
    pub async fn create(
        &self,
        req: &CreateUserRequest,
        now: DateTime<Utc>,
    ) -> Result<User, StoreError> {
        let user = User::from_request(ObjectId::new().to_hex(), req, now);
        debug!("Repository: Inserting user: {}", user.user_id);

        self.collection.insert_one(&user).await.map_err(|e| {
            StoreError::database(format!("db.users.insert(user_id: {})", user.user_id), e)
        })?;

        Ok(user)
    }

    /// Replace the stored fields of the user with the given ID.
    ///
    /// `now` becomes the new modification timestamp, on the user and on
    /// every replaced address; `user_id` and the user's `date_created` are
    /// never touched. Fails with [`StoreError::NotFound`] when no document
    /// matches.
    pub async fn update(
        &self,
        user_id: &str,
        req: &CreateUserRequest,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        validate_user_id(user_id)?;
        debug!("Repository: Updating user: {}", user_id);

        let filter = doc! { "user_id": user_id };
        let update = doc! { "$set": update_document(req, now)? };

        let result = self
            .collection
            .update_one(filter.clone(), update.clone())
            .await
            .map_err(|e| {
                StoreError::database(format!("db.users.update({}, {})", filter, update), e)
            })?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Remove the user with the given ID. Hard delete, no tombstone.
    pub async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        validate_user_id(user_id)?;
        debug!("Repository: Deleting user: {}", user_id);

        let filter = doc! { "user_id": user_id };
        let result = self
            .collection
            .delete_one(filter.clone())
            .await
            .map_err(|e| StoreError::database(format!("db.users.delete({})", filter), e))?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// Build the `$set` payload for an update.
///
/// The replaced address array is stamped with `now` for both timestamps;
/// the old array, and with it the old creation stamps, is discarded
/// wholesale by the replacement.
fn update_document(req: &CreateUserRequest, now: DateTime<Utc>) -> Result<Document, StoreError> {
    let stamp = bson::DateTime::from_millis(now.timestamp_millis());
    let addresses: Vec<Address> = req
        .addresses
        .iter()
        .map(|a| Address::from_request(a, stamp))
        .collect();

    Ok(doc! {
        "user_type": &req.user_type,
        "first_name": &req.first_name,
        "last_name": &req.last_name,
        "email": &req.email,
        "company": &req.company,
        "addresses": bson::to_bson(&addresses)?,
        "date_modified": stamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateAddressRequest;
    use mongodb::bson::Bson;

    fn sample_request() -> CreateUserRequest {
        CreateUserRequest {
            user_type: "standard".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.io".to_string(),
            company: "Analytical Engines".to_string(),
            addresses: vec![CreateAddressRequest {
                address_type: "work".to_string(),
                line_one: "1 Horsley Towers".to_string(),
                line_two: "".to_string(),
                city: "East Horsley".to_string(),
                state: "SRY".to_string(),
                zipcode: "KT24 6DT".to_string(),
                phone: "020 7946 0002".to_string(),
            }],
        }
    }

    #[test]
    fn test_update_document_stamps_modification_time() {
        let now = Utc::now();
        let fields = update_document(&sample_request(), now).unwrap();

        let stamp = fields.get_datetime("date_modified").unwrap();
        assert_eq!(stamp.timestamp_millis(), now.timestamp_millis());
        assert!(fields.get("date_created").is_none());
        assert!(fields.get("user_id").is_none());
    }

    #[test]
    fn test_update_document_stamps_replaced_addresses() {
        let now = Utc::now();
        let fields = update_document(&sample_request(), now).unwrap();

        let addresses = fields.get_array("addresses").unwrap();
        assert_eq!(addresses.len(), 1);
        let Bson::Document(address) = &addresses[0] else {
            panic!("address should serialize as a document");
        };
        assert_eq!(
            address.get_datetime("date_modified").unwrap().timestamp_millis(),
            now.timestamp_millis()
        );
        assert_eq!(
            address.get_datetime("date_created").unwrap().timestamp_millis(),
            now.timestamp_millis()
        );
        assert_eq!(address.get_str("zipcode").unwrap(), "KT24 6DT");
        assert_eq!(address.get_str("state").unwrap(), "SRY");
    }

    #[test]
    fn test_update_document_copies_top_level_fields() {
        let fields = update_document(&sample_request(), Utc::now()).unwrap();

        assert_eq!(fields.get_str("first_name").unwrap(), "Ada");
        assert_eq!(fields.get_str("last_name").unwrap(), "Lovelace");
        assert_eq!(fields.get_str("email").unwrap(), "ada@x.io");
        assert_eq!(fields.get_str("company").unwrap(), "Analytical Engines");
        assert_eq!(fields.get_str("user_type").unwrap(), "standard");
    }
}
