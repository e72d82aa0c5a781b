//! Car Domain Model
//!
//! Represents a car listing in the catalog. Apart from `brand` and the
//! ownership/bookkeeping fields, a listing is an opaque JSON object.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Maximum number of cars a single user may list at any time
pub const MAX_CARS: u64 = 5;

/// Well-known field names of a stored car document
pub mod fields {
    pub const ID: &str = "_id";
    pub const BRAND: &str = "brand";
    pub const USER_EMAIL: &str = "userEmail";
    pub const USER_NAME: &str = "userName";
    pub const SHORT_DESCRIPTION: &str = "shortDescription";
    pub const PHONE: &str = "phone";
    pub const CREATED_AT: &str = "created_at";
}

/// Newtype wrapper for Car ID providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarId(ObjectId);

impl CarId {
    /// Create a new random CarId
    #[must_use]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Create a CarId from an existing ObjectId
    #[must_use]
    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    /// Get the underlying ObjectId
    #[must_use]
    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }

    /// Hex representation used on the wire
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for CarId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ObjectId> for CarId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl TryFrom<&str> for CarId {
    type Error = bson::oid::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(Self(ObjectId::parse_str(value)?))
    }
}

/// Fields excluded from a response view.
///
/// The store applies the projection when reading; in-process adapters can use
/// [`Projection::apply`] to get the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection(&'static [&'static str]);

impl Projection {
    /// List view: private and bookkeeping fields are hidden
    pub const LISTING: Self = Self(&[
        fields::CREATED_AT,
        fields::SHORT_DESCRIPTION,
        fields::USER_NAME,
        fields::USER_EMAIL,
        fields::PHONE,
    ]);

    /// Detail view: only the creation timestamp is hidden
    pub const DETAIL: Self = Self(&[fields::CREATED_AT]);

    #[must_use]
    pub fn excluded(&self) -> &'static [&'static str] {
        self.0
    }

    /// Remove every excluded field from `fields`
    pub fn apply(&self, fields: &mut Map<String, Value>) {
        for name in self.0 {
            fields.remove(*name);
        }
    }
}

/// Data required to create a new Car
#[derive(Debug, Clone)]
pub struct NewCar {
    fields: Map<String, Value>,
    created_at: DateTime<Utc>,
}

impl NewCar {
    /// Build a listing owned by `owner_email`.
    ///
    /// Client-supplied `_id`, `created_at` and `userEmail` are dropped; the
    /// owner always comes from the verified principal.
    #[must_use]
    pub fn new(mut fields: Map<String, Value>, owner_email: &str) -> Self {
        fields.remove(fields::ID);
        fields.remove(fields::CREATED_AT);
        fields.insert(
            fields::USER_EMAIL.to_string(),
            Value::String(owner_email.to_string()),
        );

        Self {
            fields,
            created_at: Utc::now(),
        }
    }

    /// Listing fields, including `userEmail` but not `created_at`
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Car domain entity as read back from the store
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    id: CarId,
    fields: Map<String, Value>,
}

impl Car {
    /// Restore a Car from persisted data. `_id` is never kept in `fields`.
    #[must_use]
    pub fn restore(id: CarId, mut fields: Map<String, Value>) -> Self {
        fields.remove(fields::ID);
        Self { id, fields }
    }

    #[must_use]
    pub fn id(&self) -> &CarId {
        &self.id
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// JSON object as returned to clients, with `_id` as a hex string
    #[must_use]
    pub fn into_json(self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 1);
        object.insert(fields::ID.to_string(), Value::String(self.id.to_hex()));
        object.extend(self.fields);
        Value::Object(object)
    }
}
