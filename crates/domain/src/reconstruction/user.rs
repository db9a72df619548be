use serde_json::{Map, Value};

use super::bag::PropertyBag;
use super::object::linked_objects;
use super::schema::USER;
use super::Instantiate;
use crate::aggregates::LinkedObject;
use crate::entities::User;
use crate::error::DomainError;
use crate::ids::UserId;

impl Instantiate for User {
    fn instantiate(bag: Map<String, Value>) -> Result<Self, DomainError> {
        let mut bag = PropertyBag::new(&USER, bag);
        let mut user = User::default();

        if let Some(id) = bag.take_string("id")?.present().filter(|id| !id.trim().is_empty()) {
            user = user.with_id(UserId::new(id)?);
        }
        if let Some(username) = bag.take_string("username")?.present() {
            user.set_username(username);
        }
        if let Some(name) = bag.take_string("name")?.present() {
            user.set_name(name);
        }
        if let Some(email) = bag.take_string("email")?.present() {
            user.set_email(email)?;
        }
        // after the email, which resets verification
        if let Some(verified) = bag.take_bool("emailVerified")?.present() {
            user.set_email_verified(verified);
        }
        if let Some(organization) = bag.take_string("organization")?.present() {
            user.set_organization(organization);
        }
        if let Some(bio) = bag.take_string("bio")?.present() {
            user.set_bio(bio);
        }
        if let Some(created_at) = bag.take_timestamp("createdAt")?.present() {
            user = user.with_created_at(created_at);
        }
        let objects = bag.take_array("objects")?.present().unwrap_or_default();
        for object in linked_objects(objects, || DomainError::InvalidObject)? {
            match object {
                LinkedObject::Embedded(object) => user.push_object(object),
                LinkedObject::Reference(id) => user.add_object_ref(id),
            };
        }

        Ok(user.with_extensions(bag.into_extensions()))
    }
}
