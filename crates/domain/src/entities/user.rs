//! User entity - authors and contributors of learning objects

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::aggregates::{LearningObject, LinkedObject};
use crate::common::{now_millis, to_epoch_millis_string, trimmed};
use crate::error::{remove_at, DomainError};
use crate::ids::{LearningObjectId, UserId};
use crate::reconstruction::schema::USER;
use crate::reconstruction::write::WriteBack;
use crate::reconstruction::Extensions;
use crate::value_objects::Email;

/// A registered user.
///
/// Learning objects embed users by value (author, contributors); the user
/// record itself is owned by the account system. A user owns the learning
/// objects in `objects`, loaded in full or held by id.
///
/// # Invariants
///
/// - `email`, when present, is structurally valid (enforced by [`Email`]);
///   `None` means no address is on file
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: Option<UserId>,
    username: String,
    name: String,
    email: Option<Email>,
    email_verified: bool,
    organization: String,
    bio: String,
    created_at: DateTime<Utc>,
    objects: Vec<LinkedObject>,
    extensions: Extensions,
}

impl User {
    // =========================================================================
    // Constructor
    // =========================================================================

    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            name: trimmed(name.into()),
            email: None,
            email_verified: false,
            organization: String::new(),
            bio: String::new(),
            created_at: now_millis(),
            objects: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The user's learning objects in stored order.
    pub fn objects(&self) -> &[LinkedObject] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> Option<&LearningObject> {
        self.objects.get(index)?.object()
    }

    pub fn object_mut(&mut self, index: usize) -> Option<&mut LearningObject> {
        self.objects.get_mut(index)?.object_mut()
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the address is malformed.
    pub fn with_email(mut self, email: impl Into<String>) -> Result<Self, DomainError> {
        self.set_email(email)?;
        Ok(self)
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.set_organization(organization);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub(crate) fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    // =========================================================================
    // Mutation Methods
    // =========================================================================

    pub(crate) fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = trimmed(name.into());
    }

    /// Replace the email address. An empty (or all-whitespace) string clears it.
    /// A changed address is no longer verified.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the address is malformed.
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), DomainError> {
        let email = email.into();
        let email = if email.trim().is_empty() {
            None
        } else {
            Some(Email::new(email)?)
        };
        if email != self.email {
            self.email_verified = false;
        }
        self.email = email;
        Ok(())
    }

    pub fn verify_email(&mut self) {
        self.email_verified = self.email.is_some();
    }

    pub(crate) fn set_email_verified(&mut self, verified: bool) {
        self.email_verified = verified;
    }

    pub fn set_organization(&mut self, organization: impl Into<String>) {
        self.organization = trimmed(organization.into());
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.bio = trimmed(bio.into());
    }

    // =========================================================================
    // Domain Methods
    // =========================================================================

    /// Start a blank learning object authored by this user.
    pub fn create_learning_object(&self) -> LearningObject {
        LearningObject::with_author(self.as_author())
    }

    /// Start a blank learning object authored by this user and keep it in
    /// `objects`. Returns its index; edit it through [`Self::object_mut`].
    pub fn add_object(&mut self) -> usize {
        let object = self.create_learning_object();
        self.push_object(object)
    }

    /// Take ownership of an existing learning object. Returns its index.
    pub fn push_object(&mut self, object: LearningObject) -> usize {
        self.objects.push(LinkedObject::Embedded(object));
        self.objects.len() - 1
    }

    /// Record a learning object by id only. Returns its index.
    pub fn add_object_ref(&mut self, id: LearningObjectId) -> usize {
        self.objects.push(LinkedObject::Reference(id));
        self.objects.len() - 1
    }

    pub fn remove_object(&mut self, index: usize) -> Result<LinkedObject, DomainError> {
        remove_at(&mut self.objects, index, "objects")
    }

    /// This user as embedded in a learning object: everything but `objects`.
    fn as_author(&self) -> User {
        User {
            id: self.id.clone(),
            username: self.username.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            email_verified: self.email_verified,
            organization: self.organization.clone(),
            bio: self.bio.clone(),
            created_at: self.created_at,
            objects: Vec::new(),
            extensions: self.extensions.clone(),
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new("", "")
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserWireFormat<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a UserId>,
    username: &'a str,
    name: &'a str,
    email: &'a str,
    email_verified: bool,
    organization: &'a str,
    bio: &'a str,
    created_at: String,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    objects: &'a [LinkedObject],
    #[serde(flatten)]
    extensions: &'a Extensions,
}

impl Serialize for User {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let write_back = WriteBack::new(&USER, &self.extensions);
        let wire = UserWireFormat {
            id: self.id.as_ref(),
            username: &self.username,
            name: &self.name,
            email: self.email.as_ref().map(Email::as_str).unwrap_or_default(),
            email_verified: self.email_verified,
            organization: &self.organization,
            bio: &self.bio,
            created_at: to_epoch_millis_string(&self.created_at),
            objects: &self.objects,
            extensions: write_back.extensions(),
        };
        write_back.write(wire, serializer)
    }
}
