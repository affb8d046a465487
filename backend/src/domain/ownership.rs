//! Resource ownership checks shared by every owner-scoped operation.

use crate::domain::{Error, UserId};

/// Message returned when a caller touches a resource they do not own.
pub const NOT_AUTHORIZED: &str = "Not authorized";

/// A resource that belongs to exactly one user.
pub trait Owned {
    /// The user that owns this resource.
    fn owner(&self) -> &UserId;
}

/// Confirm `caller` owns `resource`.
///
/// # Examples
/// ```
/// use support_desk::domain::{Owned, UserId, authorize_owner};
///
/// struct Note(UserId);
/// impl Owned for Note {
///     fn owner(&self) -> &UserId { &self.0 }
/// }
///
/// let owner = UserId::random();
/// assert!(authorize_owner(&owner, &Note(owner)).is_ok());
/// assert!(authorize_owner(&UserId::random(), &Note(owner)).is_err());
/// ```
pub fn authorize_owner<R>(caller: &UserId, resource: &R) -> Result<(), Error>
where
    R: Owned + ?Sized,
{
    if resource.owner() == caller {
        Ok(())
    } else {
        Err(Error::unauthorized(NOT_AUTHORIZED))
    }
}
