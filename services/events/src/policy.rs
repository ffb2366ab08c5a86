//! Authorization decisions
//!
//! Pure functions over already-loaded rows. The only privilege in the
//! system is the admin flag on the user; everything else is ownership.

use crate::models::{Event, User};

/// Reason an action was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denied(pub &'static str);

/// Listing every user is reserved to admins.
///
/// Takes the admin flag as currently stored, not the one loaded with the
/// request.
pub fn can_list_users(is_admin: bool) -> Result<(), Denied> {
    if is_admin {
        Ok(())
    } else {
        Err(Denied("user is not an admin"))
    }
}

/// Looking up another user's profile is reserved to admins
pub fn can_view_user(is_admin: bool) -> Result<(), Denied> {
    can_list_users(is_admin)
}

/// Updating or deleting an event requires being its creator or an admin
pub fn can_modify_event(user: &User, event: &Event) -> Result<(), Denied> {
    if user.id == event.creator || user.is_admin {
        Ok(())
    } else {
        Err(Denied("user did not create the event and is not an admin"))
    }
}

/// A registration can only be withdrawn if it exists
pub fn can_unregister(is_registered: bool) -> Result<(), Denied> {
    if is_registered {
        Ok(())
    } else {
        Err(Denied("user is not registered to the event"))
    }
}
