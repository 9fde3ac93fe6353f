use thiserror::Error;
use tracing::info;

use crate::database::{ActivityDirectory, SharedDirectory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is already signed up")]
    AlreadySignedUp,
    #[error("Student is not registered for this activity")]
    NotRegistered,
}

impl DirectoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::ActivityNotFound => ErrorKind::NotFound,
            DirectoryError::AlreadySignedUp | DirectoryError::NotRegistered => {
                ErrorKind::BadRequest
            }
        }
    }
}

/// Snapshot of the whole directory, taken under the read guard.
pub async fn list_activities(directory: &SharedDirectory) -> ActivityDirectory {
    directory.read().await.clone()
}

pub async fn signup(
    directory: &SharedDirectory,
    activity_name: &str,
    email: &str,
) -> Result<String, DirectoryError> {
    let mut guard = directory.write().await;
    signup_in(&mut guard, activity_name, email)
}

pub async fn unregister(
    directory: &SharedDirectory,
    activity_name: &str,
    email: &str,
) -> Result<String, DirectoryError> {
    let mut guard = directory.write().await;
    unregister_in(&mut guard, activity_name, email)
}

/// Appends `email` to the roster. Capacity is not checked.
pub fn signup_in(
    directory: &mut ActivityDirectory,
    activity_name: &str,
    email: &str,
) -> Result<String, DirectoryError> {
    let activity = directory
        .get_mut(activity_name)
        .ok_or(DirectoryError::ActivityNotFound)?;
    if activity.has_participant(email) {
        return Err(DirectoryError::AlreadySignedUp);
    }
    activity.participants.push(email.to_string());
    info!(
        activity = %activity_name,
        email = %email,
        roster = activity.participants.len(),
        "participant signed up"
    );
    Ok(format!("Signed up {} for {}", email, activity_name))
}

pub fn unregister_in(
    directory: &mut ActivityDirectory,
    activity_name: &str,
    email: &str,
) -> Result<String, DirectoryError> {
    let activity = directory
        .get_mut(activity_name)
        .ok_or(DirectoryError::ActivityNotFound)?;
    let Some(pos) = activity.participants.iter().position(|p| p == email) else {
        return Err(DirectoryError::NotRegistered);
    };
    activity.participants.remove(pos);
    info!(
        activity = %activity_name,
        email = %email,
        roster = activity.participants.len(),
        "participant unregistered"
    );
    Ok(format!("Unregistered {} from {}", email, activity_name))
}
