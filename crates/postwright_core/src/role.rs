//! Role types for model conversation participants.

use serde::{Deserialize, Serialize};

/// Speaker of a message sent to a model.
///
/// # Examples
///
/// ```
/// use postwright_core::Role;
///
/// assert_ne!(Role::System, Role::User);
/// assert_eq!(format!("{}", Role::System), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages set the model's persona
    #[display("system")]
    System,
    /// User messages carry the task
    #[display("user")]
    User,
    /// Assistant messages are prior model replies
    #[display("assistant")]
    Assistant,
}
