//! Navigation hand-off
//!
//! Implemented by the presentation layer; the controller calls it exactly
//! once per successful login.

pub trait Navigator: Send + Sync {
    /// Push the welcome view for the signed-in user.
    fn show_welcome(&self, username: &str);
}
