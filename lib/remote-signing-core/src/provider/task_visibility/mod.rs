/// Keeps a running signing session visible to the user when the platform
/// might otherwise hide or throttle it (power saving, app in background).
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait TaskVisibility: Send + Sync {
    fn power_saving_active(&self) -> bool;

    /// Surfaces the verification code outside the application UI
    fn show_challenge(&self, challenge: &str);

    fn dismiss(&self);
}

pub struct NoTaskVisibility;

impl TaskVisibility for NoTaskVisibility {
    fn power_saving_active(&self) -> bool {
        false
    }

    fn show_challenge(&self, _challenge: &str) {}

    fn dismiss(&self) {}
}
