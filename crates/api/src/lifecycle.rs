use crate::models::MappingProfile;

/// Outcome of asking for the mapping pair of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The published pair belongs to the requested profile.
    AvailableNow,
    /// A build is running (possibly started by this call).
    Pending,
    /// No profile is selected.
    Disabled,
}

pub trait MappingLifecycle: Send + Sync {
    /// Make sure the pair for `profile` is published or being built.
    ///
    /// Never blocks on the build itself.
    fn trigger_load(&self, profile: Option<&MappingProfile>) -> LoadStatus;

    /// Whether a complete pair is currently published.
    fn is_loaded(&self) -> bool;
}
