//! Host probe port: operating system identity and native word-size check.
//!
//! # Design Notes
//!
//! - Core owns the trait (pure)
//! - Runtime owns the implementation (`cfg!` checks, WOW64 detection)
//! - The engine layers the environment/shell fallback on top, see
//!   [`crate::platform::PlatformProbe`]

use crate::platform::HostOs;

/// Port for facts about the host that need no probing commands.
#[cfg_attr(test, mockall::automock)]
pub trait HostProbe: Send + Sync {
    /// Operating system the engine is running on.
    fn os(&self) -> HostOs;

    /// Native "is this a 64-bit host" capability check.
    ///
    /// Returns `None` when the native check cannot decide, in which case
    /// the engine falls back to probing environment values and commands.
    fn native_is_64bit(&self) -> Option<bool>;
}
