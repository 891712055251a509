//! Host platform identification and word-size detection.
//!
//! The 64-bit answer is expensive to obtain on some hosts (it may shell out),
//! so [`PlatformProbe`] resolves it once and keeps the result for its whole
//! lifetime.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::ports::{CommandRunner, EnvironmentPort, HostProbe};

/// Architecture identifiers that denote a 64-bit host.
///
/// Matched as case-insensitive substrings of the probed architecture string.
pub const SIXTY_FOUR_BIT_ARCHES: &[&str] = &[
    "x86_64",
    "ia64",
    "amd64",
    "ppc64",
    "powerpc64",
    "sparc64",
    "aarch64",
    "arm64",
    "s390x",
    "riscv64",
];

/// Operating system families the engine distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostOs {
    Windows,
    MacOsX,
    Linux,
    Bsd,
    Solaris,
    Haiku,
    Aix,
    Hurd,
    /// Any other host, identified by its lowercase name.
    Other(String),
}

impl HostOs {
    /// Identifier exposed to build scripts.
    pub fn id(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::MacOsX => "macosx",
            Self::Linux => "linux",
            Self::Bsd => "bsd",
            Self::Solaris => "solaris",
            Self::Haiku => "haiku",
            Self::Aix => "aix",
            Self::Hurd => "hurd",
            Self::Other(name) => name,
        }
    }

    /// Map a Rust `target_os` value onto a host family.
    pub fn from_target_os(target_os: &str) -> Self {
        match target_os {
            "windows" => Self::Windows,
            "macos" => Self::MacOsX,
            "linux" | "android" => Self::Linux,
            "freebsd" | "netbsd" | "openbsd" | "dragonfly" => Self::Bsd,
            "solaris" | "illumos" => Self::Solaris,
            "haiku" => Self::Haiku,
            "aix" => Self::Aix,
            "hurd" => Self::Hurd,
            other => Self::Other(other.to_ascii_lowercase()),
        }
    }

    /// Whether file names compare case-insensitively by default.
    pub const fn is_case_insensitive(&self) -> bool {
        matches!(self, Self::Windows | Self::MacOsX)
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Host OS identity plus the memoized 64-bit check.
pub struct PlatformProbe {
    os: HostOs,
    host: Arc<dyn HostProbe>,
    env: Arc<dyn EnvironmentPort>,
    commands: Arc<dyn CommandRunner>,
    is_64bit: OnceLock<bool>,
}

impl PlatformProbe {
    /// Create a probe. The OS is read once here; the word size is resolved
    /// lazily on the first [`is_64bit`](Self::is_64bit) call.
    pub fn new(
        host: Arc<dyn HostProbe>,
        env: Arc<dyn EnvironmentPort>,
        commands: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            os: host.os(),
            host,
            env,
            commands,
            is_64bit: OnceLock::new(),
        }
    }

    pub const fn os(&self) -> &HostOs {
        &self.os
    }

    pub fn os_id(&self) -> &str {
        self.os.id()
    }

    /// Case-insensitive comparison against [`os_id`](Self::os_id).
    pub fn is(&self, id: &str) -> bool {
        self.os_id().eq_ignore_ascii_case(id)
    }

    /// Whether the host is 64-bit. Resolved once, never recomputed.
    pub fn is_64bit(&self) -> bool {
        *self.is_64bit.get_or_init(|| self.resolve_64bit())
    }

    fn resolve_64bit(&self) -> bool {
        if let Some(native) = self.host.native_is_64bit() {
            debug!(native, "64-bit check answered natively");
            return native;
        }

        let Some(arch) = self.probe_arch() else {
            debug!("No architecture probe value; assuming 32-bit host");
            return false;
        };
        let arch = arch.to_ascii_lowercase();
        let wide = SIXTY_FOUR_BIT_ARCHES.iter().any(|known| arch.contains(known));
        debug!(arch = %arch, wide, "64-bit check answered by probe");
        wide
    }

    fn probe_arch(&self) -> Option<String> {
        match self.os {
            HostOs::Windows => self.env.var("PROCESSOR_ARCHITECTURE"),
            HostOs::MacOsX => self.commands.output_of("echo $HOSTTYPE").ok(),
            _ => self.commands.output_of("uname -m").ok(),
        }
    }
}

impl fmt::Debug for PlatformProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformProbe")
            .field("os", &self.os)
            .field("is_64bit", &self.is_64bit.get())
            .finish_non_exhaustive()
    }
}
