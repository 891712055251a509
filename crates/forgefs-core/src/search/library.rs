//! Shared-library naming conventions and default search locations.

use crate::platform::HostOs;

/// Default library directories on UNIX-like hosts, in precedence order.
pub const DEFAULT_LIBRARY_DIRS: &[&str] = &["/lib", "/usr/lib", "/usr/local/lib"];

/// Extra directories searched first on 64-bit, non-macOS UNIX-like hosts.
pub const DEFAULT_LIBRARY_DIRS_64: &[&str] = &["/lib64", "/usr/lib64", "/usr/local/lib64"];

/// A filename template: `prefix` + logical name + `suffix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryNameFormat {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl LibraryNameFormat {
    pub const fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    /// The undecorated name.
    pub const fn bare() -> Self {
        Self::new("", "")
    }

    /// Apply the template to a logical library name.
    pub fn file_name(&self, name: &str) -> String {
        format!("{}{name}{}", self.prefix, self.suffix)
    }

    /// Naming conventions for a host, decorated forms first, bare name last.
    pub fn for_host(os: &HostOs) -> Vec<Self> {
        match os {
            HostOs::Windows => vec![Self::new("", ".dll"), Self::bare()],
            HostOs::MacOsX => vec![
                Self::new("lib", ".dylib"),
                Self::new("", ".dylib"),
                Self::bare(),
            ],
            _ => vec![Self::new("lib", ".so"), Self::new("", ".so"), Self::bare()],
        }
    }
}

/// Environment variable holding the dynamic-library search path on a host.
pub const fn library_path_var(os: &HostOs) -> &'static str {
    match os {
        HostOs::Windows => "PATH",
        HostOs::Haiku => "LIBRARY_PATH",
        HostOs::MacOsX => "DYLD_LIBRARY_PATH",
        _ => "LD_LIBRARY_PATH",
    }
}

/// Whether a host keeps its linker search path in `ld.so.conf`.
pub const fn reads_ld_so_conf(os: &HostOs) -> bool {
    !matches!(os, HostOs::Windows | HostOs::Haiku | HostOs::MacOsX)
}

/// Whether a host has the `/lib`, `/usr/lib`, ... default directories.
pub const fn has_default_library_dirs(os: &HostOs) -> bool {
    !matches!(os, HostOs::Windows | HostOs::Haiku)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_per_host() {
        let names: Vec<String> = LibraryNameFormat::for_host(&HostOs::Linux)
            .iter()
            .map(|f| f.file_name("z"))
            .collect();
        assert_eq!(names, vec!["libz.so", "z.so", "z"]);

        let names: Vec<String> = LibraryNameFormat::for_host(&HostOs::Windows)
            .iter()
            .map(|f| f.file_name("zlib"))
            .collect();
        assert_eq!(names, vec!["zlib.dll", "zlib"]);

        let names: Vec<String> = LibraryNameFormat::for_host(&HostOs::MacOsX)
            .iter()
            .map(|f| f.file_name("z"))
            .collect();
        assert_eq!(names, vec!["libz.dylib", "z.dylib", "z"]);
    }

    #[test]
    fn test_library_path_vars() {
        assert_eq!(library_path_var(&HostOs::Windows), "PATH");
        assert_eq!(library_path_var(&HostOs::MacOsX), "DYLD_LIBRARY_PATH");
        assert_eq!(library_path_var(&HostOs::Haiku), "LIBRARY_PATH");
        assert_eq!(library_path_var(&HostOs::Bsd), "LD_LIBRARY_PATH");
    }
}
