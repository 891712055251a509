//! Dynamic-linker configuration (`ld.so.conf`) parsing.
//!
//! Only directory lines and `include <glob>` directives are understood.
//! Anything unreadable contributes nothing.

use std::collections::HashSet;

use tracing::debug;

use crate::glob::GlobMatcher;
use crate::paths::{directory_of, is_absolute, join, normalize};
use crate::ports::FileSystemPort;

/// Directories listed by `conf_file` and everything it includes, in order.
pub fn parse_ld_so_conf(fs: &dyn FileSystemPort, glob: &GlobMatcher, conf_file: &str) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut dirs = Vec::new();
    parse_into(fs, glob, conf_file, &mut visited, &mut dirs);
    dirs
}

fn parse_into(
    fs: &dyn FileSystemPort,
    glob: &GlobMatcher,
    conf_file: &str,
    visited: &mut HashSet<String>,
    dirs: &mut Vec<String>,
) {
    if !visited.insert(normalize(conf_file)) {
        debug!(conf_file, "Include cycle in linker config; skipping");
        return;
    }

    let contents = match fs.read_to_string(conf_file) {
        Ok(contents) => contents,
        Err(err) => {
            debug!(error = %err, "Unreadable linker config ignored");
            return;
        }
    };

    for raw in contents.lines() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() || line.starts_with("hwcap") {
            continue;
        }

        if let Some(pattern) = include_target(line) {
            let pattern = if is_absolute(pattern) {
                pattern.to_string()
            } else {
                join(&directory_of(conf_file), pattern)
            };
            match glob.match_files(&pattern) {
                Ok(included) => {
                    for file in included {
                        parse_into(fs, glob, &file, visited, dirs);
                    }
                }
                Err(err) => debug!(error = %err, "Linker config include ignored"),
            }
        } else {
            dirs.push(line.to_string());
        }
    }
}

/// The glob of an `include` directive, if `line` is one.
fn include_target(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("include")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let target = rest.trim();
    (!target.is_empty()).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFs;
    use std::sync::Arc;

    fn parse(fs: MemoryFs, conf: &str) -> Vec<String> {
        let fs = Arc::new(fs);
        let glob = GlobMatcher::new(fs.clone(), false);
        parse_ld_so_conf(fs.as_ref(), &glob, conf)
    }

    #[test]
    fn test_plain_directories_and_comments() {
        let fs = MemoryFs::new().with_file_contents(
            "/etc/ld.so.conf",
            "# system libs\n/usr/lib/x86_64-linux-gnu\n\n  /opt/lib  # vendor\nhwcap 0 nosegneg\n",
        );
        assert_eq!(
            parse(fs, "/etc/ld.so.conf"),
            vec!["/usr/lib/x86_64-linux-gnu", "/opt/lib"]
        );
    }

    #[test]
    fn test_includes_are_followed_in_place() {
        let fs = MemoryFs::new()
            .with_file_contents("/etc/ld.so.conf", "/first\ninclude /etc/ld.so.conf.d/*.conf\n/last\n")
            .with_file_contents("/etc/ld.so.conf.d/a.conf", "/from/a\n")
            .with_file_contents("/etc/ld.so.conf.d/b.conf", "/from/b\n")
            .with_file_contents("/etc/ld.so.conf.d/notes.txt", "/ignored\n");
        assert_eq!(
            parse(fs, "/etc/ld.so.conf"),
            vec!["/first", "/from/a", "/from/b", "/last"]
        );
    }

    #[test]
    fn test_relative_include_resolves_against_config_dir() {
        let fs = MemoryFs::new()
            .with_file_contents("/opt/etc/ld.so.conf", "include conf.d/*.conf\n")
            .with_file_contents("/opt/etc/conf.d/x.conf", "/opt/x/lib\n");
        assert_eq!(parse(fs, "/opt/etc/ld.so.conf"), vec!["/opt/x/lib"]);
    }

    #[test]
    fn test_include_cycle_terminates() {
        let fs = MemoryFs::new()
            .with_file_contents("/etc/ld.so.conf", "/a\ninclude /etc/ld.so.conf\n");
        assert_eq!(parse(fs, "/etc/ld.so.conf"), vec!["/a"]);
    }

    #[test]
    fn test_missing_file_contributes_nothing() {
        assert!(parse(MemoryFs::new(), "/etc/ld.so.conf").is_empty());
    }

    #[test]
    fn test_include_target() {
        assert_eq!(include_target("include  /etc/*.conf"), Some("/etc/*.conf"));
        assert_eq!(include_target("includes/lib"), None);
        assert_eq!(include_target("include"), None);
    }
}
