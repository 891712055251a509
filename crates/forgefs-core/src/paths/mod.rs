//! Path string helpers shared by every engine component.
//!
//! All engine paths are `/`-separated strings. Backslashes are folded into
//! forward slashes by [`normalize`], so masks written on Windows behave the
//! same as masks written anywhere else.
//!
//! # Design
//!
//! - Pure string manipulation, no filesystem access
//! - `""` means "the current directory" everywhere inside the engine
//! - Wildcard compilation lives in [`wildcard`] and only understands `*` and `**`

mod normalize;
mod wildcard;

pub use normalize::{directory_of, is_absolute, join, normalize, split_path_list};
pub(crate) use normalize::is_drive;
pub use wildcard::{static_prefix, wildcards};

/// Separator used between entries of a path-list environment variable.
pub const fn path_list_separator(windows: bool) -> char {
    if windows { ';' } else { ':' }
}
