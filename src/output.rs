//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;

use crate::config::ColorOption;
use std::io::IsTerminal;

/// Decides whether human output should be colored
///
/// `auto` colors only when stdout is a terminal and `NO_COLOR` is unset.
pub fn use_color(option: ColorOption) -> bool {
    match option {
        ColorOption::Always => true,
        ColorOption::Never => false,
        ColorOption::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
    }
}
