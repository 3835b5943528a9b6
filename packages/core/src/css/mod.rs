//! CSS Formatting Engine
//!
//! - [`format_property`] - structured value → CSS value text
//! - [`generate_class_css`] / [`generate_css_from_tree`] - rule bodies per class
//! - [`render_stylesheet`] - complete stylesheet text

mod format;
mod stylesheet;

pub use format::format_property;
pub use stylesheet::{generate_class_css, generate_css_from_tree, render_stylesheet, ClassCss};
