// src/formatting/mod.rs
//! Renders Notion pages into HTML.
//!
//! Three layers, leaves first: text extraction per block, block-to-fragment
//! mapping, and page assembly.

pub mod block_renderer;
pub mod html;
pub mod text;

pub use self::block_renderer::{assemble_page, render_blocks, render_page};
pub use self::html::{block_fragment, escape_html, map_block};
pub use self::text::{extract_text, first_plain_text};
