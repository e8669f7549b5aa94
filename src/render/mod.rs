//! Rendering of flow documents into Office binaries.

mod options;
pub mod docx;
pub mod pptx;

pub use docx::{render_docx, WordRenderer};
pub use options::{StyleConfig, DEFAULT_FONT, DEFAULT_FONT_SIZE};
pub use pptx::{render_pptx, SlideRenderer};
