//! Node sphere and orbit scene core: layout, the connection chain, progressive edge
//! drawing and the freeze/resume orbit clock. Rendering lives in the binary.

pub mod config;
pub mod scene;

pub use config::{SceneConfig, SceneMode};
pub use scene::{ClickTarget, SceneController};
