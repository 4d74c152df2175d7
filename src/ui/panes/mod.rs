//! TUI pane rendering modules
//!
//! Every pane is a stateless `render_*` function over borrowed step data.
//! Scroll offsets live in [`App`](crate::ui::App) and are clamped here.
//!
//! - [`narration`]: description of the current step
//! - [`data`]: the step's data snapshot with highlighted positions
//! - [`variables`]: the step's named variables
//! - [`status`]: status bar with keybindings and playback state
//! - `formatting`: shared value formatting

mod formatting;

pub mod data;
pub mod narration;
pub mod status;
pub mod variables;

pub use data::render_data_pane;
pub use narration::render_narration_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use variables::render_variables_pane;
