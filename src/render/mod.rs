pub mod renderer;

pub use renderer::{DEFAULT_CELL_WIDTH, Overlay, Renderer};
