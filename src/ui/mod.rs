pub mod renderer;

pub use renderer::TextRenderer;
