mod renderer;

pub use renderer::{HttpRenderer, RenderOptions, RenderedPage, Renderer};
