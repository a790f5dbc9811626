mod track_renderer;

pub use track_renderer::TrackRenderer;
