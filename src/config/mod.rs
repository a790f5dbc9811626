mod settings;

pub use settings::GameSettings;
