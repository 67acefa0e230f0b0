mod app;
mod colors;

pub use app::SnakeApp;
