pub mod assets;
pub mod config;
pub mod events;
pub mod gallery;
pub mod tasks {
    pub mod input;
    pub mod renderer;
}
