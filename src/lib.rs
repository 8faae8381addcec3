pub mod binding;
pub mod carousel;
pub mod config;
pub mod events;
pub mod render;
pub mod tasks {
    pub mod carousel;
}
