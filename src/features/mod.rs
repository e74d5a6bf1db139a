// features are composed into the app router in main.rs
pub mod archive;
pub mod reindex;
pub mod watcher;
