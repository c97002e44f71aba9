pub mod store;

pub use store::NotebookStore;
