pub mod preprocess;
pub mod registry;
pub mod view;
