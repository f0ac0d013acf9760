pub mod composer;
pub mod di;
pub mod state;
