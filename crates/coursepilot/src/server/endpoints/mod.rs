pub mod catalog;
pub mod professors;
pub mod status;
