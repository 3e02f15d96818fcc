pub mod catalog;
pub mod progress;
pub mod run;
pub mod tenant;
