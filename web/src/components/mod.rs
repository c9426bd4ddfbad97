pub mod chart;
pub mod footer;
pub mod nav;
pub mod precautions;
pub mod weather;
