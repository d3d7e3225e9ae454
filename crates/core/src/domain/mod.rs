pub mod contract;
pub mod play;
pub mod recommendation;
pub mod situation;
