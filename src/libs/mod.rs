pub mod hit;
pub mod max_chain;
