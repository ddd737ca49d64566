pub mod audit;
pub mod encode;
pub mod error;
pub mod limits;
pub mod rpc;
pub mod settle;
pub mod solver;

#[cfg(test)]
pub(crate) mod test_support;
