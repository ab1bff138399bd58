pub mod client;
pub mod collection;
pub mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod transport;
pub mod watch;
