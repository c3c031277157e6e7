pub mod detail;
pub mod event;
pub mod list;
pub mod render;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testsupport;
