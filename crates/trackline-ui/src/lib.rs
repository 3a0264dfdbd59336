pub mod app;
pub mod message;
pub mod widgets;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
