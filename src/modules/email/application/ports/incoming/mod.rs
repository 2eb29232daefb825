pub mod activation_dispatcher;

pub use activation_dispatcher::{ActivationDispatcher, DispatchError};
