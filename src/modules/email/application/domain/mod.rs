pub mod entities;

pub use entities::ActivationMail;
