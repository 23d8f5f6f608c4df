pub mod employee;
pub mod pin_credential;

pub use employee::Entity as Employee;
pub use pin_credential::Entity as PinCredential;
