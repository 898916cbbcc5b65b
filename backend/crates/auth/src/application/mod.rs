//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod confirm_email;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod send_activation_email;
pub mod service;

// Re-exports
pub use authenticate::{AuthenticateUseCase, AuthenticatedUser};
pub use config::AuthConfig;
pub use confirm_email::ConfirmEmailUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh::RefreshUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use send_activation_email::SendActivationEmailUseCase;
pub use service::AuthService;
