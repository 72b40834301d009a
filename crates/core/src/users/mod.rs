//! Users module - accounts of the people sharing the boards.

mod users_model;
mod users_service;
mod users_traits;


pub use users_model::{avatar_for, Credentials, NewUser, User, UserCredentials};
pub use users_service::UserService;
pub use users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
