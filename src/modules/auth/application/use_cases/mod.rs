pub mod activate_user;
pub mod credentials;
pub mod list_users;
pub mod login_user;
pub mod logout_user;
pub mod refresh_token;
pub mod register_user;

pub use activate_user::{ActivateUserUseCase, IActivateUserUseCase};
pub use credentials::{Credentials, CredentialsError};
pub use list_users::{IListUsersUseCase, ListUsersUseCase};
pub use login_user::{ILoginUserUseCase, LoginUserUseCase};
pub use logout_user::{ILogoutUserUseCase, LogoutUserUseCase};
pub use refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase};
pub use register_user::{IRegisterUserUseCase, RegisterUserUseCase};
