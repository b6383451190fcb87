pub mod requests;
pub mod responses;

pub use requests::{ChangePasswordRequest, LoginRequest, UpdateSettingsRequest};
pub use responses::{LoginResponse, RefreshTokenResponse, SettingsResponse};
