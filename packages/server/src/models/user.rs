use common::user::{CreateUserRequest, LoginRequest};

use crate::error::AppError;

pub fn validate_create_user(payload: &CreateUserRequest) -> Result<(), AppError> {
    let username = payload.username.trim();
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(AppError::Validation(
            "Username must be 3-32 characters".into(),
        ));
    }
    if payload.name.trim().chars().count() > 128 {
        return Err(AppError::Validation(
            "Name must be at most 128 characters".into(),
        ));
    }
    let password_len = payload.password.chars().count();
    if !(3..=128).contains(&password_len) {
        return Err(AppError::Validation(
            "Password must be 3-128 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}
