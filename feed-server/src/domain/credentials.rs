use super::error::DomainError;

const MAX_USER_ID_LEN: usize = 64;
const MAX_PASSWORD_LEN: usize = 128;

#[derive(Debug, Clone)]
pub(crate) struct LoginRequest {
    pub(crate) user_id: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let user_id = self.user_id.trim();
        if user_id.is_empty() {
            return Err(DomainError::Validation {
                field: "userId",
                message: "User ID is required",
            });
        }
        if user_id.chars().count() > MAX_USER_ID_LEN {
            return Err(DomainError::Validation {
                field: "userId",
                message: "User ID is too long",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "Password is required",
            });
        }
        if self.password.chars().count() > MAX_PASSWORD_LEN {
            return Err(DomainError::Validation {
                field: "password",
                message: "Password is too long",
            });
        }

        Ok(Self {
            user_id: user_id.to_string(),
            password: self.password,
        })
    }
}
