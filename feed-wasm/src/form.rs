/// Проверка формы входа до отправки запроса.
pub(crate) fn validate_login_fields(user_id: &str, password: &str) -> Result<(), &'static str> {
    if user_id.trim().is_empty() {
        return Err("User ID is required");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok(())
}
