pub fn validate_credentials(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Enter your employee number".into());
    }
    if password.is_empty() {
        return Err("Enter your password".into());
    }
    Ok(())
}
