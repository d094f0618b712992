//! Input validation utilities
//!
//! Lengths are counted in characters, not bytes.

/// Shortest accepted username
pub const MIN_USERNAME_CHARS: usize = 3;
/// Longest accepted username
pub const MAX_USERNAME_CHARS: usize = 64;
/// Shortest accepted password
pub const MIN_PASSWORD_CHARS: usize = 6;
/// Longest accepted password
pub const MAX_PASSWORD_CHARS: usize = 128;
/// Longest item name after trimming
pub const MAX_ITEM_NAME_CHARS: usize = 40;
/// Largest quantity of a single item
pub const MAX_QUANTITY: i64 = 99;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    let length = username.chars().count();

    if length < MIN_USERNAME_CHARS {
        return Err(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_CHARS
        ));
    }

    if length > MAX_USERNAME_CHARS {
        return Err(format!(
            "Username must be at most {} characters long",
            MAX_USERNAME_CHARS
        ));
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    let length = password.chars().count();

    if length < MIN_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_CHARS
        ));
    }

    if length > MAX_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at most {} characters long",
            MAX_PASSWORD_CHARS
        ));
    }

    Ok(())
}

/// Validate an item name; callers trim first
pub fn validate_item_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Item name is required".to_string());
    }

    if name.chars().count() > MAX_ITEM_NAME_CHARS {
        return Err(format!(
            "Item name must be at most {} characters long",
            MAX_ITEM_NAME_CHARS
        ));
    }

    Ok(())
}

/// Validate an item quantity
pub fn validate_quantity(quantity: i64) -> Result<(), String> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(format!("Quantity must be between 1 and {}", MAX_QUANTITY));
    }

    Ok(())
}
