use web_sys::Storage;

pub const ACCESS_TOKEN_KEY: &str = "access_token";

pub fn local_storage() -> Result<Storage, String> {
    web_sys::window()
        .ok_or_else(|| "No window object".to_string())?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

/// Bearer token left in `localStorage` by the sign-in flow, if any.
pub fn access_token() -> Option<String> {
    local_storage()
        .ok()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.trim().is_empty())
}
