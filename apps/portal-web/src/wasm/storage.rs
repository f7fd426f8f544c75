use portal_client_core::{TOKEN_STORAGE_KEY, TokenStore};

/// The session token under the `token` key of `window.localStorage`.
pub(super) struct LocalStorageTokenStore;

fn local_storage() -> Result<web_sys::Storage, String> {
    let window =
        web_sys::window().ok_or_else(|| "window is unavailable for token storage".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access local storage".to_string())?
        .ok_or_else(|| "local storage is unavailable".to_string())
}

impl TokenStore for LocalStorageTokenStore {
    type Error = String;

    fn load_token(&self) -> Result<Option<String>, Self::Error> {
        local_storage()?
            .get_item(TOKEN_STORAGE_KEY)
            .map_err(|_| "failed to read stored token".to_string())
    }

    fn persist_token(&self, token: &str) -> Result<(), Self::Error> {
        local_storage()?
            .set_item(TOKEN_STORAGE_KEY, token)
            .map_err(|_| "failed to persist token".to_string())
    }

    fn clear_token(&self) -> Result<(), Self::Error> {
        local_storage()?
            .remove_item(TOKEN_STORAGE_KEY)
            .map_err(|_| "failed to clear stored token".to_string())
    }
}
