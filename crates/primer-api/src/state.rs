use std::sync::Arc;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    /// Longest plaintext, in characters, accepted by `/encrypt`.
    pub max_message_chars: usize,
}

impl AppStateInner {
    pub fn new(max_message_chars: usize) -> AppState {
        Arc::new(Self { max_message_chars })
    }
}
