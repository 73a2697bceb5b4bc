// JSON body shared by every error response that carries a message
#[derive(serde::Serialize)]
pub(crate) struct ErrorMessage {
    message: &'static str,
}

impl ErrorMessage {
    pub(crate) const fn new(message: &'static str) -> Self {
        Self { message }
    }
}
