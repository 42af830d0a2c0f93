#[derive(Debug, thiserror::Error)]
pub enum StormGlassError {
    /// Something broke before a StormGlass response could be obtained
    /// (connect failure, DNS, timeout, or an unreadable body).
    #[error("Unexpected error when trying to communicate to StormGlass: {0}")]
    Request(String),
    /// StormGlass was reached and answered with a non-success status.
    #[error("Unexpected error returned by the StormGlass service: Error: {body} Code: {status}")]
    Response { status: u16, body: String },
}
