use env_flags::env_flags;

env_flags! {
    /// Base URL of the Inklet backend API. The default matches a local
    /// development backend.
    pub INKLET_API_BASE_URL: &str = "http://localhost:3001/api";
}
