//! Route paths.

/// Plain-text banner.
pub const GET_ROOT: &str = "/";

/// Prefix of the REST API.
pub const API_PREFIX: &str = "/rest";

pub const POST_AUTH_LOGIN: &str = "/rest/auth/login";
pub const POST_AUTH_REGISTER: &str = "/rest/auth/register";

// Protected.
pub const GET_API_WELCOME: &str = "/rest";
pub const GET_API_ME: &str = "/rest/me";
