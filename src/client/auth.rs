//! Authentication types for the n8n API.
//!
//! n8n only supports static API-key credentials sent via the
//! `X-N8N-API-KEY` header; `None` exists for unsecured dev servers
//! and offline tests.

pub enum Auth {
    /// Use an API key sent in the X-N8N-API-KEY header
    Apikey(String),
    /// Don't use any authentication
    None,
}

impl std::fmt::Display for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key itself
        match self {
            Self::Apikey(_) => write!(f, "Apikey"),
            Self::None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_redacts_key() {
        let auth = Auth::Apikey("super-secret".to_string());
        assert_eq!(auth.to_string(), "Apikey");
        assert_eq!(Auth::None.to_string(), "None");
    }
}
