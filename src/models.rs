use serde::{Deserialize, Serialize};

/// JWT payload issued by the account service.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin (tenant) id for admin tokens, user id otherwise
    pub user_id: i64,
    pub sub: String,
    pub role: u8,        // role id
    pub exp: usize,
    pub jti: String,

    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
