/// Identity of an authenticated caller, attached to the request by the JWT middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    /// Raw bearer token, forwarded to services that authenticate the same caller.
    pub cookie: String,
}
