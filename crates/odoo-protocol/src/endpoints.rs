//! Endpoint paths of the Odoo web session API.
//!
//! Every endpoint accepts a POST with a [`RpcRequest`](crate::RpcRequest)
//! body; the path selects the operation, `params` carries its payload.

/// Session authentication. Params: `{db, login, password}`.
pub const AUTHENTICATE: &str = "/web/session/authenticate";

/// Session logout. Params: `{}`; callers treat the response as best-effort.
pub const DESTROY: &str = "/web/session/destroy";

/// Generic model-method invocation. Params: `{model, method, args, kwargs}`.
pub const CALL_KW: &str = "/web/dataset/call_kw";

/// `search_read` convenience endpoint; same shape as [`CALL_KW`] with the
/// method fixed and pagination in `kwargs`.
pub const SEARCH_READ: &str = "/web/dataset/search_read";
