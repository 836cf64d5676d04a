//! Domain layer of the ideation API client.
//!
//! Purpose: own the session token, the request/response contract and the
//! error taxonomy, independent of any concrete HTTP stack or storage medium.
//! Adapters plug in through [`ports`].
//!
//! Public surface:
//! - ApiGateway: the single choke point for backend traffic.
//! - ApiError: network, application, decode, request and session failures.
//! - ApiRequest / RequestBody / MultipartForm: outgoing request model.
//! - SessionToken: redacted bearer credential.
//! - resources: typed operations and DTOs per backend resource.

mod endpoint;
mod error;
mod gateway;
mod health;
pub mod ports;
mod request;
mod resource_id;
pub mod resources;
mod response;
mod session;

pub use self::endpoint::ApiBaseUrl;
pub use self::error::ApiError;
pub use self::gateway::{ApiGateway, ApiGatewayPorts};
pub use self::health::HealthStatus;
pub use self::request::{
    ApiRequest, AUTHORIZATION, CONTENT_TYPE, FormPart, FormValue, HttpMethod, JSON_CONTENT_TYPE,
    MultipartForm, RequestBody,
};
pub use self::resource_id::{ResourceId, ResourceIdError};
pub use self::session::{SessionToken, SessionTokenError};
