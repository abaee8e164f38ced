//! Custom Extractors
//!
//! Axum extractors for the authenticated user and the client address, plus
//! `Json`/`Query`/`Path` wrappers that reject with [`AppError`].

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequest, FromRequestParts},
    http::request::Parts,
};

use crate::domain::User;
use crate::shared::error::{AppError, ErrorName};

/// JSON body whose parse failures render as `REQUEST_BODY_INVALID`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string whose parse failures render as `QUERY_INVALID`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameters whose parse failures render as `PATH_INVALID`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// The user resolved by `auth_middleware`.
#[derive(Debug, Clone)]
pub struct RequestingUser(pub User);

impl<S> FromRequestParts<S> for RequestingUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(RequestingUser)
            .ok_or_else(|| {
                AppError::unauthorized(ErrorName::AccessTokenMissing, "Access token is missing")
            })
    }
}

/// Client address recorded on sessions.
///
/// Taken from the first `X-Forwarded-For` hop, then `X-Real-IP`, then the
/// peer address. Header values must parse as an IP address, optionally with a
/// port; the port is dropped and the address is stored in canonical form.
#[derive(Debug, Clone, Default)]
pub struct ClientIp(pub Option<String>);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

fn parse_ip(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    value
        .parse::<IpAddr>()
        .ok()
        .or_else(|| value.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = header(parts, "x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .and_then(parse_ip)
            .or_else(|| header(parts, "x-real-ip").and_then(parse_ip))
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip())
            });

        Ok(ClientIp(ip.map(|ip| ip.to_string())))
    }
}
