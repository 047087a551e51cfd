// Unit tests for error mapping - pure domain logic without HTTP
use actix_web::ResponseError;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let de = DomainError::validation(ValidationKind::InvalidSettings, "max_points must be > 0");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);
    assert_eq!(app.to_string(), "Validation error: max_points must be > 0");
}

#[test]
fn maps_conflicts() {
    let full = DomainError::conflict(ConflictKind::LobbyFull, "lobby is full");
    let app: AppError = full.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Lobby, "no lobby");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn problem_details_response_has_json_content_type() {
    let app = AppError::bad_request("missing cookie");
    let resp = app.error_response();
    assert_eq!(resp.status().as_u16(), 400);
    let content_type = resp
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("application/problem+json"));
}

#[test]
fn domain_detail_strips_kind_prefix() {
    let de = DomainError::validation(ValidationKind::MustFollowSuit, "Must play the lead suit: clubs");
    assert_eq!(de.detail(), "Must play the lead suit: clubs");
    assert_eq!(de.validation_kind(), Some(ValidationKind::MustFollowSuit));
    assert!(de.to_string().contains("MustFollowSuit"));
}
