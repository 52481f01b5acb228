use super::*;
use rstest::rstest;

#[rstest]
#[case::token(AppError::Unauthorized("Token invalido o expirado.".into()), 401, "UNAUTHORIZED")]
#[case::foreign_property(AppError::NotFound("Inmueble no encontrado.".into()), 404, "NOT_FOUND")]
#[case::over_allocation(AppError::Validation("allocation exceeds pending".into()), 400, "VALIDATION_ERROR")]
#[case::pool_timeout(AppError::Database("pool timed out".into()), 500, "DATABASE_ERROR")]
#[case::bucket_denied(AppError::Storage("permission denied".into()), 500, "STORAGE_ERROR")]
#[case::bad_detail(AppError::Internal("detail not serializable".into()), 500, "INTERNAL_ERROR")]
fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(err.status_code(), status);
    assert_eq!(err.error_code(), code);
    assert_eq!(err.is_server_error(), status >= 500);
}

#[test]
fn test_display_keeps_detail_for_logs() {
    let err = AppError::Database("relation \"pago_reportado_app\" does not exist".into());
    assert_eq!(
        err.to_string(),
        "Database error: relation \"pago_reportado_app\" does not exist"
    );
}

#[rstest]
#[case(AppError::Database("duplicate key value violates constraint".into()))]
#[case(AppError::Storage("s3: 403 Forbidden".into()))]
#[case(AppError::Internal("unexpected".into()))]
fn test_server_errors_are_masked(#[case] err: AppError) {
    assert_eq!(err.public_message(), "Internal server error");
}

#[test]
fn test_caller_errors_keep_their_message() {
    let err = AppError::Validation("Debe indicar al menos un pago.".into());
    assert_eq!(err.public_message(), "Debe indicar al menos un pago.");
}
