use inflow_forecast::{ErrorMarker, ForecastError};
use std::io;
use var_math::MathError;

#[test]
fn test_error_conversion() {
    // Test IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::Io(_)));

    // Numerical errors keep their message
    let math_error = MathError::Singular("zero pivot".to_string());
    let forecast_error = ForecastError::from(math_error);
    assert!(matches!(forecast_error, ForecastError::Math(_)));
    assert!(forecast_error.to_string().contains("zero pivot"));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InsufficientData { needed: 15, got: 10 };
    assert_eq!(
        error.to_string(),
        "Insufficient data: need at least 15 valid rows, got 10"
    );

    let error = ForecastError::ModelFit("design matrix has rank zero".to_string());
    assert!(error.to_string().starts_with("Model fit failure"));
}

#[test]
fn test_only_loader_errors_have_markers() {
    assert_eq!(
        ForecastError::DataUnavailable("gone".to_string()).marker(),
        Some(ErrorMarker::DataMissing)
    );
    assert_eq!(
        ForecastError::InsufficientData { needed: 15, got: 3 }.marker(),
        Some(ErrorMarker::InsufficientData)
    );
    assert_eq!(ForecastError::ModelFit("x".to_string()).marker(), None);
    assert_eq!(ForecastError::InvalidParameter("x".to_string()).marker(), None);
}

#[test]
fn test_marker_text() {
    assert_eq!(ErrorMarker::DataMissing.to_string(), "Data Missing");
    assert_eq!(ErrorMarker::InsufficientData.to_string(), "Insufficient Data");
}
