//! Integration Tests für den Output Controller
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockOutputPin

mod common;

use common::MockOutputPin;
use esp_core::{OutputController, OutputError, OutputPin};

// ============================================================================
// Tests: MockOutputPin
// ============================================================================

#[test]
fn test_mock_output_pin_write() {
    let mut mock = MockOutputPin::new();

    assert_eq!(mock.write_count, 0);
    assert_eq!(mock.level, None);

    mock.set_level(true).unwrap();

    assert_eq!(mock.write_count, 1);
    assert_eq!(mock.level, Some(true));
}

#[test]
fn test_mock_output_pin_recovers_after_fail() {
    let mut mock = MockOutputPin::new();
    mock.fail_next_write = true;

    // Erster Write schlägt fehl
    assert_eq!(mock.set_level(true), Err(OutputError::WriteFailed));
    assert_eq!(mock.level, None);

    // Zweiter Write klappt
    assert!(mock.set_level(false).is_ok());
    assert_eq!(mock.write_count, 1);
    assert_eq!(mock.level, Some(false));
}

// ============================================================================
// Tests: OutputController
// ============================================================================

#[test]
fn test_initialize_configures_output() {
    let controller = OutputController::initialize(MockOutputPin::new()).unwrap();
    let pin = controller.into_inner();

    assert!(pin.configured);
    assert_eq!(pin.write_count, 0);
}

#[test]
fn test_initialize_failure_is_returned() {
    let mut pin = MockOutputPin::new();
    pin.fail_configure = true;

    let result = OutputController::initialize(pin);
    assert!(matches!(result, Err(OutputError::ConfigureFailed)));
}

#[test]
fn test_set_output_toggles() {
    let mut controller = OutputController::initialize(MockOutputPin::new()).unwrap();

    controller.set_output(true).unwrap();
    controller.set_output(false).unwrap();
    controller.set_output(true).unwrap();

    let pin = controller.into_inner();
    assert_eq!(pin.level, Some(true));
    assert_eq!(pin.write_count, 3);
}

#[test]
fn test_set_output_propagates_failure() {
    let mut pin = MockOutputPin::new();
    pin.fail_next_write = true;
    let mut controller = OutputController::initialize(pin).unwrap();

    assert_eq!(controller.set_output(true), Err(OutputError::WriteFailed));
    assert_eq!(controller.into_inner().level, None);
}
