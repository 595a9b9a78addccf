//! Software override through the environment
//!
//! Runs as its own test binary so the variable is set before this process
//! binds a calculator. Keep a single test here: the binding happens once.

use chunkcrc::dispatch::FORCE_SOFTWARE_ENV;
use chunkcrc::{backend, calculator, checksum, crc32c, Backend, Crc32c};

#[test]
fn test_env_forces_software_backend() {
    std::env::set_var(FORCE_SOFTWARE_ENV, "1");

    assert_eq!(backend(), Backend::Software);
    assert_eq!(calculator().backend(), Backend::Software);
    assert_eq!(Crc32c::new().backend(), Backend::Software);

    assert_eq!(checksum(b"123456789"), 0xE3069283);
    assert_eq!(crc32c([&b"1234"[..], &b"56789"[..]]), 0xE3069283);
    assert_eq!(checksum(&[0xFFu8; 32]), 0x62A8AB43);

    // Bound once; clearing the variable changes nothing
    std::env::remove_var(FORCE_SOFTWARE_ENV);
    assert_eq!(backend(), Backend::Software);
}
