//! Contract-size validation for order amounts.
//!
//! Amounts are floats, so an exact `amount % contract_size == 0` check would
//! reject values like `0.3` for a `0.1` contract. The check is done in
//! contract units instead: `amount / contract_size` must lie within
//! `max(1e-9, 4 × EPSILON × contracts)` of a whole number. The bound is
//! measured in contracts, so it stays far below half a contract for any
//! amount under ~5e14 contracts.

use crate::error::ValidationError;

/// Contract size used when none is configured.
pub const DEFAULT_CONTRACT_SIZE: f64 = 10.0;

/// Smallest accepted deviation from a whole contract count.
const CONTRACT_TOLERANCE: f64 = 1e-9;

/// Rounding error allowance of the division, in ulps of the contract count.
const DIVISION_ULPS: f64 = 4.0;

/// Checks that amounts are whole multiples of a contract size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountValidator {
    contract_size: f64,
    allow_zero: bool,
}

impl Default for AmountValidator {
    fn default() -> Self {
        Self {
            contract_size: DEFAULT_CONTRACT_SIZE,
            allow_zero: false,
        }
    }
}

impl AmountValidator {
    pub fn new(contract_size: f64) -> Result<Self, ValidationError> {
        if !contract_size.is_finite() || contract_size <= 0.0 {
            return Err(ValidationError::InvalidContractSize(contract_size));
        }
        Ok(Self {
            contract_size,
            allow_zero: false,
        })
    }

    /// Accept `0` as a valid amount. Rejected by default.
    pub fn allow_zero(mut self, allow: bool) -> Self {
        self.allow_zero = allow;
        self
    }

    pub fn contract_size(&self) -> f64 {
        self.contract_size
    }

    pub fn validate(&self, amount: f64) -> Result<f64, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount(amount));
        }
        if amount < 0.0 {
            return Err(ValidationError::NegativeAmount(amount));
        }
        if amount == 0.0 {
            return if self.allow_zero {
                Ok(0.0)
            } else {
                Err(ValidationError::ZeroAmount)
            };
        }

        let contracts = amount / self.contract_size;
        let tolerance = CONTRACT_TOLERANCE.max(DIVISION_ULPS * f64::EPSILON * contracts);
        if (contracts - contracts.round()).abs() <= tolerance {
            Ok(amount)
        } else {
            Err(ValidationError::AmountNotMultipleOfContractSize {
                amount,
                contract_size: self.contract_size,
            })
        }
    }
}

/// Validate `amount` against `contract_size` with zero rejected.
pub fn validate_amount(amount: f64, contract_size: f64) -> Result<f64, ValidationError> {
    AmountValidator::new(contract_size)?.validate(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiples_pass() {
        let v = AmountValidator::default();
        assert_eq!(v.validate(10.0), Ok(10.0));
        assert_eq!(v.validate(250.0), Ok(250.0));
    }

    #[test]
    fn test_non_multiple_fails() {
        let v = AmountValidator::default();
        assert_eq!(
            v.validate(15.0),
            Err(ValidationError::AmountNotMultipleOfContractSize {
                amount: 15.0,
                contract_size: 10.0
            })
        );
        assert!(v.validate(5.0).is_err());
        assert!(v.validate(9.99999).is_err());
    }

    #[test]
    fn test_float_noise_within_tolerance() {
        let v = AmountValidator::default();
        let noisy = 0.1 * 3.0 * 100.0; // 30.000000000000004
        assert!(v.validate(noisy).is_ok());

        let fractional = AmountValidator::new(0.1).unwrap();
        assert!(fractional.validate(0.3).is_ok());
        assert!(fractional.validate(0.7).is_ok());
        assert!(fractional.validate(0.35).is_err());
    }

    #[test]
    fn test_large_non_multiples_fail() {
        let v = AmountValidator::default();
        assert!(v.validate(10_000_000_005.0).is_err());
        assert!(v.validate(5_000_000_005.0).is_err());
        assert_eq!(v.validate(10_000_000_000.0), Ok(10_000_000_000.0));

        let fractional = AmountValidator::new(0.1).unwrap();
        assert!(fractional.validate(100_000_000.05).is_err());
        assert!(fractional.validate(100_000_000.0).is_ok());
        assert!(fractional.validate(123_456_789.1).is_ok());
    }

    #[test]
    fn test_zero_rejected_unless_allowed() {
        let v = AmountValidator::default();
        assert_eq!(v.validate(0.0), Err(ValidationError::ZeroAmount));
        assert_eq!(v.allow_zero(true).validate(0.0), Ok(0.0));
    }

    #[test]
    fn test_negative_and_non_finite_rejected() {
        let v = AmountValidator::default();
        assert_eq!(v.validate(-10.0), Err(ValidationError::NegativeAmount(-10.0)));
        assert!(matches!(
            v.validate(f64::NAN),
            Err(ValidationError::NonFiniteAmount(_))
        ));
        assert!(matches!(
            v.validate(f64::INFINITY),
            Err(ValidationError::NonFiniteAmount(_))
        ));
    }

    #[test]
    fn test_invalid_contract_size() {
        assert!(AmountValidator::new(0.0).is_err());
        assert!(AmountValidator::new(-1.0).is_err());
        assert!(validate_amount(20.0, f64::NAN).is_err());
        assert_eq!(validate_amount(20.0, 10.0), Ok(20.0));
    }
}
