use std::fmt;

use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[error("gas limit reached (available {available}, required {required})")]
pub struct GasPoolError {
    pub available: u64,
    pub required: u64,
}

/// Gas still available to the transactions of a block.
///
/// Created fresh for each block from the header's gas limit.  It only ever
/// decreases and cannot go below zero.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GasPool {
    gas: u64,
}

impl GasPool {
    pub fn new(gas: u64) -> Self {
        Self { gas }
    }

    /// Remaining gas.
    pub fn gas(&self) -> u64 {
        self.gas
    }

    /// Checks that `amount` could be drawn without drawing it.
    pub fn check(&self, amount: u64) -> Result<(), GasPoolError> {
        if amount > self.gas {
            return Err(GasPoolError {
                available: self.gas,
                required: amount,
            });
        }
        Ok(())
    }

    /// Draws `amount` from the pool.  Leaves the pool untouched on failure.
    pub fn sub_gas(&mut self, amount: u64) -> Result<(), GasPoolError> {
        self.check(amount)?;
        self.gas -= amount;
        Ok(())
    }
}

impl fmt::Display for GasPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gas)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_sub_gas() {
        let mut pool = GasPool::new(30_000);
        pool.sub_gas(21_000).unwrap();
        assert_eq!(pool.gas(), 9_000);

        let err = pool.sub_gas(21_000).unwrap_err();
        assert_eq!(
            err,
            GasPoolError {
                available: 9_000,
                required: 21_000
            }
        );
        assert_eq!(pool.gas(), 9_000);

        pool.sub_gas(9_000).unwrap();
        assert_eq!(pool.gas(), 0);
        assert_eq!(pool.to_string(), "0");
    }

    #[test]
    fn test_check_does_not_draw() {
        let pool = GasPool::new(100);
        pool.check(100).unwrap();
        assert!(pool.check(101).is_err());
        assert_eq!(pool.gas(), 100);
    }

    proptest! {
        #[test]
        fn test_pool_only_decreases(
            limit in 0u64..1_000_000,
            draws in prop::collection::vec(0u64..200_000, 0..32),
        ) {
            let mut pool = GasPool::new(limit);
            let mut drawn = 0u64;
            for amount in draws {
                let before = pool.gas();
                match pool.sub_gas(amount) {
                    Ok(()) => {
                        drawn += amount;
                        prop_assert_eq!(pool.gas(), before - amount);
                    }
                    Err(_) => {
                        prop_assert!(amount > before);
                        prop_assert_eq!(pool.gas(), before);
                    }
                }
                prop_assert!(pool.gas() <= before);
            }
            prop_assert_eq!(pool.gas() + drawn, limit);
        }
    }
}
