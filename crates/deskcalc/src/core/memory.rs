//! Memory register (M+, M-, MR, MC)

use crate::core::operations::check_finite;
use crate::core::CalcResult;

/// Single floating-point accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryRegister {
    value: f64,
}

impl MemoryRegister {
    /// Creates a register holding 0.0
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0.0 }
    }

    /// Current value
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// register += operand; the register is left untouched on overflow
    pub fn add(&mut self, operand: f64) -> CalcResult<f64> {
        self.value = check_finite(self.value + operand)?;
        Ok(self.value)
    }

    /// register -= operand; the register is left untouched on overflow
    pub fn subtract(&mut self, operand: f64) -> CalcResult<f64> {
        self.value = check_finite(self.value - operand)?;
        Ok(self.value)
    }

    /// Returns the stored value
    #[must_use]
    pub const fn recall(&self) -> f64 {
        self.value
    }

    /// Resets to 0.0
    pub fn clear(&mut self) {
        self.value = 0.0;
    }
}
