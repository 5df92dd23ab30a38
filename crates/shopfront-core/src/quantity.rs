/// Plus/minus quantity control on the product page. Never drops below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    value: u32,
}

impl QuantityStepper {
    pub const MIN: u32 = 1;

    #[must_use]
    pub fn new(initial: u32) -> Self {
        Self {
            value: initial.max(Self::MIN),
        }
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.value
    }

    pub fn increment(&mut self) -> u32 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    pub fn decrement(&mut self) -> u32 {
        if self.value > Self::MIN {
            self.value -= 1;
        }
        self.value
    }

    pub fn set(&mut self, value: u32) -> u32 {
        self.value = value.max(Self::MIN);
        self.value
    }
}

impl Default for QuantityStepper {
    fn default() -> Self {
        Self::new(Self::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_up_and_down() {
        let mut q = QuantityStepper::default();
        assert_eq!(q.increment(), 2);
        assert_eq!(q.increment(), 3);
        assert_eq!(q.decrement(), 2);
    }

    #[test]
    fn never_drops_below_one() {
        let mut q = QuantityStepper::new(0);
        assert_eq!(q.value(), 1);
        assert_eq!(q.decrement(), 1);
        assert_eq!(q.set(0), 1);
    }
}
