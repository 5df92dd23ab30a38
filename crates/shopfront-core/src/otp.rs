//! One-time-password entry: a row of single-digit cells.
//!
//! Only the first cell starts enabled. Typing a digit unlocks and focuses
//! the next cell; backspace locks everything from the current cell on and
//! steps focus back.

use crate::app_config::AppConfig;
use crate::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpCell {
    pub value: String,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct OtpInput {
    cells: Vec<OtpCell>,
    focus: usize,
}

impl OtpInput {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidOtpLength`] if `len` is zero.
    pub fn new(len: usize) -> Result<Self, CoreError> {
        if len == 0 {
            return Err(CoreError::InvalidOtpLength);
        }
        let mut cells = vec![OtpCell::default(); len];
        cells[0].enabled = true;
        Ok(Self { cells, focus: 0 })
    }

    /// Cells sized by the configured OTP length.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidOtpLength`] if the length is zero.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        Self::new(config.otp_length)
    }

    #[must_use]
    pub fn cells(&self) -> &[OtpCell] {
        &self.cells
    }

    #[must_use]
    pub fn focused(&self) -> usize {
        self.focus
    }

    /// Applies `text` as the new content of cell `index`.
    ///
    /// More than one character clears the cell. Non-digits are ignored.
    /// Disabled or out-of-range cells are left alone.
    pub fn input(&mut self, index: usize, text: &str) {
        let Some(cell) = self.cells.get_mut(index) else {
            return;
        };
        if !cell.enabled {
            return;
        }
        if text.chars().count() > 1 {
            cell.value.clear();
            return;
        }
        if !text.chars().all(|c| c.is_ascii_digit()) {
            return;
        }
        cell.value = text.to_owned();
        self.focus = index;

        if cell.value.is_empty() {
            return;
        }
        if let Some(next) = self.cells.get_mut(index + 1) {
            next.enabled = true;
            self.focus = index + 1;
        }
    }

    /// Backspace in cell `index`: clears it; if there is a previous cell,
    /// clears and disables this cell and every later one, then focuses the
    /// previous cell.
    pub fn backspace(&mut self, index: usize) {
        if index >= self.cells.len() || !self.cells[index].enabled {
            return;
        }
        self.cells[index].value.clear();
        if index == 0 {
            self.focus = 0;
            return;
        }
        for cell in &mut self.cells[index..] {
            cell.value.clear();
            cell.enabled = false;
        }
        self.focus = index - 1;
    }

    /// Concatenation of every cell, in order.
    #[must_use]
    pub fn combined(&self) -> String {
        self.cells.iter().map(|c| c.value.as_str()).collect()
    }

    /// `true` once every cell holds a digit; drives the verify button.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| !c.value.is_empty())
    }

    /// One character per cell: the digit, `_` for an empty enabled cell and
    /// `.` for a locked one.
    #[must_use]
    pub fn render(&self) -> String {
        self.cells
            .iter()
            .map(|c| match (c.value.as_str(), c.enabled) {
                ("", true) => "_",
                ("", false) => ".",
                (digit, _) => digit,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn reset(&mut self) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            cell.value.clear();
            cell.enabled = i == 0;
        }
        self.focus = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_code(otp: &mut OtpInput, code: &str) {
        for (i, ch) in code.chars().enumerate() {
            otp.input(i, &ch.to_string());
        }
    }

    #[test]
    fn renders_cell_states() {
        let mut otp = OtpInput::new(4).unwrap();
        otp.input(0, "7");
        assert_eq!(otp.render(), "7 _ . .");
    }

    #[test]
    fn rejects_zero_length() {
        assert_eq!(OtpInput::new(0).unwrap_err(), CoreError::InvalidOtpLength);
    }

    #[test]
    fn only_first_cell_enabled_initially() {
        let otp = OtpInput::new(4).unwrap();
        let enabled: Vec<bool> = otp.cells().iter().map(|c| c.enabled).collect();
        assert_eq!(enabled, vec![true, false, false, false]);
        assert_eq!(otp.focused(), 0);
    }

    #[test]
    fn typing_advances_and_completes() {
        let mut otp = OtpInput::new(4).unwrap();
        otp.input(0, "1");
        assert!(otp.cells()[1].enabled);
        assert_eq!(otp.focused(), 1);
        assert!(!otp.is_complete());

        otp.input(1, "2");
        otp.input(2, "3");
        otp.input(3, "4");
        assert!(otp.is_complete());
        assert_eq!(otp.combined(), "1234");
        assert_eq!(otp.focused(), 3);
    }

    #[test]
    fn multi_character_input_clears_cell() {
        let mut otp = OtpInput::new(4).unwrap();
        otp.input(0, "5");
        otp.input(0, "56");
        assert_eq!(otp.cells()[0].value, "");
        assert!(!otp.is_complete());
    }

    #[test]
    fn disabled_cells_ignore_input() {
        let mut otp = OtpInput::new(4).unwrap();
        otp.input(2, "9");
        assert_eq!(otp.combined(), "");
    }

    #[test]
    fn non_digits_are_ignored() {
        let mut otp = OtpInput::new(4).unwrap();
        otp.input(0, "x");
        assert_eq!(otp.combined(), "");
        assert!(!otp.cells()[1].enabled);
    }

    #[test]
    fn backspace_rolls_back_later_cells() {
        let mut otp = OtpInput::new(6).unwrap();
        type_code(&mut otp, "1234");
        otp.backspace(2);
        assert_eq!(otp.combined(), "12");
        assert_eq!(otp.focused(), 1);
        assert!(otp.cells()[1].enabled);
        assert!(otp.cells()[2..].iter().all(|c| !c.enabled && c.value.is_empty()));
    }

    #[test]
    fn backspace_on_first_cell_only_clears_it() {
        let mut otp = OtpInput::new(3).unwrap();
        otp.input(0, "7");
        otp.backspace(0);
        assert_eq!(otp.combined(), "");
        assert!(otp.cells()[0].enabled);
        assert_eq!(otp.focused(), 0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut otp = OtpInput::new(3).unwrap();
        type_code(&mut otp, "123");
        otp.reset();
        assert_eq!(otp.combined(), "");
        assert!(otp.cells()[0].enabled);
        assert!(!otp.cells()[1].enabled);
    }
}
