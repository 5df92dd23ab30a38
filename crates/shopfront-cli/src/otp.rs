//! One-time-password entry command handler.

use shopfront_core::{AppConfig, OtpInput};

/// Key that deletes the focused cell instead of typing into it.
pub(crate) const BACKSPACE_KEY: &str = "-";

/// Types `keys` into a fresh OTP input, each at the currently focused cell.
///
/// # Errors
///
/// Returns an error if the configured OTP length is zero.
pub(crate) fn replay_keys(config: &AppConfig, keys: &[String]) -> anyhow::Result<OtpInput> {
    let mut otp = OtpInput::from_config(config)?;
    for key in keys {
        let focus = otp.focused();
        if key == BACKSPACE_KEY {
            otp.backspace(focus);
        } else {
            otp.input(focus, key);
        }
    }
    Ok(otp)
}

pub(crate) fn run_otp(config: &AppConfig, keys: &[String]) -> anyhow::Result<()> {
    let otp = replay_keys(config, keys)?;
    println!("cells:  {}", otp.render());
    println!("code:   {}", otp.combined());
    println!("verify: {}", if otp.is_complete() { "enabled" } else { "disabled" });
    Ok(())
}
