//! Well-known Control Change controller numbers.
//!
//! Only the controllers this crate itself builds on (the RPN/NRPN data-entry
//! quadruple) plus the handful every device responds to. Any other `u7` is still a
//! valid controller number; these constants just name the common ones.

use crate::prelude::*;

pub const BANK_SELECT: u7 = u7::new(0);
pub const MODULATION_WHEEL: u7 = u7::new(1);
pub const DATA_ENTRY_MSB: u7 = u7::new(6);
pub const VOLUME: u7 = u7::new(7);
pub const PAN: u7 = u7::new(10);
pub const EXPRESSION: u7 = u7::new(11);
pub const DATA_ENTRY_LSB: u7 = u7::new(38);
pub const SUSTAIN: u7 = u7::new(64);
pub const REVERB_SEND: u7 = u7::new(91);
pub const CHORUS_SEND: u7 = u7::new(93);
pub const NRPN_LSB: u7 = u7::new(98);
pub const NRPN_MSB: u7 = u7::new(99);
pub const RPN_LSB: u7 = u7::new(100);
pub const RPN_MSB: u7 = u7::new(101);

// Channel mode messages (controller numbers 120-127).
pub const ALL_SOUND_OFF: u7 = u7::new(120);
pub const RESET_ALL_CONTROLLERS: u7 = u7::new(121);
pub const ALL_NOTES_OFF: u7 = u7::new(123);
