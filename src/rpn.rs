//! Registered and non-registered parameter number (RPN/NRPN) message builders.
//!
//! Setting a 14-bit parameter takes a fixed quadruple of Control Change messages:
//! two to select the parameter (MSB then LSB), two to set its value (Data Entry MSB
//! then LSB). These builders produce the quadruple in that order, ready for encoding.

use crate::{
    controller,
    message::{Message, MidiMessage},
    prelude::*,
};

/// A registered parameter (RPN) assignment, e.g. pitch-bend range or master tuning.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Rpn {
    /// The channel the assignment is addressed to.
    pub channel: u4,
    /// The 14-bit registered parameter number.
    pub parameter: u14,
    /// The 14-bit value to assign.
    pub value: u14,
}

impl Rpn {
    /// The four Control Change messages that perform this assignment, in send order.
    pub fn messages(&self) -> [Message; 4] {
        let (param_msb, param_lsb) = self.parameter.msb_lsb();
        let (value_msb, value_lsb) = self.value.msb_lsb();
        [
            cc(self.channel, controller::RPN_MSB, param_msb),
            cc(self.channel, controller::RPN_LSB, param_lsb),
            cc(self.channel, controller::DATA_ENTRY_MSB, value_msb),
            cc(self.channel, controller::DATA_ENTRY_LSB, value_lsb),
        ]
    }

    /// Like [`messages`](#method.messages), but sends only the Data Entry MSB,
    /// carrying the low 7 bits of `value`. Some devices treat the parameter as 7-bit
    /// and ignore (or misinterpret) the LSB.
    pub fn messages_msb_only(&self) -> [Message; 3] {
        let (param_msb, param_lsb) = self.parameter.msb_lsb();
        [
            cc(self.channel, controller::RPN_MSB, param_msb),
            cc(self.channel, controller::RPN_LSB, param_lsb),
            cc(
                self.channel,
                controller::DATA_ENTRY_MSB,
                u7::from_int_lossy(self.value.as_int() as u8),
            ),
        ]
    }
}

/// A non-registered parameter (NRPN) assignment, for device-specific parameters.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Nrpn {
    /// The channel the assignment is addressed to.
    pub channel: u4,
    /// The 14-bit non-registered parameter number.
    pub parameter: u14,
    /// The 14-bit value to assign.
    pub value: u14,
}

impl Nrpn {
    /// The four Control Change messages that perform this assignment, in send order.
    pub fn messages(&self) -> [Message; 4] {
        let (param_msb, param_lsb) = self.parameter.msb_lsb();
        let (value_msb, value_lsb) = self.value.msb_lsb();
        [
            cc(self.channel, controller::NRPN_MSB, param_msb),
            cc(self.channel, controller::NRPN_LSB, param_lsb),
            cc(self.channel, controller::DATA_ENTRY_MSB, value_msb),
            cc(self.channel, controller::DATA_ENTRY_LSB, value_lsb),
        ]
    }

    /// Like [`messages`](#method.messages), but sends only the Data Entry MSB,
    /// carrying the low 7 bits of `value`.
    pub fn messages_msb_only(&self) -> [Message; 3] {
        let (param_msb, param_lsb) = self.parameter.msb_lsb();
        [
            cc(self.channel, controller::NRPN_MSB, param_msb),
            cc(self.channel, controller::NRPN_LSB, param_lsb),
            cc(
                self.channel,
                controller::DATA_ENTRY_MSB,
                u7::from_int_lossy(self.value.as_int() as u8),
            ),
        ]
    }
}

fn cc(channel: u4, controller: u7, value: u7) -> Message {
    Message::Channel {
        channel,
        message: MidiMessage::Controller { controller, value },
    }
}
