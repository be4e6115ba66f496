//! SIO-driven GPIO pins for the management bus
//!
//! MDC and MDIO are plain software pins. [`SioPin`] implements the
//! `embedded-hal` pin traits plus [`MdioDataPin`] so it can be handed to
//! [`BitBangMdio`](crate::hal::mdio::BitBangMdio).

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::hal::mdio::MdioDataPin;
use crate::internal::register::io_bank0::{FUNCSEL_SIO, IoBank0};
use crate::internal::register::pads::PadsBank0;
use crate::internal::register::sio::SioRegs;

/// A GPIO owned by the driver and driven through SIO
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SioPin {
    pin: u8,
}

impl SioPin {
    /// Claim `pin` for SIO with the output latch low.
    ///
    /// The driver is enabled only for `output` pins. Only reachable through
    /// [`Rp2040Rmii::new`](super::Rp2040Rmii::new), which owns the pin
    /// assignment.
    pub(crate) fn claim(pin: u8, output: bool) -> Self {
        let this = Self { pin };
        SioRegs::clear_gpio_out(this.mask());
        if output {
            SioRegs::set_gpio_oe(this.mask());
        } else {
            SioRegs::clear_gpio_oe(this.mask());
        }
        PadsBank0::enable_pin(pin);
        IoBank0::set_function(pin, FUNCSEL_SIO);
        this
    }

    /// GPIO number
    pub const fn pin(&self) -> u8 {
        self.pin
    }

    #[inline(always)]
    const fn mask(&self) -> u32 {
        1 << self.pin
    }
}

impl ErrorType for SioPin {
    type Error = Infallible;
}

impl OutputPin for SioPin {
    #[inline(always)]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        SioRegs::clear_gpio_out(self.mask());
        Ok(())
    }

    #[inline(always)]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        SioRegs::set_gpio_out(self.mask());
        Ok(())
    }
}

impl InputPin for SioPin {
    #[inline(always)]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(SioRegs::gpio_in() & self.mask() != 0)
    }

    #[inline(always)]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(SioRegs::gpio_in() & self.mask() == 0)
    }
}

impl MdioDataPin for SioPin {
    #[inline(always)]
    fn drive(&mut self) -> Result<(), Self::Error> {
        SioRegs::set_gpio_oe(self.mask());
        Ok(())
    }

    #[inline(always)]
    fn release(&mut self) -> Result<(), Self::Error> {
        SioRegs::clear_gpio_oe(self.mask());
        Ok(())
    }
}
