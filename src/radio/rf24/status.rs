use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbStatus, Nrf24Error, RF24},
    types::{StatusFlags, StatusSnapshot},
};

use super::{bit_fields::FifoStatus, commands, registers};

impl<SPI, DO, DELAY> EsbStatus for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        let config = self._config_reg.with_irq_events(flags);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self._config_reg = config;
        Ok(())
    }

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.spi_write_byte(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)
    }

    fn update(&mut self) -> Result<(), Self::StatusErrorType> {
        self.spi_read(0, commands::NOP)
    }

    fn get_status_flags(&self) -> StatusFlags {
        self._status
    }

    /// STATUS is the first byte of every transaction, so reading FIFO_STATUS
    /// yields both registers at once.
    fn get_status(&mut self) -> Result<StatusSnapshot, Self::StatusErrorType> {
        self.spi_read(1, registers::FIFO_STATUS)?;
        let fifo = FifoStatus::from_bits(self._buf[1]);
        let status = self._status;
        Ok(StatusSnapshot {
            rx_dr: status.rx_dr(),
            tx_ds: status.tx_ds(),
            max_rt: status.max_rt(),
            rx_pipe: status.rx_pipe(),
            tx_full: status.tx_full(),
            tx_empty: fifo.tx_empty(),
            rx_full: fifo.rx_full(),
            rx_empty: fifo.rx_empty(),
        })
    }
}
