use super::{bit_fields::ObserveTx, commands, limits, registers, Nrf24Error, RF24};
use crate::{
    radio::{
        prelude::{EsbFifo, EsbPower, EsbRadio, EsbStatus},
        timing::Deadline,
    },
    Mode, StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Poll a transmission until it resolves or `deadline` runs out.
    fn wait_for_tx(
        &mut self,
        mut deadline: Deadline,
        step_us: u32,
    ) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        loop {
            if let Some(sent) = self.poll_write()? {
                return Ok(sent);
            }
            if deadline.is_expired() {
                #[cfg(feature = "defmt")]
                #[cfg(target_os = "none")]
                defmt::warn!("transmission timed out");
                self.flush_tx()?;
                self._stats.packets_lost = self._stats.packets_lost.saturating_add(1);
                return Ok(false);
            }
            deadline.wait(&mut self._delay_impl, step_us);
        }
    }
}

impl<SPI, DO, DELAY> EsbRadio for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn start_listening(&mut self) -> Result<(), Self::RadioErrorType> {
        self.enter_standby(true)?;
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._delay_impl.delay_us(limits::SETTLE_DELAY_US);
        self._mode = Mode::Receive;
        Ok(())
    }

    fn stop_listening(&mut self) -> Result<(), Self::RadioErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        if self._feature.ack_payloads() {
            // let an outgoing ACK packet finish
            self._delay_impl.delay_us(limits::SETTLE_DELAY_US);
        }
        self._mode = Mode::Standby;
        Ok(())
    }

    fn as_tx(&mut self) -> Result<(), Self::RadioErrorType> {
        self.enter_standby(false)?;
        self._mode = Mode::Transmit;
        Ok(())
    }

    fn as_standby(&mut self) -> Result<(), Self::RadioErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self.power_up(None)?;
        self._mode = Mode::Standby;
        Ok(())
    }

    fn is_rx(&self) -> bool {
        self._config_reg.is_rx()
    }

    fn mode(&self) -> Mode {
        self._mode
    }

    /// See [`EsbRadio::send()`] for implementation-agnostic detail.
    ///
    /// The outcome is polled every microsecond.
    fn send(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<bool, Self::RadioErrorType> {
        self.start_write(buf, ask_no_ack)?;
        self.wait_for_tx(
            Deadline::after_us(limits::SEND_TIMEOUT_US),
            limits::SEND_POLL_US,
        )
    }

    fn send_with_timeout(
        &mut self,
        buf: &[u8],
        ask_no_ack: bool,
        timeout_ms: u32,
    ) -> Result<bool, Self::RadioErrorType> {
        self.start_write(buf, ask_no_ack)?;
        self.wait_for_tx(Deadline::after_ms(timeout_ms), limits::BLOCKING_POLL_US)
    }

    /// See [`EsbRadio::start_write()`] for implementation-agnostic detail.
    ///
    /// With static payloads, `buf` is padded with zeros up to
    /// [`EsbPayloadLength::get_payload_length()`](fn@crate::radio::prelude::EsbPayloadLength::get_payload_length).
    /// The CE pin is pulsed for 15 microseconds, which is enough to send a
    /// single payload.
    fn start_write(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<(), Self::RadioErrorType> {
        if buf.len() > limits::MAX_PAYLOAD_LENGTH as usize {
            return Err(Nrf24Error::InvalidLength);
        }
        if self._mode != Mode::Transmit {
            self.as_tx()?;
            self._delay_impl.delay_us(limits::SETTLE_DELAY_US);
        }
        self.clear_status_flags(StatusFlags::tx_events())?;

        // to avoid resizing the given buf, self._buf is used directly
        self._buf[0] = if ask_no_ack {
            commands::W_TX_PAYLOAD_NO_ACK
        } else {
            commands::W_TX_PAYLOAD
        };
        let mut len = buf.len();
        self._buf[1..=len].copy_from_slice(buf);
        if !self._feature.dynamic_payloads() && len < self._payload_length as usize {
            let padded = self._payload_length as usize;
            self._buf[len + 1..=padded].fill(0);
            len = padded;
        }
        self.spi_transfer(len as u8 + 1)?;

        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._delay_impl.delay_us(limits::CE_PULSE_US);
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        #[cfg(feature = "defmt")]
        #[cfg(target_os = "none")]
        defmt::trace!("loaded {=usize} byte payload", len);
        Ok(())
    }

    fn poll_write(&mut self) -> Result<Option<bool>, Self::RadioErrorType> {
        self.update()?;
        let status = self._status;
        if !status.tx_ds() && !status.max_rt() {
            return Ok(None);
        }
        self.spi_read(1, registers::OBSERVE_TX)?;
        let arc = ObserveTx::from_bits(self._buf[1]).arc();
        self._stats.retransmits = self._stats.retransmits.saturating_add(arc as u32);
        if status.max_rt() {
            // the failed payload stays at the head of the TX FIFO
            self.flush_tx()?;
        }
        self.clear_status_flags(StatusFlags::tx_events())?;
        let sent = status.tx_ds();
        if sent {
            self._stats.packets_sent = self._stats.packets_sent.saturating_add(1);
        } else {
            self._stats.packets_lost = self._stats.packets_lost.saturating_add(1);
            #[cfg(feature = "defmt")]
            #[cfg(target_os = "none")]
            defmt::debug!("payload lost after {=u8} retries", arc);
        }
        Ok(Some(sent))
    }

    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType> {
        self.spi_read(1, registers::OBSERVE_TX)?;
        Ok(ObserveTx::from_bits(self._buf[1]).arc())
    }

    /// See [`EsbRadio::read()`] for implementation-agnostic detail.
    ///
    /// With static payloads, the payload's pipe is taken from the STATUS byte
    /// of the last SPI transaction, so call
    /// [`EsbFifo::available()`](fn@crate::radio::prelude::EsbFifo::available)
    /// first. A payload stays in the RX FIFO until all of it is read.
    fn read(&mut self, buf: &mut [u8], len: Option<u8>) -> Result<u8, Self::RadioErrorType> {
        let size = if self._pipes.iter().any(|pipe| pipe.dynamic_payloads) {
            self.spi_read(1, commands::R_RX_PL_WID)?;
            let width = self._buf[1];
            if width > limits::MAX_PAYLOAD_LENGTH {
                #[cfg(feature = "defmt")]
                #[cfg(target_os = "none")]
                defmt::warn!("corrupt payload width {=u8}, flushing RX FIFO", width);
                self.flush_rx()?;
                self.clear_status_flags(StatusFlags::default().with_rx_dr(true))?;
                return Ok(0);
            }
            width
        } else {
            match self._pipes.get(self._status.rx_pipe() as usize) {
                Some(pipe) => pipe.payload_length,
                None => self._payload_length,
            }
        };
        let count = size
            .min(len.unwrap_or(size))
            .min(buf.len().min(limits::MAX_PAYLOAD_LENGTH as usize) as u8);
        if count == 0 {
            return Ok(0);
        }
        self.spi_read(count, commands::R_RX_PAYLOAD)?;
        buf[..count as usize].copy_from_slice(&self._buf[1..=count as usize]);
        self.clear_status_flags(StatusFlags::default().with_rx_dr(true))?;
        self._stats.packets_received = self._stats.packets_received.saturating_add(1);
        Ok(count)
    }
}
