//! Traits describing each concern of an ESB (Enhanced ShockBurst) transceiver.
//!
//! Rustc only compiles what is used, so it is convenient to import all of
//! these traits at once:
//!
//! ```
//! use nrf24::radio::prelude::*;
//! ```

use crate::types::{
    CrcLength, DataRate, FifoState, Mode, PaLevel, PipeConfig, StatusFlags, StatusSnapshot,
};

use super::RadioConfig;

/// A trait to represent manipulation of data pipes
/// for an ESB capable transceiver.
pub trait EsbPipe {
    type PipeErrorType;

    /// Open a `pipe` for receiving data while the radio is in RX mode.
    ///
    /// Up to 6 pipes can be open at once. Open all required pipes, then call
    /// [`EsbRadio::start_listening()`].
    ///
    /// ### About pipe addresses
    /// Pipes 0 and 1 store a full address of [`EsbPipe::set_address_length()`] bytes.
    /// Pipes 2 - 5 store a single byte: the last byte of `address` (within the
    /// configured address length) is written as the pipe's first on-air byte,
    /// and the remaining on-air bytes are borrowed from pipe 1.
    /// The full `address` is still cached and reported by
    /// [`EsbPipe::pipe_config()`].
    ///
    /// Changing pipe 1's address therefore changes the on-air address of pipes 2 - 5.
    ///
    /// The pipe's static payload length is set to the device-wide default
    /// (see [`EsbPayloadLength::set_payload_length()`]).
    ///
    /// Returns an error if `pipe` is not in range [0, 5] or `address` is empty.
    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Set the address used for transmitting.
    ///
    /// <div class="warning">
    ///
    /// Pipe 0's RX address is overwritten with the same `address` because
    /// ACK packets are received on pipe 0. Re-open pipe 0 afterward if it
    /// should listen on a different address.
    ///
    /// </div>
    fn open_tx_pipe(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Close a pipe from receiving data.
    ///
    /// The pipe's cached configuration is retained.
    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType>;

    /// Set the address length (applies to all pipes).
    ///
    /// The given `length` is clamped to range [3, 5].
    fn set_address_length(&mut self, length: u8) -> Result<(), Self::PipeErrorType>;

    /// Get the address length configured on the radio.
    fn get_address_length(&mut self) -> Result<u8, Self::PipeErrorType>;

    /// Read the address a `pipe` actually listens on into `address`.
    ///
    /// For pipes 2 - 5 this is the pipe's own byte followed by the upper bytes
    /// of pipe 1, as stored on the radio. Returns the number of bytes written.
    fn get_rx_address(&mut self, pipe: u8, address: &mut [u8]) -> Result<u8, Self::PipeErrorType>;

    /// Copy the cached TX address into `address`.
    ///
    /// Returns the number of bytes written.
    fn get_tx_address(&self, address: &mut [u8]) -> u8;

    /// The cached configuration of a `pipe`.
    fn pipe_config(&self, pipe: u8) -> Result<PipeConfig, Self::PipeErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's channel.
    ///
    /// Channels are 1 MHz steps above 2400 MHz. Values above 125 are clamped to 125.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;

    /// Set the radio's frequency in MHz.
    ///
    /// Only range [2400, 2525] is accepted; anything else is an error and the
    /// radio is left untouched.
    fn set_frequency(&mut self, frequency_mhz: u16) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's frequency in MHz.
    fn get_frequency(&mut self) -> Result<u16, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of [`StatusFlags`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Get the [`StatusFlags`] cached from the latest SPI transaction.
    fn get_status_flags(&self) -> StatusFlags;

    /// Configure which events drive the radio's IRQ pin.
    ///
    /// Events set to `true` in `flags` assert the IRQ pin, events set to
    /// `false` are masked. All events are enabled by default.
    fn set_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Clear the events set to `true` in `flags`.
    ///
    /// Events set to `false` are left untouched, so the IRQ pin stays asserted
    /// while any unhandled event remains.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Refresh the cached status byte with a NOP transaction.
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;

    /// Read STATUS and FIFO_STATUS into a [`StatusSnapshot`].
    fn get_status(&mut self) -> Result<StatusSnapshot, Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Discard every payload in the RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Discard every payload in the TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the TX FIFO (`about_tx` is `true`) or the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;

    /// Is there a payload ready to [`EsbRadio::read()`]?
    fn available(&mut self) -> Result<bool, Self::FifoErrorType>;

    /// Like [`EsbFifo::available()`], but yields the pipe that received the payload.
    ///
    /// ```ignore
    /// if let Some(pipe) = radio.available_pipe()? {
    ///     let len = radio.read(&mut buf, None)?;
    /// }
    /// ```
    fn available_pipe(&mut self) -> Result<Option<u8>, Self::FifoErrorType>;
}

/// A trait to represent manipulation of payload lengths (static or dynamic)
/// for an ESB capable transceiver.
pub trait EsbPayloadLength {
    type PayloadLengthErrorType;

    /// Set the static payload length of every open pipe and the default used by
    /// [`EsbPipe::open_rx_pipe()`].
    ///
    /// The given `length` is clamped to 32. Has no effect on pipes that use
    /// dynamic payloads.
    fn set_payload_length(&mut self, length: u8) -> Result<(), Self::PayloadLengthErrorType>;

    /// Set the static payload length of one `pipe`, clamped to 32.
    fn set_payload_length_pipe(
        &mut self,
        pipe: u8,
        length: u8,
    ) -> Result<(), Self::PayloadLengthErrorType>;

    /// The device-wide default static payload length.
    fn get_payload_length(&self) -> u8;

    /// The static payload length of one `pipe`.
    fn get_payload_length_pipe(&self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType>;

    /// Enable or disable dynamic payloads on all pipes.
    ///
    /// This overwrites any per-pipe setting. Disabling also disables
    /// ACK payloads, which depend on this feature.
    ///
    /// ```ignore
    /// radio.set_dynamic_payloads(true)?;
    /// if radio.available()? {
    ///     let mut payload = [0; 32];
    ///     let len = radio.read(&mut payload, None)?;
    /// }
    /// ```
    fn set_dynamic_payloads(&mut self, enable: bool) -> Result<(), Self::PayloadLengthErrorType>;

    /// Enable or disable dynamic payloads on one `pipe`.
    fn set_dynamic_payloads_pipe(
        &mut self,
        enable: bool,
        pipe: u8,
    ) -> Result<(), Self::PayloadLengthErrorType>;

    /// Is the dynamic payloads feature (FEATURE register) enabled?
    fn get_dynamic_payloads(&self) -> bool;

    /// Does one `pipe` use dynamic payloads?
    fn get_dynamic_payloads_pipe(&self, pipe: u8) -> Result<bool, Self::PayloadLengthErrorType>;

    /// Get the length of the next payload in the RX FIFO.
    ///
    /// A length above 32 means the payload is corrupt: the RX FIFO is flushed
    /// and 0 is returned.
    fn get_dynamic_payload_length(&mut self) -> Result<u8, Self::PayloadLengthErrorType>;
}

/// A trait to represent manipulation of the automatic acknowledgement feature
/// for an ESB capable transceiver.
pub trait EsbAutoAck: EsbPayloadLength {
    type AutoAckErrorType;

    /// Enable or disable payloads attached to ACK packets.
    ///
    /// Enabling also enables dynamic payloads on pipe 0, which the radio requires.
    /// Use [`EsbAutoAck::write_ack_payload()`] to queue a payload.
    fn set_ack_payloads(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Is the ACK payloads feature enabled?
    fn get_ack_payloads(&self) -> bool;

    /// Queue `buf` in the TX FIFO to be attached to the next ACK packet sent on `pipe`.
    ///
    /// Returns `false` if ACK payloads are not enabled or the TX FIFO is full.
    /// Returns an error if `pipe` is invalid or `buf` exceeds 32 bytes.
    ///
    /// <div class="warning">
    ///
    /// The ACK payload must be queued _before_ the payload it answers is received.
    ///
    /// </div>
    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<bool, Self::AutoAckErrorType>;

    /// Enable or disable auto-ack on all pipes, overwriting any per-pipe setting.
    ///
    /// Disabling also disables ACK payloads.
    fn set_auto_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Enable or disable auto-ack on one `pipe`.
    ///
    /// Disabling pipe 0 also disables ACK payloads.
    fn set_auto_ack_pipe(&mut self, enable: bool, pipe: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Is auto-ack enabled on every pipe?
    fn get_auto_ack(&self) -> bool;

    /// Is auto-ack enabled on one `pipe`?
    fn get_auto_ack_pipe(&self, pipe: u8) -> Result<bool, Self::AutoAckErrorType>;

    /// Set the auto-retry `delay` and `count`, each clamped to range [0, 15].
    ///
    /// - `delay`: wait between attempts in steps of 250 us; 0 means 250 us
    ///   and 15 means 4000 us.
    /// - `count`: attempts before giving up; 0 disables retries.
    fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Set only the auto-retry delay, clamped to 15.
    fn set_auto_retry_delay(&mut self, delay: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Set only the auto-retry count, clamped to 15.
    fn set_auto_retry_count(&mut self, count: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Get the auto-retry delay configured on the radio.
    fn get_auto_retry_delay(&mut self) -> Result<u8, Self::AutoAckErrorType>;

    /// Get the auto-retry count configured on the radio.
    fn get_auto_retry_count(&mut self) -> Result<u8, Self::AutoAckErrorType>;

    /// Allow the `ask_no_ack` parameter of [`EsbRadio::send()`] and
    /// [`EsbRadio::start_write()`] to take effect.
    fn allow_ask_no_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;
}

/// A trait to represent manipulation of the power amplitude level
/// for an ESB capable transceiver.
pub trait EsbPaLevel {
    type PaLevelErrorType;

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType>;

    /// Set the Power Amplifier level without touching the data rate bits.
    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType>;
}

/// A trait to represent manipulation of the state of power
/// for an ESB capable transceiver.
pub trait EsbPower {
    type PowerErrorType;

    /// Power down the radio. CE is driven low first.
    ///
    /// Registers stay accessible while powered down, but the radio
    /// can neither receive nor transmit.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power up the radio into standby.
    ///
    /// Waits `delay` microseconds (1500 when [`None`]) for the oscillator to
    /// stabilize. Does nothing if the radio is already powered.
    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType>;

    /// Is the radio powered up (cached)?
    fn is_powered(&self) -> bool;
}

/// A trait to represent manipulation of Cyclical Redundancy Checksums
/// for an ESB capable transceiver.
pub trait EsbCrcLength {
    type CrcLengthErrorType;

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType>;

    /// Set the CRC length.
    ///
    /// [`CrcLength::Disabled`] only clears the CRC enable bit.
    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType>;
}

/// A trait to represent manipulation of the Data Rate
/// for an ESB capable transceiver.
pub trait EsbDataRate {
    type DataRateErrorType;

    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType>;

    /// Set the data rate without touching the PA level bits.
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType>;
}

/// A trait to represent debug output
/// for an ESB capable transceiver.
pub trait EsbDetails {
    type DetailsErrorType;

    /// Print the radio's configuration and counters.
    ///
    /// Requires the `defmt` or `std` feature, otherwise this does nothing.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}

/// A trait to represent bring-up and bulk configuration
/// for an ESB capable transceiver.
pub trait EsbInit {
    type ConfigErrorType;

    /// Initialize the radio's hardware.
    ///
    /// - waits 5 milliseconds for the supply to settle
    /// - checks that the radio responds (see [`EsbInit::is_connected()`])
    /// - applies the defaults via [`EsbInit::reset()`]
    /// - detects the nRF24L01+ variant and unlocks its extended features
    ///
    /// Call this once after instantiating the radio.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Power down and apply [`RadioConfig::default()`].
    fn reset(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Apply every setting of `config`.
    ///
    /// The radio is left powered down; both FIFOs are flushed and all
    /// status flags cleared.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;

    /// Does the radio respond over SPI?
    ///
    /// Only the SETUP_AW register is checked: its reserved upper bits must be
    /// clear and its address width field must be non-zero.
    fn is_connected(&mut self) -> Result<bool, Self::ConfigErrorType>;
}

/// A trait to represent the operating modes and data flow
/// of an ESB capable transceiver.
pub trait EsbRadio {
    type RadioErrorType;

    /// Enter active RX mode.
    ///
    /// Conventionally called after [`EsbPipe::open_rx_pipe()`].
    fn start_listening(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Leave active RX mode for standby.
    ///
    /// Waits an extra 130 us when ACK payloads are enabled so a pending ACK
    /// can finish.
    fn stop_listening(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Enter TX mode (inactive until a payload is written).
    fn as_tx(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Enter standby: powered with CE low.
    fn as_standby(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Is the radio configured as a primary receiver?
    fn is_rx(&self) -> bool;

    /// The last mode entered.
    fn mode(&self) -> Mode;

    /// Transmit `buf` and wait for the outcome, giving up after 10 ms of
    /// polling delays (see [`EsbRadio::send_with_timeout()`]).
    ///
    /// Returns `true` if the payload was sent (and acknowledged, when auto-ack
    /// is used). A payload that exhausts its retries or outlives the deadline
    /// is flushed from the TX FIFO and `false` is returned.
    ///
    /// See [`EsbRadio::start_write()`] about `ask_no_ack`.
    fn send(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<bool, Self::RadioErrorType>;

    /// Like [`EsbRadio::send()`] but with a caller-supplied deadline.
    ///
    /// Only the delays between polls count against `timeout_ms`; the SPI
    /// transactions of each poll do not. The timeout is therefore a lower bound,
    /// and a slow bus can make this call return noticeably later.
    fn send_with_timeout(
        &mut self,
        buf: &[u8],
        ask_no_ack: bool,
        timeout_ms: u32,
    ) -> Result<bool, Self::RadioErrorType>;

    /// Load `buf` into the TX FIFO and start transmitting it, without waiting.
    ///
    /// Use [`EsbRadio::poll_write()`] to learn the outcome.
    ///
    /// If `ask_no_ack` is `true` the receiver is asked not to acknowledge this
    /// payload. This only works after [`EsbAutoAck::allow_ask_no_ack()`].
    ///
    /// Returns an error if `buf` exceeds 32 bytes.
    fn start_write(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<(), Self::RadioErrorType>;

    /// Check on a transmission started by [`EsbRadio::start_write()`].
    ///
    /// Returns [`None`] while the radio is still busy, otherwise whether the
    /// payload was sent. The outcome is counted in the statistics once.
    fn poll_write(&mut self) -> Result<Option<bool>, Self::RadioErrorType>;

    /// Get the retransmit count of the last transmission.
    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType>;

    /// Read the next payload of the RX FIFO into `buf`.
    ///
    /// The number of bytes read is the payload length (dynamic, or the pipe's
    /// static length) limited by `len` and by the length of `buf`.
    /// Returns the number of bytes read.
    fn read(&mut self, buf: &mut [u8], len: Option<u8>) -> Result<u8, Self::RadioErrorType>;
}
