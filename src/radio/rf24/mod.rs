use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
mod auto_ack;
pub(crate) mod bit_fields;
mod channel;
mod init;
use bit_fields::{Config, Feature, ObserveTx, RfSetup};
mod constants;
mod crc_length;
mod data_rate;
mod fifo;
mod pa_level;
mod payload_length;
mod pipe;
mod power;
mod radio;
pub use constants::{commands, limits, mnemonics, registers};
mod details;
mod stats;
mod status;
use super::{prelude::EsbRadio, RadioConfig};
use crate::{Mode, PipeConfig, Statistics, StatusFlags};

/// A collection of error types to describe hardware malfunctions
/// and rejected arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO)
    BinaryCorruption,
    /// The radio did not respond during [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init).
    NotConnected,
    /// A pipe number outside range [0, 5].
    InvalidPipe,
    /// A payload longer than 32 bytes, or an empty address.
    InvalidLength,
    /// A frequency outside range [2400, 2525] MHz.
    InvalidFrequency,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl<SPI, DO> defmt::Format for Nrf24Error<SPI, DO> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24Error::Spi(_) => defmt::write!(fmt, "SPI transaction failed"),
            Nrf24Error::Gpo(_) => defmt::write!(fmt, "CE pin failed"),
            Nrf24Error::BinaryCorruption => defmt::write!(fmt, "corrupted register value"),
            Nrf24Error::NotConnected => defmt::write!(fmt, "radio not connected"),
            Nrf24Error::InvalidPipe => defmt::write!(fmt, "invalid pipe"),
            Nrf24Error::InvalidLength => defmt::write!(fmt, "invalid length"),
            Nrf24Error::InvalidFrequency => defmt::write!(fmt, "invalid frequency"),
        }
    }
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// Additionally, there are some functions implemented that are specific to the nRF24L01.
pub struct RF24<SPI, DO, DELAY> {
    _spi: SPI,
    /// The CE pin for the radio.
    ///
    /// This really only exposed for advanced manipulation of active TX mode.
    /// It is strongly recommended to change modes using
    /// [`RF24::start_listening()`](fn@crate::radio::prelude::EsbRadio::start_listening)
    /// and [`RF24::as_tx()`](fn@crate::radio::prelude::EsbRadio::as_tx) because those
    /// methods keep [`RF24::mode()`](fn@crate::radio::prelude::EsbRadio::mode) in sync.
    pub ce_pin: DO,
    _delay_impl: DELAY,
    _buf: [u8; 33],
    _status: StatusFlags,
    _config_reg: Config,
    _feature: Feature,
    _channel: u8,
    _address_length: u8,
    _tx_address: [u8; 5],
    _pipes: [PipeConfig; 6],
    _payload_length: u8,
    _mode: Mode,
    _stats: Statistics,
    _is_plus_variant: bool,
}

impl<SPI, DO, DELAY> RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`RF24`] object for use on the specified
    /// `spi` bus with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    ///
    /// No bus traffic happens here; the driver assumes the radio is powered
    /// down with its reset values until [`init()`](fn@crate::radio::prelude::EsbInit::init)
    /// is called.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> RF24<SPI, DO, DELAY> {
        let mut radio = RF24 {
            ce_pin,
            _spi: spi,
            _delay_impl: delay_impl,
            _status: StatusFlags::from_bits(0),
            _buf: [0u8; 33],
            _config_reg: Config::default(),
            _feature: Feature::default(),
            _channel: 2,
            _address_length: 5,
            _tx_address: [0xE7; 5],
            _pipes: [PipeConfig::with_address([0xE7; 5], false); 6],
            _payload_length: limits::MAX_PAYLOAD_LENGTH,
            _mode: Mode::PowerDown,
            _stats: Statistics::default(),
            _is_plus_variant: true,
        };
        radio.cache_config(&RadioConfig::default());
        radio
    }

    fn spi_transfer(&mut self, len: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len as usize])
            .map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// Send `command` followed by `len` dummy bytes.
    ///
    /// This is also used to write SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_read(0, commands::NOP)?;
    /// // STATUS register is now stored in self._status
    /// ```
    fn spi_read(&mut self, len: u8, command: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        self._buf[1..=len as usize].fill(0);
        self.spi_transfer(len + 1)
    }

    fn spi_write_byte(
        &mut self,
        register: u8,
        byte: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = register | commands::W_REGISTER;
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    fn spi_write_buf(
        &mut self,
        register: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_command(register | commands::W_REGISTER, buf)
    }

    /// Send a command opcode followed by a data phase (at most 32 bytes).
    fn spi_command(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        let buf_len = buf.len().min(32);
        self._buf[1..(buf_len + 1)].copy_from_slice(&buf[..buf_len]);
        self.spi_transfer(buf_len as u8 + 1)
    }

    /// Sends ACTIVATE `0x73`, which [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init)
    /// does once the variant probe found an nRF24L01+.
    fn toggle_features(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_command(commands::ACTIVATE, &[commands::ACTIVATE_KEY])
    }

    fn pipe_index(pipe: u8) -> Result<usize, Nrf24Error<SPI::Error, DO::Error>> {
        if pipe < limits::PIPE_COUNT {
            Ok(pipe as usize)
        } else {
            Err(Nrf24Error::InvalidPipe)
        }
    }

    /// CE low, then write CONFIG as a powered PRX or PTX.
    ///
    /// Waits for the oscillator if the radio was powered down.
    fn enter_standby(&mut self, is_rx: bool) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let was_powered = self._config_reg.power();
        let config = self._config_reg.with_is_rx(is_rx).with_power(true);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self._config_reg = config;
        if !was_powered {
            self._delay_impl.delay_us(limits::POWER_UP_DELAY_US);
        }
        Ok(())
    }

    fn write_feature(&mut self, feature: Feature) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::FEATURE, feature.into_bits())?;
        self._feature = feature;
        Ok(())
    }

    /// Write DYNPD and mirror it into each pipe's cache.
    fn write_dynpd(&mut self, dynpd: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::DYNPD, dynpd)?;
        for (pipe, cache) in self._pipes.iter_mut().enumerate() {
            cache.dynamic_payloads = dynpd & (1 << pipe) > 0;
        }
        Ok(())
    }

    /// Write EN_AA and mirror it into each pipe's cache.
    fn write_en_aa(&mut self, en_aa: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::EN_AA, en_aa)?;
        for (pipe, cache) in self._pipes.iter_mut().enumerate() {
            cache.auto_ack = en_aa & (1 << pipe) > 0;
        }
        Ok(())
    }

    /// Mirror everything [`RadioConfig`] sets into the driver's cache.
    fn cache_config(&mut self, config: &RadioConfig) {
        self._config_reg = config.config_reg.with_power(false).with_is_rx(false);
        self._feature = config.feature;
        self._channel = config.channel();
        self._address_length = config.address_length();
        self._payload_length = config.payload_length();
        config.tx_address(&mut self._tx_address);
        let auto_ack = config.auto_ack();
        let dynpd = config.dynamic_payloads_pipes();
        for (pipe, cache) in self._pipes.iter_mut().enumerate() {
            let mut address = [0; 5];
            config.rx_address(pipe as u8, &mut address);
            *cache = PipeConfig {
                address,
                address_length: config
                    .rx_address_length(pipe as u8)
                    .min(self._address_length),
                payload_length: self._payload_length,
                auto_ack: auto_ack & (1 << pipe) > 0,
                dynamic_payloads: dynpd & (1 << pipe) > 0,
                enabled: config.is_rx_pipe_enabled(pipe as u8),
            };
        }
    }

    /// Is this radio a nRF24L01+ variant?
    ///
    /// The bool that this function returns is only valid _after_ calling
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init).
    pub fn is_plus_variant(&self) -> bool {
        self._is_plus_variant
    }

    /// Received Power Detector: was a signal above -64 dBm present on the
    /// current channel during the last RX period?
    pub fn rpd(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::RPD)?;
        Ok(self._buf[1] & mnemonics::RPD == mnemonics::RPD)
    }

    /// Start transmitting an unmodulated carrier on the current channel with
    /// the current PA level.
    ///
    /// Enters TX mode first if needed. Use [`RF24::stop_carrier_wave()`] to stop.
    pub fn start_carrier_wave(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if self._mode != Mode::Transmit {
            self.as_tx()?;
        }
        self.spi_read(1, registers::RF_SETUP)?;
        let rf_setup = RfSetup::from_bits(self._buf[1]).with_carrier_wave(true);
        self.spi_write_byte(registers::RF_SETUP, rf_setup.into_bits())?;
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._mode = Mode::TestCarrier;
        #[cfg(feature = "defmt")]
        #[cfg(target_os = "none")]
        defmt::debug!("carrier wave on channel {=u8}", self._channel);
        Ok(())
    }

    /// Stop the carrier started by [`RF24::start_carrier_wave()`].
    ///
    /// The radio is left in TX mode.
    pub fn stop_carrier_wave(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self.spi_read(1, registers::RF_SETUP)?;
        let rf_setup = RfSetup::from_bits(self._buf[1]).with_carrier_wave(false);
        self.spi_write_byte(registers::RF_SETUP, rf_setup.into_bits())?;
        self._mode = Mode::Transmit;
        Ok(())
    }

    /// Is the constant carrier output bit set in RF_SETUP?
    pub fn is_carrier_wave(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::RF_SETUP)?;
        Ok(RfSetup::from_bits(self._buf[1]).cont_wave())
    }

    /// Read the OBSERVE_TX register.
    ///
    /// Returns `(lost_packets, retransmits)`, see [`RF24::get_lost_packets()`]
    /// and [`EsbRadio::get_last_arc()`].
    pub fn get_observe_tx(&mut self) -> Result<(u8, u8), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::OBSERVE_TX)?;
        let observe = ObserveTx::from_bits(self._buf[1]);
        Ok((observe.plos(), observe.arc()))
    }

    /// Packets lost since the channel was last set (saturates at 15).
    pub fn get_lost_packets(&mut self) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        self.get_observe_tx().map(|(lost, _)| lost)
    }

    /// Reset the chip's lost packet counter by rewriting the current channel.
    pub fn reset_lost_packets(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::RF_CH, self._channel)
    }

    /// Power down the radio and give back the bus, CE pin and delay provider.
    pub fn release(mut self) -> Result<(SPI, DO, DELAY), Nrf24Error<SPI::Error, DO::Error>> {
        use super::prelude::EsbPower;
        self.power_down()?;
        Ok((self._spi, self.ce_pin, self._delay_impl))
    }
}
