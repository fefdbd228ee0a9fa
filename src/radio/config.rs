use crate::radio::rf24::{
    bit_fields::{Config, Feature, RfSetup, SetupRetry},
    limits, mnemonics,
};
use crate::{CrcLength, DataRate, PaLevel};

/// Pipe addresses held by a [`RadioConfig`].
#[derive(Debug, Clone, Copy)]
struct PipeAddresses {
    tx: [u8; 5],
    tx_len: u8,
    rx: [[u8; 5]; 6],
    rx_len: [u8; 6],
    enabled: u8,
}

impl Default for PipeAddresses {
    fn default() -> Self {
        Self {
            tx: [0xE7; 5],
            tx_len: 5,
            rx: [
                [0xE7; 5],
                [0xC2; 5],
                [0xC3; 5],
                [0xC4; 5],
                [0xC5; 5],
                [0xC6; 5],
            ],
            rx_len: [5; 6],
            enabled: 0x03,
        }
    }
}

/// A complete register image of the radio, applied in one pass by
/// [`EsbInit::with_config()`](fn@crate::radio::prelude::EsbInit::with_config).
///
/// This struct follows a builder pattern. Start from [`RadioConfig::default()`]
/// and chain the `with_*` methods:
/// ```
/// use nrf24::{radio::RadioConfig, DataRate};
///
/// let config = RadioConfig::default()
///     .with_channel(76)
///     .with_data_rate(DataRate::Mbps2);
/// assert_eq!(config.channel(), 76);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pub(crate) rf_setup: RfSetup,
    pub(crate) feature: Feature,
    address_length: u8,
    channel: u8,
    payload_length: u8,
    auto_ack: u8,
    dynpd: u8,
    pipes: PipeAddresses,
}

impl Default for RadioConfig {
    /// The driver defaults, also applied by
    /// [`EsbInit::reset()`](fn@crate::radio::prelude::EsbInit::reset).
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `2` (2402 MHz) |
    /// | [`RadioConfig::address_length()`] | `5` |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] (0 dBm) |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps2`] |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit8`] |
    /// | [`RadioConfig::payload_length()`] | `32` |
    /// | [`RadioConfig::auto_ack()`] | `0x3F` (all pipes) |
    /// | [`RadioConfig::auto_retry_delay()`] | `0` (250 us) |
    /// | [`RadioConfig::auto_retry_count()`] | `3` |
    /// | [`RadioConfig::dynamic_payloads()`] | `false` |
    /// | [`RadioConfig::ack_payloads()`] | `false` |
    /// | [`RadioConfig::ask_no_ack()`] | `false` |
    /// | IRQ events | all enabled |
    ///
    /// ## Default pipe addresses
    ///
    /// | pipe | state  | address |
    /// |------|--------|---------|
    /// | TX   |        | `[0xE7; 5]` |
    /// | 0    | open   | `[0xE7; 5]` |
    /// | 1    | open   | `[0xC2; 5]` |
    /// | 2    | closed | `0xC3` |
    /// | 3    | closed | `0xC4` |
    /// | 4    | closed | `0xC5` |
    /// | 5    | closed | `0xC6` |
    fn default() -> Self {
        Self {
            config_reg: Config::default(),
            auto_retries: SetupRetry::default(),
            rf_setup: RfSetup::default(),
            feature: Feature::default(),
            address_length: 5,
            channel: 2,
            payload_length: limits::MAX_PAYLOAD_LENGTH,
            auto_ack: mnemonics::ALL_PIPES,
            dynpd: 0,
            pipes: PipeAddresses::default(),
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub fn crc_length(&self) -> CrcLength {
        self.config_reg.crc_length()
    }

    /// See [`EsbCrcLength::set_crc_length()`](fn@crate::radio::prelude::EsbCrcLength::set_crc_length).
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        Self {
            config_reg: self.config_reg.with_crc_length(length),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub fn data_rate(&self) -> DataRate {
        self.rf_setup.data_rate().unwrap_or(DataRate::Mbps1)
    }

    /// See [`EsbDataRate::set_data_rate()`](fn@crate::radio::prelude::EsbDataRate::set_data_rate).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self {
            rf_setup: self.rf_setup.with_data_rate(data_rate),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub fn pa_level(&self) -> PaLevel {
        self.rf_setup.pa_level()
    }

    /// See [`EsbPaLevel::set_pa_level()`](fn@crate::radio::prelude::EsbPaLevel::set_pa_level).
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        Self {
            rf_setup: self.rf_setup.with_pa_level(level),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_address_length()`].
    pub const fn address_length(&self) -> u8 {
        self.address_length
    }

    /// The address length shared by all pipes, clamped to range [3, 5].
    pub fn with_address_length(self, length: u8) -> Self {
        Self {
            address_length: length.clamp(3, 5),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The RF channel, clamped to range [0, 125].
    ///
    /// ```text
    /// frequency (in MHz) = 2400 + channel
    /// ```
    pub fn with_channel(self, channel: u8) -> Self {
        Self {
            channel: channel.min(limits::MAX_CHANNEL),
            ..self
        }
    }

    /// The auto-retry `delay` set via [`RadioConfig::with_auto_retries()`].
    pub fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// The auto-retry `count` set via [`RadioConfig::with_auto_retries()`].
    pub fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// See [`EsbAutoAck::set_auto_retries()`](fn@crate::radio::prelude::EsbAutoAck::set_auto_retries).
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        Self {
            auto_retries: self
                .auto_retries
                .with_ard(delay.min(15))
                .with_arc(count.min(15)),
            ..self
        }
    }

    /// Does the "RX Data Ready" event drive the IRQ pin?
    pub fn rx_dr(&self) -> bool {
        self.config_reg.irq_events().rx_dr()
    }

    pub fn with_rx_dr(self, enable: bool) -> Self {
        let events = self.config_reg.irq_events().with_rx_dr(enable);
        Self {
            config_reg: self.config_reg.with_irq_events(events),
            ..self
        }
    }

    /// Does the "TX Data Sent" event drive the IRQ pin?
    pub fn tx_ds(&self) -> bool {
        self.config_reg.irq_events().tx_ds()
    }

    pub fn with_tx_ds(self, enable: bool) -> Self {
        let events = self.config_reg.irq_events().with_tx_ds(enable);
        Self {
            config_reg: self.config_reg.with_irq_events(events),
            ..self
        }
    }

    /// Does the "maximum retransmits" event drive the IRQ pin?
    pub fn max_rt(&self) -> bool {
        self.config_reg.irq_events().max_rt()
    }

    pub fn with_max_rt(self, enable: bool) -> Self {
        let events = self.config_reg.irq_events().with_max_rt(enable);
        Self {
            config_reg: self.config_reg.with_irq_events(events),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_ask_no_ack()`].
    pub fn ask_no_ack(&self) -> bool {
        self.feature.ask_no_ack()
    }

    /// See [`EsbAutoAck::allow_ask_no_ack()`](fn@crate::radio::prelude::EsbAutoAck::allow_ask_no_ack).
    pub fn with_ask_no_ack(self, enable: bool) -> Self {
        Self {
            feature: self.feature.with_ask_no_ack(enable),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_dynamic_payloads()`].
    ///
    /// Also `true` after enabling ACK payloads.
    pub fn dynamic_payloads(&self) -> bool {
        self.feature.dynamic_payloads()
    }

    /// Enable or disable dynamic payloads on all pipes.
    ///
    /// Disabling also disables ACK payloads.
    pub fn with_dynamic_payloads(self, enable: bool) -> Self {
        Self {
            feature: self.feature.with_dynamic_payloads(enable),
            dynpd: if enable { mnemonics::ALL_PIPES } else { 0 },
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Per-pipe auto-ack bitmask: bit 0 controls pipe 0 and so on.
    ///
    /// ```
    /// use nrf24::radio::RadioConfig;
    ///
    /// // auto-ack on pipes 0, 1 and 4
    /// let config = RadioConfig::default().with_auto_ack(0b010011);
    /// assert_eq!(config.auto_ack(), 0x13);
    /// ```
    /// Clearing the pipe 0 bit also disables ACK payloads.
    pub fn with_auto_ack(self, enable: u8) -> Self {
        let auto_ack = enable & mnemonics::ALL_PIPES;
        let feature = if auto_ack & 1 == 0 {
            self.feature.with_ack_payloads(false)
        } else {
            self.feature
        };
        Self {
            auto_ack,
            feature,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_ack_payloads()`].
    pub fn ack_payloads(&self) -> bool {
        self.feature.ack_payloads()
    }

    /// Enable or disable payloads attached to ACK packets.
    ///
    /// Enabling also turns on dynamic payloads and auto-ack for pipe 0.
    pub fn with_ack_payloads(self, enable: bool) -> Self {
        let (auto_ack, dynpd) = if enable {
            (self.auto_ack | 1, self.dynpd | 1)
        } else {
            (self.auto_ack, self.dynpd)
        };
        Self {
            auto_ack,
            dynpd,
            feature: self.feature.with_ack_payloads(enable),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_payload_length()`].
    pub const fn payload_length(&self) -> u8 {
        self.payload_length
    }

    /// The static payload length of every pipe, clamped to 32.
    pub fn with_payload_length(self, length: u8) -> Self {
        Self {
            payload_length: length.min(limits::MAX_PAYLOAD_LENGTH),
            ..self
        }
    }

    /// Close a RX pipe.
    ///
    /// Does nothing if `pipe` is not in range [0, 5].
    pub fn close_rx_pipe(self, pipe: u8) -> Self {
        let mut pipes = self.pipes;
        if pipe < limits::PIPE_COUNT {
            pipes.enabled &= !(1 << pipe);
        }
        Self { pipes, ..self }
    }

    /// Is a RX pipe open?
    pub fn is_rx_pipe_enabled(&self, pipe: u8) -> bool {
        pipe < limits::PIPE_COUNT && self.pipes.enabled & (1 << pipe) > 0
    }

    /// The bitmask of open RX pipes.
    pub(crate) const fn rx_pipes_enabled(&self) -> u8 {
        self.pipes.enabled
    }

    /// Copy the address of a RX `pipe` into `address`.
    ///
    /// Does nothing if `pipe` is not in range [0, 5].
    pub fn rx_address(&self, pipe: u8, address: &mut [u8]) {
        if pipe < limits::PIPE_COUNT {
            let len = address.len().min(5);
            address[..len].copy_from_slice(&self.pipes.rx[pipe as usize][..len]);
        }
    }

    /// Open a RX `pipe` with the given `address`.
    ///
    /// Does nothing if `pipe` is not in range [0, 5] or `address` is empty.
    /// See [`EsbPipe::open_rx_pipe()`](fn@crate::radio::prelude::EsbPipe::open_rx_pipe)
    /// about which bytes of the address pipes 2 - 5 use.
    pub fn with_rx_address(self, pipe: u8, address: &[u8]) -> Self {
        let mut pipes = self.pipes;
        let len = address.len().min(5);
        if pipe < limits::PIPE_COUNT && len > 0 {
            pipes.rx[pipe as usize][..len].copy_from_slice(&address[..len]);
            pipes.rx_len[pipe as usize] = len as u8;
            pipes.enabled |= 1 << pipe;
        }
        Self { pipes, ..self }
    }

    /// Copy the TX address into `address`.
    pub fn tx_address(&self, address: &mut [u8]) {
        let len = address.len().min(5);
        address[..len].copy_from_slice(&self.pipes.tx[..len]);
    }

    /// Set the TX address.
    ///
    /// Pipe 0 receives the ACK packets of every transmission, so its RX address
    /// is set to the same value.
    pub fn with_tx_address(self, address: &[u8]) -> Self {
        let mut pipes = self.pipes;
        let len = address.len().min(5);
        if len > 0 {
            pipes.tx[..len].copy_from_slice(&address[..len]);
            pipes.rx[0][..len].copy_from_slice(&address[..len]);
            pipes.tx_len = len as u8;
            pipes.rx_len[0] = len as u8;
        }
        Self { pipes, ..self }
    }

    /// Number of address bytes given for a RX `pipe` (at most 5).
    pub(crate) fn rx_address_length(&self, pipe: u8) -> u8 {
        self.pipes.rx_len.get(pipe as usize).copied().unwrap_or(0)
    }

    /// Number of address bytes given for the TX address (at most 5).
    pub(crate) const fn tx_address_length(&self) -> u8 {
        self.pipes.tx_len
    }

    /// DYNPD register value.
    pub(crate) const fn dynamic_payloads_pipes(&self) -> u8 {
        self.dynpd
    }
}

#[cfg(test)]
mod test {
    use super::RadioConfig;
    use crate::{CrcLength, DataRate, PaLevel};

    #[test]
    fn defaults() {
        let config = RadioConfig::default();
        assert_eq!(config.channel(), 2);
        assert_eq!(config.payload_length(), 32);
        assert_eq!(config.address_length(), 5);
        assert_eq!(config.auto_ack(), 0x3F);
        assert_eq!(config.auto_retry_delay(), 0);
        assert_eq!(config.auto_retry_count(), 3);
        assert_eq!(config.pa_level(), PaLevel::Max);
        assert_eq!(config.data_rate(), DataRate::Mbps2);
        assert_eq!(config.crc_length(), CrcLength::Bit8);
        assert_eq!(config.rx_pipes_enabled(), 3);
    }

    #[test]
    fn defaults_match_power_on_registers() {
        let config = RadioConfig::default();
        assert_eq!(config.config_reg.into_bits(), 0x08);
        assert_eq!(config.rf_setup.into_bits(), 0x0E);
        assert_eq!(config.auto_retries.into_bits(), 0x03);
    }

    #[test]
    fn crc_length() {
        let mut config = RadioConfig::default();
        for len in [CrcLength::Disabled, CrcLength::Bit16, CrcLength::Bit8] {
            config = config.with_crc_length(len);
            assert_eq!(len, config.crc_length());
        }
    }

    #[test]
    fn irq_events() {
        let mut config = RadioConfig::default();
        assert!(config.rx_dr());
        assert!(config.tx_ds());
        assert!(config.max_rt());
        config = config.with_rx_dr(false).with_tx_ds(false).with_max_rt(false);
        assert!(!config.rx_dr());
        assert!(!config.tx_ds());
        assert!(!config.max_rt());
        assert_eq!(config.config_reg.into_bits(), 0x78);
    }

    #[test]
    fn address_length() {
        let mut config = RadioConfig::default();
        for len in 0..10 {
            config = config.with_address_length(len);
            assert_eq!(config.address_length(), len.clamp(3, 5));
        }
    }

    #[test]
    fn rf_setup() {
        let mut config = RadioConfig::default();
        for level in [PaLevel::Max, PaLevel::High, PaLevel::Low, PaLevel::Min] {
            config = config.with_pa_level(level);
            assert_eq!(config.pa_level(), level);
        }
        for rate in [DataRate::Kbps250, DataRate::Mbps1, DataRate::Mbps2] {
            config = config.with_data_rate(rate);
            assert_eq!(config.data_rate(), rate);
        }
        // PA level survives data rate changes
        assert_eq!(config.pa_level(), PaLevel::Min);
    }

    #[test]
    fn feature_register() {
        let mut config = RadioConfig::default();
        assert!(!config.ack_payloads());
        assert!(!config.dynamic_payloads());
        assert!(!config.ask_no_ack());

        config = config.with_auto_ack(0).with_ack_payloads(true);
        assert_eq!(config.auto_ack(), 1);
        assert_eq!(config.dynamic_payloads_pipes(), 1);
        assert!(config.ack_payloads());
        assert!(config.dynamic_payloads());

        config = config.with_ask_no_ack(true).with_ack_payloads(false);
        assert!(!config.ack_payloads());
        assert!(config.dynamic_payloads());
        assert!(config.ask_no_ack());

        config = config.with_dynamic_payloads(true);
        assert_eq!(config.dynamic_payloads_pipes(), 0x3F);
        config = config.with_ack_payloads(true).with_dynamic_payloads(false);
        assert!(!config.ack_payloads());
        assert_eq!(config.dynamic_payloads_pipes(), 0);

        config = config.with_ack_payloads(true).with_auto_ack(0x3E);
        assert!(!config.ack_payloads());
    }

    #[test]
    fn clamped_values() {
        let config = RadioConfig::default()
            .with_payload_length(255)
            .with_channel(255)
            .with_auto_retries(20, 30);
        assert_eq!(config.payload_length(), 32);
        assert_eq!(config.channel(), 125);
        assert_eq!(config.auto_retry_delay(), 15);
        assert_eq!(config.auto_retry_count(), 15);
    }

    #[test]
    fn pipe_addresses() {
        let mut config = RadioConfig::default();
        let address = [0xB0, 0xB1, 0xB2, 0xB3, 0xB4];
        config = config.with_tx_address(&address);
        let mut result = [0; 5];
        config.tx_address(&mut result);
        assert_eq!(result, address);
        // pipe 0 follows the TX address
        config.rx_address(0, &mut result);
        assert_eq!(result, address);

        config = config.close_rx_pipe(1).close_rx_pipe(10);
        assert!(!config.is_rx_pipe_enabled(1));
        assert!(!config.is_rx_pipe_enabled(10));
        // empty addresses and invalid pipes are ignored
        config = config.with_rx_address(1, &[]).with_rx_address(6, &address);
        assert!(!config.is_rx_pipe_enabled(1));
        assert_eq!(config.rx_pipes_enabled(), 1);

        assert_eq!(config.rx_address_length(3), 5);
        config = config.with_rx_address(3, &address[..3]);
        config.rx_address(3, &mut result);
        assert_eq!(result, [0xB0, 0xB1, 0xB2, 0xC4, 0xC4]);
        assert_eq!(config.rx_address_length(3), 3);
        assert!(config.is_rx_pipe_enabled(3));
        assert_eq!(config.rx_address_length(6), 0);
    }
}
