use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, FifoState, PaLevel, StatusFlags};

/// CONFIG register image.
///
/// The IRQ mask bits are inverted on the chip (1 = event does not drive IRQ),
/// so they are exposed through [`Config::irq_events()`] instead.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _reserved: u8,

    #[bits(1, access = None)]
    mask_rx_dr: bool,

    #[bits(1, access = None)]
    mask_tx_ds: bool,

    #[bits(1, access = None)]
    mask_max_rt: bool,

    #[bits(1, default = true)]
    pub en_crc: bool,

    pub crc_2bytes: bool,

    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    pub fn crc_length(&self) -> CrcLength {
        if !self.en_crc() {
            CrcLength::Disabled
        } else if self.crc_2bytes() {
            CrcLength::Bit16
        } else {
            CrcLength::Bit8
        }
    }

    /// Disabling only clears EN_CRC; the CRCO selection is left as is.
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        match length {
            CrcLength::Disabled => self.with_en_crc(false),
            CrcLength::Bit8 => self.with_en_crc(true).with_crc_2bytes(false),
            CrcLength::Bit16 => self.with_en_crc(true).with_crc_2bytes(true),
        }
    }

    /// The events that currently drive the IRQ pin.
    pub fn irq_events(&self) -> StatusFlags {
        StatusFlags::from_bits(!self.into_bits() & StatusFlags::IRQ_MASK)
    }

    /// Let only the events set in `flags` drive the IRQ pin.
    pub fn with_irq_events(self, flags: StatusFlags) -> Self {
        let masked = !flags.into_bits() & StatusFlags::IRQ_MASK;
        Self::from_bits(self.into_bits() & !StatusFlags::IRQ_MASK | masked)
    }
}

/// SETUP_RETR register image.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// Auto-retransmit delay, in steps of 250 us above 250 us.
    #[bits(4)]
    pub ard: u8,

    /// Auto-retransmit count.
    #[bits(4, default = 3)]
    pub arc: u8,
}

/// RF_SETUP register image.
#[bitfield(u8, order = Msb)]
pub(crate) struct RfSetup {
    pub cont_wave: bool,

    #[bits(1)]
    _reserved: u8,

    #[bits(1, access = None)]
    rf_dr_low: bool,

    pub pll_lock: bool,

    #[bits(1, access = None, default = true)]
    rf_dr_high: bool,

    #[bits(2, access = None, default = 3)]
    pa_level: u8,

    #[bits(1)]
    _obsolete: u8,
}

impl RfSetup {
    const DATA_RATE_MASK: u8 = 0x28;
    const PA_MASK: u8 = 0x06;
    const PA_SHIFT: u8 = 1;

    /// `None` when both data rate bits are set, which the chip reserves.
    pub fn data_rate(&self) -> Option<DataRate> {
        match self.into_bits() & Self::DATA_RATE_MASK {
            0 => Some(DataRate::Mbps1),
            0x08 => Some(DataRate::Mbps2),
            0x20 => Some(DataRate::Kbps250),
            _ => None,
        }
    }

    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let bits = match data_rate {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x08,
            DataRate::Kbps250 => 0x20,
        };
        Self::from_bits(self.into_bits() & !Self::DATA_RATE_MASK | bits)
    }

    pub fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits((self.into_bits() & Self::PA_MASK) >> Self::PA_SHIFT)
    }

    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let bits = level.into_bits() << Self::PA_SHIFT;
        Self::from_bits(self.into_bits() & !Self::PA_MASK | bits)
    }

    /// Constant carrier output needs both CONT_WAVE and PLL_LOCK.
    pub fn with_carrier_wave(self, enable: bool) -> Self {
        self.with_cont_wave(enable).with_pll_lock(enable)
    }
}

/// FEATURE register image.
#[bitfield(u8, order = Msb)]
pub(crate) struct Feature {
    #[bits(5)]
    _reserved: u8,

    #[bits(1, access = RO)]
    pub dynamic_payloads: bool,

    #[bits(1, access = RO)]
    pub ack_payloads: bool,

    pub ask_no_ack: bool,
}

impl Feature {
    /// Disabling dynamic payloads also disables ACK payloads.
    pub fn with_dynamic_payloads(self, enable: bool) -> Self {
        let mut bits = self.into_bits() & !(1 << Self::DYNAMIC_PAYLOADS_OFFSET);
        if enable {
            bits |= 1 << Self::DYNAMIC_PAYLOADS_OFFSET;
        } else {
            bits &= !(1 << Self::ACK_PAYLOADS_OFFSET);
        }
        Self::from_bits(bits)
    }

    /// Enabling ACK payloads also enables dynamic payloads.
    pub fn with_ack_payloads(self, enable: bool) -> Self {
        let mut bits = self.into_bits() & !(1 << Self::ACK_PAYLOADS_OFFSET);
        if enable {
            bits |= (1 << Self::ACK_PAYLOADS_OFFSET) | (1 << Self::DYNAMIC_PAYLOADS_OFFSET);
        }
        Self::from_bits(bits)
    }
}

/// FIFO_STATUS register image.
#[bitfield(u8, order = Msb)]
pub(crate) struct FifoStatus {
    #[bits(1)]
    _reserved_hi: u8,

    #[bits(1, access = RO)]
    pub tx_reuse: bool,

    #[bits(1, access = RO)]
    pub tx_full: bool,

    #[bits(1, access = RO)]
    pub tx_empty: bool,

    #[bits(2)]
    _reserved_lo: u8,

    #[bits(1, access = RO)]
    pub rx_full: bool,

    #[bits(1, access = RO)]
    pub rx_empty: bool,
}

impl FifoStatus {
    pub fn state(&self, about_tx: bool) -> FifoState {
        let (full, empty) = if about_tx {
            (self.tx_full(), self.tx_empty())
        } else {
            (self.rx_full(), self.rx_empty())
        };
        if full {
            FifoState::Full
        } else if empty {
            FifoState::Empty
        } else {
            FifoState::Occupied
        }
    }
}

/// OBSERVE_TX register image.
#[bitfield(u8, order = Msb)]
pub(crate) struct ObserveTx {
    /// Lost packets since the last write to RF_CH (saturates at 15).
    #[bits(4, access = RO)]
    pub plos: u8,

    /// Retransmits of the last payload.
    #[bits(4, access = RO)]
    pub arc: u8,
}

#[cfg(test)]
mod test {
    use super::{Config, Feature, FifoStatus, ObserveTx, RfSetup, SetupRetry};
    use crate::{CrcLength, DataRate, FifoState, PaLevel, StatusFlags};

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.into_bits(), 0x08);
        assert_eq!(config.crc_length(), CrcLength::Bit8);
        assert!(!config.power());
        assert!(!config.is_rx());
        assert_eq!(config.irq_events().into_bits(), 0x70);
    }

    #[test]
    fn config_crc() {
        let config = Config::default().with_crc_length(CrcLength::Bit16);
        assert_eq!(config.into_bits(), 0x0C);
        assert_eq!(config.crc_length(), CrcLength::Bit16);
        let config = config.with_crc_length(CrcLength::Disabled);
        // CRCO stays set
        assert_eq!(config.into_bits(), 0x04);
        assert_eq!(config.crc_length(), CrcLength::Disabled);
        let config = config.with_crc_length(CrcLength::Bit8);
        assert_eq!(config.into_bits(), 0x08);
        assert_eq!(config.crc_length(), CrcLength::Bit8);
    }

    #[test]
    fn config_irq_masks() {
        let events = StatusFlags::default().with_rx_dr(true);
        let config = Config::default().with_irq_events(events);
        assert_eq!(config.into_bits(), 0x38);
        assert_eq!(config.irq_events().into_bits(), events.into_bits());
    }

    #[test]
    fn setup_retry_defaults() {
        let retry = SetupRetry::default();
        assert_eq!(retry.into_bits(), 0x03);
        assert_eq!(retry.with_ard(5).into_bits(), 0x53);
    }

    #[test]
    fn rf_setup_fields() {
        let rf_setup = RfSetup::default();
        assert_eq!(rf_setup.into_bits(), 0x0E);
        assert_eq!(rf_setup.data_rate(), Some(DataRate::Mbps2));
        assert_eq!(rf_setup.pa_level(), PaLevel::Max);

        let rf_setup = rf_setup
            .with_data_rate(DataRate::Kbps250)
            .with_pa_level(PaLevel::Low);
        assert_eq!(rf_setup.into_bits(), 0x22);
        let rf_setup = rf_setup.with_data_rate(DataRate::Mbps2);
        assert_eq!(rf_setup.into_bits(), 0x0A);
        assert_eq!(RfSetup::from_bits(0x28).data_rate(), None);
        assert_eq!(rf_setup.with_carrier_wave(true).into_bits(), 0x9A);
    }

    #[test]
    fn feature_dependencies() {
        let feature = Feature::default().with_ack_payloads(true);
        assert_eq!(feature.into_bits(), 0x06);
        let feature = feature.with_dynamic_payloads(false).with_ask_no_ack(true);
        assert_eq!(feature.into_bits(), 0x01);
    }

    #[test]
    fn fifo_states() {
        let fifo = FifoStatus::from_bits(0x11);
        assert_eq!(fifo.state(true), FifoState::Empty);
        assert_eq!(fifo.state(false), FifoState::Empty);
        let fifo = FifoStatus::from_bits(0x22);
        assert_eq!(fifo.state(true), FifoState::Full);
        assert_eq!(fifo.state(false), FifoState::Full);
        assert_eq!(FifoStatus::from_bits(0).state(true), FifoState::Occupied);
    }

    #[test]
    fn observe_tx_nibbles() {
        let observe = ObserveTx::from_bits(0x5A);
        assert_eq!(observe.plos(), 5);
        assert_eq!(observe.arc(), 10);
    }
}
