//! Value types shared by the [`radio`](mod@crate::radio) traits.
//!
//! None of these types own a bus or pin; they only describe register
//! contents or cached driver state.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// Transmit power of the radio's Power Amplifier, in dBm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm (the power-on default)
    Max,
}

impl PaLevel {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 1,
            PaLevel::High => 2,
            PaLevel::Max => 3,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & 3 {
            0 => PaLevel::Min,
            1 => PaLevel::Low,
            2 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }

    /// The output power in dBm.
    pub const fn dbm(self) -> i8 {
        match self {
            PaLevel::Min => -18,
            PaLevel::Low => -12,
            PaLevel::High => -6,
            PaLevel::Max => 0,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=i8} dBm", self.dbm())
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{} dBm", self.dbm())
    }
}

/// Over-the-air bit rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataRate {
    /// 1 Mbps (the power-on default)
    Mbps1,
    /// 2 Mbps
    Mbps2,
    /// 250 Kbps (nRF24L01+ only)
    Kbps250,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// Length of the CRC appended to every packet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrcLength {
    /// No CRC. Not allowed while auto-ack is enabled on any pipe.
    Disabled,
    /// 1 byte CRC
    Bit8,
    /// 2 byte CRC
    Bit16,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for CrcLength {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcLength::Disabled => defmt::write!(fmt, "disabled"),
            CrcLength::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcLength::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

impl Display for CrcLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcLength::Disabled => write!(f, "disabled"),
            CrcLength::Bit8 => write!(f, "8 bit"),
            CrcLength::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// Occupancy of one of the radio's 3-level FIFOs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FifoState {
    Full,
    Empty,
    /// Holds at least one payload but is not full.
    Occupied,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The operating mode last requested from the radio.
///
/// This is the driver's view of the chip's state machine; the chip itself
/// only exposes the `PWR_UP` and `PRIM_RX` bits plus the CE line level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    /// `PWR_UP` cleared. Registers stay readable and writable.
    PowerDown,
    /// Powered with CE low.
    Standby,
    /// Powered as primary transmitter. CE is only pulsed per payload.
    Transmit,
    /// Powered as primary receiver with CE held high.
    Receive,
    /// Unmodulated carrier output with CE held high.
    TestCarrier,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for Mode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Mode::PowerDown => defmt::write!(fmt, "PowerDown"),
            Mode::Standby => defmt::write!(fmt, "Standby"),
            Mode::Transmit => defmt::write!(fmt, "Transmit"),
            Mode::Receive => defmt::write!(fmt, "Receive"),
            Mode::TestCarrier => defmt::write!(fmt, "TestCarrier"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mode::PowerDown => write!(f, "PowerDown"),
            Mode::Standby => write!(f, "Standby"),
            Mode::Transmit => write!(f, "Transmit"),
            Mode::Receive => write!(f, "Receive"),
            Mode::TestCarrier => write!(f, "TestCarrier"),
        }
    }
}

/// The interrupt events reported in the STATUS register.
///
/// The same type is used to select which events drive the IRQ pin
/// ([`EsbStatus::set_status_flags()`](fn@crate::radio::prelude::EsbStatus::set_status_flags))
/// and which events to clear
/// ([`EsbStatus::clear_status_flags()`](fn@crate::radio::prelude::EsbStatus::clear_status_flags)).
///
/// ```
/// use nrf24::StatusFlags;
///
/// let flags = StatusFlags::default().with_rx_dr(true);
/// assert!(flags.rx_dr());
/// assert!(!flags.max_rt());
/// ```
/// Use [`StatusFlags::default`] for all events unset and
/// [`StatusFlags::new`] for all events set.
#[bitfield(u8, new = false, order = Msb)]
pub struct StatusFlags {
    #[bits(1)]
    _reserved: u8,

    /// RX Data Ready: a payload is waiting in the RX FIFO.
    pub rx_dr: bool,

    /// TX Data Sent: the last payload was sent (and acknowledged, if auto-ack is on).
    pub tx_ds: bool,

    /// Maximum retransmits reached without an acknowledgement.
    pub max_rt: bool,

    /// Pipe number of the payload at the head of the RX FIFO (7 when the FIFO is empty).
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// The TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

impl StatusFlags {
    /// Bits of the three interrupt events. Shared by STATUS and CONFIG.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// All three interrupt events set.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// The only interrupt events a transmission resolves to.
    pub(crate) fn tx_events() -> Self {
        Self::default().with_tx_ds(true).with_max_rt(true)
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {=bool}, tx_ds: {=bool}, max_rt: {=bool}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

/// A fresh reading of the STATUS and FIFO_STATUS registers.
///
/// See [`EsbStatus::get_status()`](fn@crate::radio::prelude::EsbStatus::get_status).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusSnapshot {
    pub rx_dr: bool,
    pub tx_ds: bool,
    pub max_rt: bool,
    /// Pipe number of the next available payload; 7 means the RX FIFO is empty.
    pub rx_pipe: u8,
    pub tx_full: bool,
    pub tx_empty: bool,
    pub rx_full: bool,
    pub rx_empty: bool,
}

impl StatusSnapshot {
    /// The pipe holding the next payload, if any.
    pub const fn pipe(&self) -> Option<u8> {
        if self.rx_pipe < 6 {
            Some(self.rx_pipe)
        } else {
            None
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for StatusSnapshot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusSnapshot rx_dr: {=bool}, tx_ds: {=bool}, max_rt: {=bool}, pipe: {=u8}, tx_full: {=bool}, tx_empty: {=bool}, rx_full: {=bool}, rx_empty: {=bool}",
            self.rx_dr,
            self.tx_ds,
            self.max_rt,
            self.rx_pipe,
            self.tx_full,
            self.tx_empty,
            self.rx_full,
            self.rx_empty
        )
    }
}

/// Software counters kept across transmissions and receptions.
///
/// Counters saturate instead of wrapping and are only cleared by
/// [`RF24::reset_statistics()`](fn@crate::radio::RF24::reset_statistics).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Statistics {
    /// Transmissions that resolved with TX_DS.
    pub packets_sent: u32,
    /// Payloads drained from the RX FIFO by `read()`.
    pub packets_received: u32,
    /// Transmissions that hit MAX_RT or the software deadline.
    pub packets_lost: u32,
    /// Sum of the chip's auto-retransmit count over every resolved transmission.
    pub retransmits: u32,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for Statistics {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "sent: {=u32}, received: {=u32}, lost: {=u32}, retransmits: {=u32}",
            self.packets_sent,
            self.packets_received,
            self.packets_lost,
            self.retransmits
        )
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "sent: {}, received: {}, lost: {}, retransmits: {}",
            self.packets_sent, self.packets_received, self.packets_lost, self.retransmits
        )
    }
}

/// The driver's cached view of one RX pipe.
///
/// Pipes 2 - 5 only own the first byte of their on-air address; the rest is
/// borrowed from pipe 1. The `address` kept here is whatever was last given to
/// [`EsbPipe::open_rx_pipe()`](fn@crate::radio::prelude::EsbPipe::open_rx_pipe),
/// see [`EsbPipe::get_rx_address()`](fn@crate::radio::prelude::EsbPipe::get_rx_address)
/// for the address actually used on air.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipeConfig {
    pub(crate) address: [u8; 5],
    pub(crate) address_length: u8,
    pub(crate) payload_length: u8,
    pub(crate) auto_ack: bool,
    pub(crate) dynamic_payloads: bool,
    pub(crate) enabled: bool,
}

impl PipeConfig {
    pub(crate) const fn with_address(address: [u8; 5], enabled: bool) -> Self {
        Self {
            address,
            address_length: 5,
            payload_length: 32,
            auto_ack: true,
            dynamic_payloads: false,
            enabled,
        }
    }

    /// The cached address, truncated to the address length it was opened with.
    pub fn address(&self) -> &[u8] {
        &self.address[..self.address_length as usize]
    }

    pub const fn address_length(&self) -> u8 {
        self.address_length
    }

    /// Static payload length (RX_PW_Px).
    pub const fn payload_length(&self) -> u8 {
        self.payload_length
    }

    pub const fn auto_ack(&self) -> bool {
        self.auto_ack
    }

    pub const fn dynamic_payloads(&self) -> bool {
        self.dynamic_payloads
    }

    /// Is the pipe enabled in EN_RXADDR?
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}
