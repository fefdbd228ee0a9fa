/// Register addresses of the nRF24L01.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const OBSERVE_TX: u8 = 0x08;
    pub const RPD: u8 = 0x09;
    /// RX_ADDR_P1 through RX_ADDR_P5 follow at consecutive addresses.
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const TX_ADDR: u8 = 0x10;
    /// RX_PW_P1 through RX_PW_P5 follow at consecutive addresses.
    pub const RX_PW_P0: u8 = 0x11;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// SPI command opcodes of the nRF24L01.
pub mod commands {
    /// OR'd with a register address to write that register.
    pub const W_REGISTER: u8 = 0x20;
    /// Followed by [`ACTIVATE_KEY`] to unlock the FEATURE and DYNPD registers.
    pub const ACTIVATE: u8 = 0x50;
    pub const ACTIVATE_KEY: u8 = 0x73;
    pub const R_RX_PL_WID: u8 = 0x60;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    /// OR'd with a pipe number.
    pub const W_ACK_PAYLOAD: u8 = 0xA8;
    pub const W_TX_PAYLOAD_NO_ACK: u8 = 0xB0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const NOP: u8 = 0xFF;
}

/// Bit masks used within registers.
pub mod mnemonics {
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;
    pub const CONT_WAVE: u8 = 1 << 7;
    pub const RPD: u8 = 1;
    /// Every pipe bit of EN_AA, EN_RXADDR and DYNPD.
    pub const ALL_PIPES: u8 = 0x3F;
}

/// Hardware limits and timing requirements (in microseconds).
pub mod limits {
    pub const MAX_PAYLOAD_LENGTH: u8 = 32;
    pub const MAX_CHANNEL: u8 = 125;
    pub const PIPE_COUNT: u8 = 6;
    pub const BASE_FREQUENCY_MHZ: u16 = 2400;
    pub const MAX_FREQUENCY_MHZ: u16 = BASE_FREQUENCY_MHZ + MAX_CHANNEL as u16;

    /// Oscillator start-up after setting PWR_UP.
    pub const POWER_UP_DELAY_US: u32 = 1500;
    /// Standby to active RX/TX settling.
    pub const SETTLE_DELAY_US: u32 = 130;
    /// Minimum CE pulse that starts a transmission.
    pub const CE_PULSE_US: u32 = 15;
    /// Supply settling before the first transaction.
    pub const INIT_DELAY_US: u32 = 5000;
    /// Wait between power down and rewriting registers on reset.
    pub const RESET_DELAY_US: u32 = 2000;

    /// Deadline of `send()`.
    pub const SEND_TIMEOUT_US: u32 = 10_000;
    /// Status poll interval of `send()`.
    pub const SEND_POLL_US: u32 = 1;
    /// Status poll interval of `send_with_timeout()`.
    pub const BLOCKING_POLL_US: u32 = 10;
}
