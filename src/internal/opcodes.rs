//! CH9120 command opcodes
//!
//! Every command frame is `0x57 0xAB <opcode> <params>`. Set commands answer
//! with a single acknowledge byte, get commands with a fixed-length payload
//! whose size is listed next to the opcode.

// =============================================================================
// Chip Control
// =============================================================================

/// Read chip version (1 byte response)
pub const CHIP_VERSION: u8 = 0x01;
/// Reset the chip (ack)
pub const RESET: u8 = 0x02;
/// Read link status (1 byte response)
pub const GET_STATUS: u8 = 0x03;
/// Save RAM configuration to EEPROM (ack)
pub const SAVE_TO_EEPROM: u8 = 0x0D;
/// Run the saved configuration and reset (ack)
pub const RUN_AND_RESET: u8 = 0x0E;
/// Leave configuration mode (ack)
pub const EXIT: u8 = 0x5E;

// =============================================================================
// Network Registers
// =============================================================================

/// Set working mode
pub const SET_MODE: u8 = 0x10;
/// Set local IP
pub const SET_IP: u8 = 0x11;
/// Set subnet mask
pub const SET_NETMASK: u8 = 0x12;
/// Set gateway
pub const SET_GATEWAY: u8 = 0x13;
/// Set local (source) port
pub const SET_PORT: u8 = 0x14;
/// Set destination IP
pub const SET_DST_IP: u8 = 0x15;
/// Set destination port
pub const SET_DST_PORT: u8 = 0x16;
/// Enable source port randomization
pub const RANDOM_PORT: u8 = 0x17;
/// Enable DHCP
pub const DHCP: u8 = 0x33;

/// Get working mode (1 byte)
pub const GET_MODE: u8 = 0x60;
/// Get local IP (4 bytes)
pub const GET_IP: u8 = 0x61;
/// Get subnet mask (4 bytes)
pub const GET_NETMASK: u8 = 0x62;
/// Get gateway (4 bytes)
pub const GET_GATEWAY: u8 = 0x63;
/// Get local port (2 bytes, LE)
pub const GET_PORT: u8 = 0x64;
/// Get destination IP (4 bytes)
pub const GET_DST_IP: u8 = 0x65;
/// Get destination port (2 bytes, LE)
pub const GET_DST_PORT: u8 = 0x66;

// =============================================================================
// Serial Registers
// =============================================================================

/// Set UART baud rate
pub const SET_BAUD: u8 = 0x21;
/// Set UART framing (stop bits, parity, data bits)
pub const SET_CONFIG: u8 = 0x22;
/// Set UART inter-byte timeout
pub const SET_TIMEOUT: u8 = 0x23;
/// Set disconnect when the cable is unplugged
pub const SET_DISCONNECT: u8 = 0x24;
/// Set UART packet buffer length
pub const SET_LEN: u8 = 0x25;
/// Set auto-flush of the UART buffer on connect
pub const SET_FLUSH: u8 = 0x26;

/// Get UART baud rate (4 bytes, LE)
pub const GET_BAUD: u8 = 0x71;
/// Get UART framing (3 bytes)
pub const GET_CONFIG: u8 = 0x72;
/// Get UART inter-byte timeout (1 byte)
pub const GET_TIMEOUT: u8 = 0x73;
/// Get disconnect-without-link flag (1 byte)
pub const GET_DISCONNECT: u8 = 0x74;
/// Get UART packet buffer length (4 bytes, LE)
pub const GET_LEN: u8 = 0x75;
/// Get auto-flush flag (1 byte)
pub const GET_FLUSH: u8 = 0x76;
