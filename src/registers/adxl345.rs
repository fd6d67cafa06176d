//! ADXL345 register map
//!
//! All multi-byte quantities are little-endian: the `*0` register holds the
//! low byte and the `*1` register the high byte.

/// `DEVID` - Device ID (0x00)
pub const DEVID: u8 = 0x00;
/// `OFSX` - X-axis offset trim (0x1E)
pub const OFSX: u8 = 0x1E;
/// `OFSY` - Y-axis offset trim (0x1F)
pub const OFSY: u8 = 0x1F;
/// `OFSZ` - Z-axis offset trim (0x20)
pub const OFSZ: u8 = 0x20;
/// `BW_RATE` - Data rate and power mode control (0x2C)
pub const BW_RATE: u8 = 0x2C;
/// `POWER_CTL` - Power-saving features control (0x2D)
pub const POWER_CTL: u8 = 0x2D;
/// `DATA_FORMAT` - Data format control (0x31)
pub const DATA_FORMAT: u8 = 0x31;
/// `DATAX0` - X-axis data low byte (0x32)
pub const DATAX0: u8 = 0x32;
/// `DATAX1` - X-axis data high byte (0x33)
pub const DATAX1: u8 = 0x33;
/// `DATAY0` - Y-axis data low byte (0x34)
pub const DATAY0: u8 = 0x34;
/// `DATAY1` - Y-axis data high byte (0x35)
pub const DATAY1: u8 = 0x35;
/// `DATAZ0` - Z-axis data low byte (0x36)
pub const DATAZ0: u8 = 0x36;
/// `DATAZ1` - Z-axis data high byte (0x37)
pub const DATAZ1: u8 = 0x37;

/// Sample registers as (low, high) pairs in X, Y, Z order
pub const DATA_PAIRS: [(u8, u8); 3] = [(DATAX0, DATAX1), (DATAY0, DATAY1), (DATAZ0, DATAZ1)];

/// Offset-trim registers in X, Y, Z order
pub const OFFSET_REGISTERS: [u8; 3] = [OFSX, OFSY, OFSZ];

device_driver::create_device!(
    device_name: Adxl345Registers,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// `DEVID` - Device ID (0x00)
        /// Expected value: 0xE5
        register DevId {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Fixed device ID code
            device_id: uint = 0..8,
        },

        /// `BW_RATE` - Data Rate and Power Mode Control (0x2C)
        register BwRate {
            const ADDRESS = 0x2C;
            const SIZE_BITS = 8;

            /// Output data rate code (0b0000 = 0.10 Hz .. 0b1111 = 3200 Hz)
            rate: uint = 0..4,
            /// Reduced power operation
            low_power: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// `POWER_CTL` - Power-Saving Features Control (0x2D)
        register PowerCtl {
            const ADDRESS = 0x2D;
            const SIZE_BITS = 8;

            /// Reading frequency in sleep mode
            wakeup: uint = 0..2,
            /// Sleep mode
            sleep: bool = 2,
            /// Measurement mode (standby when clear)
            measure: bool = 3,
            /// Automatic sleep on inactivity
            auto_sleep: bool = 4,
            /// Link activity and inactivity functions
            link: bool = 5,
            reserved_7_6: uint = 6..8,
        },

        /// `DATA_FORMAT` - Data Format Control (0x31)
        register DataFormat {
            const ADDRESS = 0x31;
            const SIZE_BITS = 8;

            /// g range code (0b00 = ±2g .. 0b11 = ±16g)
            range: uint = 0..2,
            /// Left-justified (MSB) mode
            justify: bool = 2,
            /// Full resolution mode
            full_res: bool = 3,
            reserved_4: uint = 4..5,
            /// Interrupts active low
            int_invert: bool = 5,
            /// 3-wire SPI mode
            spi: bool = 6,
            /// Self-test force
            self_test: bool = 7,
        }
    }
);
