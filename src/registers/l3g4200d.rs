//! L3G4200D register map

/// `WHO_AM_I` - Device identification (0x0F)
pub const WHO_AM_I: u8 = 0x0F;
/// `CTRL_REG1` - Data rate, bandwidth, power mode and axis enables (0x20)
pub const CTRL_REG1: u8 = 0x20;
/// `CTRL_REG2` - High-pass filter configuration (0x21)
pub const CTRL_REG2: u8 = 0x21;
/// `CTRL_REG3` - Interrupt configuration (0x22)
pub const CTRL_REG3: u8 = 0x22;
/// `CTRL_REG4` - Full scale and data format (0x23)
pub const CTRL_REG4: u8 = 0x23;
/// `CTRL_REG5` - FIFO and filter routing (0x24)
pub const CTRL_REG5: u8 = 0x24;
/// `OUT_X_L` - X-axis rate low byte (0x28)
pub const OUT_X_L: u8 = 0x28;
/// `OUT_X_H` - X-axis rate high byte (0x29)
pub const OUT_X_H: u8 = 0x29;
/// `OUT_Y_L` - Y-axis rate low byte (0x2A)
pub const OUT_Y_L: u8 = 0x2A;
/// `OUT_Y_H` - Y-axis rate high byte (0x2B)
pub const OUT_Y_H: u8 = 0x2B;
/// `OUT_Z_L` - Z-axis rate low byte (0x2C)
pub const OUT_Z_L: u8 = 0x2C;
/// `OUT_Z_H` - Z-axis rate high byte (0x2D)
pub const OUT_Z_H: u8 = 0x2D;

/// Sample registers as (low, high) pairs in X, Y, Z order
pub const DATA_PAIRS: [(u8, u8); 3] = [(OUT_X_L, OUT_X_H), (OUT_Y_L, OUT_Y_H), (OUT_Z_L, OUT_Z_H)];

device_driver::create_device!(
    device_name: L3g4200dRegisters,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// `WHO_AM_I` - Device Identification (0x0F)
        /// Expected value: 0xD3
        register WhoAmI {
            const ADDRESS = 0x0F;
            const SIZE_BITS = 8;

            /// Device ID (should read 0xD3)
            who_am_i: uint = 0..8,
        },

        /// `CTRL_REG1` - Control Register 1 (0x20)
        register CtrlReg1 {
            const ADDRESS = 0x20;
            const SIZE_BITS = 8;

            /// X-axis enable
            x_enable: bool = 0,
            /// Y-axis enable
            y_enable: bool = 1,
            /// Z-axis enable
            z_enable: bool = 2,
            /// Normal mode (power-down when clear)
            normal_mode: bool = 3,
            /// Bandwidth selection
            bandwidth: uint = 4..6,
            /// Output data rate selection
            data_rate: uint = 6..8,
        },

        /// `CTRL_REG4` - Control Register 4 (0x23)
        register CtrlReg4 {
            const ADDRESS = 0x23;
            const SIZE_BITS = 8;

            /// 3-wire SPI mode
            spi_mode: bool = 0,
            /// Self-test mode
            self_test: uint = 1..3,
            reserved_3: uint = 3..4,
            /// Full-scale selection (0b00 = 250 dps, 0b01 = 500 dps, 0b10 = 2000 dps)
            full_scale: uint = 4..6,
            /// Big-endian data selection
            big_endian: bool = 6,
            /// Block data update
            block_update: bool = 7,
        }
    }
);
