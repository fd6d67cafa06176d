//! Mock `embedded-hal` I2C bus with per-address register files

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};
use std::collections::HashMap;

/// One recorded bus transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Target device address
    pub address: u8,
    /// Bytes written (register pointer first)
    pub written: Vec<u8>,
    /// Number of bytes read
    pub read_len: usize,
}

/// Mock I2C bus
#[derive(Debug, Default)]
pub struct MockI2c {
    registers: HashMap<(u8, u8), u8>,
    transactions: Vec<Transaction>,
    fail_next: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value on one device
    pub fn set_register(&mut self, address: u8, register: u8, value: u8) {
        self.registers.insert((address, register), value);
    }

    /// Get a register value on one device
    pub fn get_register(&self, address: u8, register: u8) -> u8 {
        self.registers
            .get(&(address, register))
            .copied()
            .unwrap_or(0)
    }

    /// Inject a failure on the next transaction
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    /// Transactions seen so far
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c<SevenBitAddress> for MockI2c {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail_next {
            self.fail_next = false;
            return Err(ErrorKind::Bus);
        }

        let mut record = Transaction {
            address,
            written: Vec::new(),
            read_len: 0,
        };
        let mut pointer = 0u8;

        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    if let Some((&register, data)) = bytes.split_first() {
                        pointer = register;
                        for (i, &byte) in data.iter().enumerate() {
                            self.registers
                                .insert((address, pointer.wrapping_add(i as u8)), byte);
                        }
                    }
                    record.written.extend_from_slice(bytes);
                }
                Operation::Read(buffer) => {
                    for (i, byte) in buffer.iter_mut().enumerate() {
                        *byte = self.get_register(address, pointer.wrapping_add(i as u8));
                    }
                    record.read_len += buffer.len();
                }
            }
        }

        self.transactions.push(record);
        Ok(())
    }
}
