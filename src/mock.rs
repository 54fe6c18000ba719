//! Register-file I2C device for tests.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress};
use embedded_hal_async::i2c::I2c as AsyncI2c;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { data: Vec<u8> },
    WriteRead { register: u8, read_len: usize },
    Other,
}

/// Answers on a single address, registers auto-increment like on the chip.
/// Failed transactions are not recorded.
#[derive(Debug)]
pub struct MockI2c {
    address: SevenBitAddress,
    registers: [u8; 256],
    transactions: Vec<Transaction>,
    fail_next: bool,
}

impl MockI2c {
    pub fn new(address: SevenBitAddress) -> Self {
        Self {
            address,
            registers: [0; 256],
            transactions: Vec::new(),
            fail_next: false,
        }
    }

    pub fn register(&self, register: u8) -> u8 {
        self.registers[register as usize]
    }

    pub fn set_register(&mut self, register: u8, value: u8) {
        self.registers[register as usize] = value;
    }

    pub fn set_registers(&mut self, register: u8, values: &[u8]) {
        let start = register as usize;

        self.registers[start..start + values.len()].copy_from_slice(values);
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Next transaction is not acknowledged.
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    fn execute(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), ErrorKind> {
        if self.fail_next || address != self.address {
            self.fail_next = false;

            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut pointer = 0usize;

        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(data) => {
                    if let Some((register, values)) = data.split_first() {
                        pointer = *register as usize;

                        for value in values {
                            self.registers[pointer % 256] = *value;
                            pointer += 1;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.registers[pointer % 256];
                        pointer += 1;
                    }
                }
            }
        }

        let transaction = match &*operations {
            [Operation::Write(data)] => Transaction::Write {
                data: data.to_vec(),
            },
            [Operation::Write(data), Operation::Read(buf)] if data.len() == 1 => {
                Transaction::WriteRead {
                    register: data[0],
                    read_len: buf.len(),
                }
            }
            _ => Transaction::Other,
        };

        self.transactions.push(transaction);

        Ok(())
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.execute(address, operations)
    }
}

impl AsyncI2c for MockI2c {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.execute(address, operations)
    }
}
