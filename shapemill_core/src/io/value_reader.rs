use anyhow::{Context, Result, bail};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{ErrorKind, Read};

/// A positioned reader for binary formats that mix byte orders.
///
/// Wraps any `Read` and decodes fixed-width values with the byte order named
/// in the method, e.g. `read_u32_be` for a big-endian record header followed
/// by `read_f64_le` for little-endian geometry. The current byte offset is
/// tracked and included in every error message.
///
/// # Examples
///
/// ```rust
/// use shapemill_core::io::ValueReader;
/// use anyhow::Result;
///
/// fn main() -> Result<()> {
///     let data: &[u8] = &[0x00, 0x00, 0x27, 0x0A, 0xE8, 0x03, 0x00, 0x00];
///     let mut reader = ValueReader::new(data);
///
///     assert_eq!(reader.read_u32_be()?, 9994);
///     assert_eq!(reader.read_u32_le()?, 1000);
///     assert_eq!(reader.position(), 8);
///     assert!(reader.at_eof()?);
///     Ok(())
/// }
/// ```
pub struct ValueReader<R: Read> {
	reader: R,
	position: u64,
	peeked: Option<u8>,
}

impl<R: Read> ValueReader<R> {
	pub fn new(reader: R) -> ValueReader<R> {
		ValueReader {
			reader,
			position: 0,
			peeked: None,
		}
	}

	/// Byte offset of the next read.
	pub fn position(&self) -> u64 {
		self.position
	}

	/// Returns `true` if the stream is exhausted. Reads ahead one byte, which
	/// is handed back by the next read; the position is unaffected.
	pub fn at_eof(&mut self) -> Result<bool> {
		if self.peeked.is_some() {
			return Ok(false);
		}
		let mut buf = [0u8; 1];
		loop {
			match self.reader.read(&mut buf) {
				Ok(0) => return Ok(true),
				Ok(_) => {
					self.peeked = Some(buf[0]);
					return Ok(false);
				}
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => return Err(e.into()),
			}
		}
	}

	fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
		let mut start = 0;
		if !buf.is_empty() {
			if let Some(byte) = self.peeked.take() {
				buf[0] = byte;
				start = 1;
			}
		}
		self
			.reader
			.read_exact(&mut buf[start..])
			.with_context(|| format!("unexpected end of stream at byte {}", self.position))?;
		self.position += buf.len() as u64;
		Ok(())
	}

	pub fn read_u8(&mut self) -> Result<u8> {
		let mut buf = [0u8; 1];
		self.fill(&mut buf)?;
		Ok(buf[0])
	}

	pub fn read_u16_le(&mut self) -> Result<u16> {
		let mut buf = [0u8; 2];
		self.fill(&mut buf)?;
		Ok(LittleEndian::read_u16(&buf))
	}

	pub fn read_u32_le(&mut self) -> Result<u32> {
		let mut buf = [0u8; 4];
		self.fill(&mut buf)?;
		Ok(LittleEndian::read_u32(&buf))
	}

	pub fn read_u32_be(&mut self) -> Result<u32> {
		let mut buf = [0u8; 4];
		self.fill(&mut buf)?;
		Ok(BigEndian::read_u32(&buf))
	}

	pub fn read_f32_le(&mut self) -> Result<f32> {
		let mut buf = [0u8; 4];
		self.fill(&mut buf)?;
		Ok(LittleEndian::read_f32(&buf))
	}

	pub fn read_f64_le(&mut self) -> Result<f64> {
		let mut buf = [0u8; 8];
		self.fill(&mut buf)?;
		Ok(LittleEndian::read_f64(&buf))
	}

	pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
		let mut buf = vec![0u8; length];
		self.fill(&mut buf)?;
		Ok(buf)
	}

	/// Reads `length` bytes and decodes them as text, replacing invalid
	/// UTF-8 sequences.
	pub fn read_string(&mut self, length: usize) -> Result<String> {
		let buf = self.read_bytes(length)?;
		Ok(String::from_utf8_lossy(&buf).into_owned())
	}

	/// Discards exactly `length` bytes.
	pub fn skip(&mut self, length: u64) -> Result<()> {
		let mut remaining = length;
		if remaining > 0 && self.peeked.take().is_some() {
			remaining -= 1;
		}
		let copied = std::io::copy(&mut (&mut self.reader).take(remaining), &mut std::io::sink())?;
		self.position += length - remaining + copied;
		if copied < remaining {
			bail!(
				"unexpected end of stream at byte {}: tried to skip {length} bytes",
				self.position
			);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn read_u8() -> Result<()> {
		let mut reader = ValueReader::new([0x01, 0xFF].as_slice());
		assert_eq!(reader.read_u8()?, 0x01);
		assert_eq!(reader.read_u8()?, 0xFF);
		Ok(())
	}

	#[test]
	fn read_u16_le() -> Result<()> {
		let mut reader = ValueReader::new([0x02, 0x01].as_slice());
		assert_eq!(reader.read_u16_le()?, 0x0102);
		Ok(())
	}

	#[test]
	fn read_u32_both_orders() -> Result<()> {
		let mut reader = ValueReader::new([0x00, 0x00, 0x27, 0x0A, 0x0A, 0x27, 0x00, 0x00].as_slice());
		assert_eq!(reader.read_u32_be()?, 9994);
		assert_eq!(reader.read_u32_le()?, 9994);
		Ok(())
	}

	#[test]
	fn read_f64_le() -> Result<()> {
		let mut reader = ValueReader::new([0, 0, 0, 0, 0, 0, 0xF0, 0x3F].as_slice());
		assert_eq!(reader.read_f64_le()?, 1.0);
		Ok(())
	}

	#[test]
	fn read_f32_le() -> Result<()> {
		let mut reader = ValueReader::new([0, 0, 0x80, 0x3F].as_slice());
		assert_eq!(reader.read_f32_le()?, 1.0);
		Ok(())
	}

	#[test]
	fn read_string() -> Result<()> {
		let mut reader = ValueReader::new(b"hello!".as_slice());
		assert_eq!(reader.read_string(5)?, "hello");
		Ok(())
	}

	#[test]
	fn skip_advances_position() -> Result<()> {
		let mut reader = ValueReader::new([0u8; 16].as_slice());
		reader.skip(12)?;
		assert_eq!(reader.position(), 12);
		assert!(reader.skip(12).is_err());
		Ok(())
	}

	#[test]
	fn position_tracks_reads() -> Result<()> {
		let mut reader = ValueReader::new([0u8; 14].as_slice());
		reader.read_u32_be()?;
		reader.read_f64_le()?;
		reader.read_u16_le()?;
		assert_eq!(reader.position(), 14);
		Ok(())
	}

	#[test]
	fn short_read_names_offset() {
		let mut reader = ValueReader::new([0u8; 6].as_slice());
		reader.read_u32_le().unwrap();
		let err = reader.read_u32_le().unwrap_err();
		assert!(err.to_string().contains("byte 4"), "{err}");
	}

	#[test]
	fn at_eof_does_not_consume() -> Result<()> {
		let mut reader = ValueReader::new([1u8, 2, 3, 4].as_slice());
		assert!(!reader.at_eof()?);
		assert_eq!(reader.position(), 0);
		assert_eq!(reader.read_u32_be()?, 0x01020304);
		assert!(reader.at_eof()?);
		Ok(())
	}

	#[test]
	fn skip_consumes_peeked_byte() -> Result<()> {
		let mut reader = ValueReader::new([1u8, 2, 3].as_slice());
		assert!(!reader.at_eof()?);
		reader.skip(2)?;
		assert_eq!(reader.position(), 2);
		assert_eq!(reader.read_u8()?, 3);
		Ok(())
	}
}
