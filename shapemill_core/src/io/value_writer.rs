use anyhow::{Result, ensure};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::Write;

/// A positioned writer with explicit-endian methods, the counterpart of
/// [`ValueReader`](super::ValueReader).
///
/// # Examples
///
/// ```rust
/// use shapemill_core::io::ValueWriter;
/// use anyhow::Result;
///
/// fn main() -> Result<()> {
///     let mut writer = ValueWriter::new_vec();
///     writer.write_u32_be(9994)?;
///     writer.write_u32_le(1000)?;
///     assert_eq!(writer.into_vec(), vec![0x00, 0x00, 0x27, 0x0A, 0xE8, 0x03, 0x00, 0x00]);
///     Ok(())
/// }
/// ```
pub struct ValueWriter<W: Write> {
	writer: W,
	position: u64,
}

impl ValueWriter<Vec<u8>> {
	/// A writer backed by a growable byte buffer, for building binary
	/// payloads in memory.
	pub fn new_vec() -> ValueWriter<Vec<u8>> {
		ValueWriter::new(Vec::new())
	}

	pub fn into_vec(self) -> Vec<u8> {
		self.writer
	}
}

impl<W: Write> ValueWriter<W> {
	pub fn new(writer: W) -> ValueWriter<W> {
		ValueWriter { writer, position: 0 }
	}

	/// Number of bytes written so far.
	pub fn position(&self) -> u64 {
		self.position
	}

	fn put(&mut self, buf: &[u8]) -> Result<()> {
		self.writer.write_all(buf)?;
		self.position += buf.len() as u64;
		Ok(())
	}

	pub fn write_u8(&mut self, value: u8) -> Result<()> {
		self.put(&[value])
	}

	pub fn write_u16_le(&mut self, value: u16) -> Result<()> {
		let mut buf = [0u8; 2];
		LittleEndian::write_u16(&mut buf, value);
		self.put(&buf)
	}

	pub fn write_u32_le(&mut self, value: u32) -> Result<()> {
		let mut buf = [0u8; 4];
		LittleEndian::write_u32(&mut buf, value);
		self.put(&buf)
	}

	pub fn write_u32_be(&mut self, value: u32) -> Result<()> {
		let mut buf = [0u8; 4];
		BigEndian::write_u32(&mut buf, value);
		self.put(&buf)
	}

	pub fn write_f32_le(&mut self, value: f32) -> Result<()> {
		let mut buf = [0u8; 4];
		LittleEndian::write_f32(&mut buf, value);
		self.put(&buf)
	}

	pub fn write_f64_le(&mut self, value: f64) -> Result<()> {
		let mut buf = [0u8; 8];
		LittleEndian::write_f64(&mut buf, value);
		self.put(&buf)
	}

	pub fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		self.put(buf)
	}

	/// Writes a string as a little-endian u16 byte count followed by the
	/// UTF-8 bytes.
	pub fn write_string_u16(&mut self, text: &str) -> Result<()> {
		ensure!(text.len() <= u16::MAX as usize, "string too long: {} bytes", text.len());
		self.write_u16_le(text.len() as u16)?;
		self.put(text.as_bytes())
	}

	pub fn flush(&mut self) -> Result<()> {
		self.writer.flush()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::io::ValueReader;

	#[test]
	fn write_u8() -> Result<()> {
		let mut writer = ValueWriter::new_vec();
		writer.write_u8(0xAB)?;
		assert_eq!(writer.into_vec(), vec![0xAB]);
		Ok(())
	}

	#[test]
	fn write_u16_le() -> Result<()> {
		let mut writer = ValueWriter::new_vec();
		writer.write_u16_le(0x0102)?;
		assert_eq!(writer.into_vec(), vec![0x02, 0x01]);
		Ok(())
	}

	#[test]
	fn write_u32_both_orders() -> Result<()> {
		let mut writer = ValueWriter::new_vec();
		writer.write_u32_be(9994)?;
		writer.write_u32_le(9994)?;
		assert_eq!(writer.into_vec(), vec![0x00, 0x00, 0x27, 0x0A, 0x0A, 0x27, 0x00, 0x00]);
		Ok(())
	}

	#[test]
	fn write_f64_le() -> Result<()> {
		let mut writer = ValueWriter::new_vec();
		writer.write_f64_le(1.0)?;
		assert_eq!(writer.into_vec(), vec![0, 0, 0, 0, 0, 0, 0xF0, 0x3F]);
		Ok(())
	}

	#[test]
	fn write_string_u16_roundtrip() -> Result<()> {
		let mut writer = ValueWriter::new_vec();
		writer.write_string_u16("St. Louis")?;
		let bytes = writer.into_vec();

		let mut reader = ValueReader::new(bytes.as_slice());
		let length = reader.read_u16_le()? as usize;
		assert_eq!(reader.read_string(length)?, "St. Louis");
		Ok(())
	}

	#[test]
	fn position_tracks_writes() -> Result<()> {
		let mut writer = ValueWriter::new_vec();
		writer.write_u32_le(1)?;
		writer.write_f64_le(2.0)?;
		assert_eq!(writer.position(), 12);
		Ok(())
	}
}
