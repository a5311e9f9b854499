//! Little-endian read/write extension traits for the binary fast-path
//! formats. Field order and byte order are always explicit; nothing here
//! depends on in-memory struct layout.

use std::io::{Error, ErrorKind, Read, Result, Write};

/// Extension trait for reading little-endian values from a reader
pub trait ReadExt: Read {
    fn read_u32_le(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_i32_le(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_f32_le(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }

    /// Read three consecutive f32 values
    fn read_f32x3_le(&mut self) -> Result<[f32; 3]> {
        Ok([
            self.read_f32_le()?,
            self.read_f32_le()?,
            self.read_f32_le()?,
        ])
    }

    /// Read a length-prefixed UTF-8 string (u32 byte count, then bytes)
    fn read_string_le(&mut self) -> Result<String> {
        let len = self.read_u32_le()? as usize;
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::new(ErrorKind::InvalidData, e))
    }
}

/// Extension trait for writing little-endian values to a writer
pub trait WriteExt: Write {
    fn write_u32_le(&mut self, n: u32) -> Result<()> {
        self.write_all(&n.to_le_bytes())
    }

    fn write_i32_le(&mut self, n: i32) -> Result<()> {
        self.write_all(&n.to_le_bytes())
    }

    fn write_f32_le(&mut self, n: f32) -> Result<()> {
        self.write_all(&n.to_le_bytes())
    }

    /// Write three consecutive f32 values
    fn write_f32x3_le(&mut self, v: [f32; 3]) -> Result<()> {
        self.write_f32_le(v[0])?;
        self.write_f32_le(v[1])?;
        self.write_f32_le(v[2])
    }

    /// Write a length-prefixed UTF-8 string (u32 byte count, then bytes)
    fn write_string_le(&mut self, s: &str) -> Result<()> {
        self.write_u32_le(s.len() as u32)?;
        self.write_all(s.as_bytes())
    }
}

// Implement the traits for all types that implement Read/Write
impl<R: Read + ?Sized> ReadExt for R {}
impl<W: Write + ?Sized> WriteExt for W {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_numeric_round_trip() {
        let mut data = Vec::new();
        data.write_u32_le(0x424D_4465).unwrap();
        data.write_i32_le(-24).unwrap();
        data.write_f32_le(0.5).unwrap();
        data.write_f32x3_le([1.0, -2.0, 3.5]).unwrap();

        let mut cursor = Cursor::new(data);
        assert_eq!(cursor.read_u32_le().unwrap(), 0x424D_4465);
        assert_eq!(cursor.read_i32_le().unwrap(), -24);
        assert_eq!(cursor.read_f32_le().unwrap(), 0.5);
        assert_eq!(cursor.read_f32x3_le().unwrap(), [1.0, -2.0, 3.5]);
    }

    #[test]
    fn test_string_round_trip() {
        let mut data = Vec::new();
        data.write_string_le("Rwaist").unwrap();
        data.write_string_le("").unwrap();

        let mut cursor = Cursor::new(data);
        assert_eq!(cursor.read_string_le().unwrap(), "Rwaist");
        assert_eq!(cursor.read_string_le().unwrap(), "");
    }

    #[test]
    fn test_byte_order_is_little_endian() {
        let mut data = Vec::new();
        data.write_u32_le(0x0102_0304).unwrap();
        assert_eq!(data, [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_short_read_fails() {
        let mut cursor = Cursor::new([0u8; 2]);
        assert!(cursor.read_u32_le().is_err());
    }
}
