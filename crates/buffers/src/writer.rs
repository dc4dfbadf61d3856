//! Growable big-endian writer that hands out its contents chunk by chunk.

/// A byte writer that stages one chunk at a time.
///
/// Writes append to an internal buffer; [`flush`](Writer::flush) returns
/// everything written since the previous flush and keeps the allocation
/// around for the next chunk. All multi-byte values are big-endian.
///
/// # Example
///
/// ```
/// use ubjson_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(b's');
/// writer.u8(2);
/// writer.utf8("hi");
/// assert_eq!(writer.flush(), b"s\x02hi");
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer that can stage `capacity` bytes without growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes staged since the last flush.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drops staged bytes without returning them.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Returns the staged chunk and starts a new one.
    pub fn flush(&mut self) -> Vec<u8> {
        let chunk = self.buf.to_vec();
        self.buf.clear();
        chunk
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.buf.push(val as u8);
    }

    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an IEEE-754 single precision float.
    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an IEEE-754 double precision float.
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a marker byte followed by a big-endian `u32`.
    pub fn u8u32(&mut self, marker: u8, val: u32) {
        self.buf.reserve(5);
        self.buf.push(marker);
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes the UTF-8 bytes of `s`. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.buf.extend_from_slice(s.as_bytes());
        s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_flush_starts_new_chunk() {
        let mut writer = Writer::new();
        writer.u8(b'Z');
        assert_eq!(writer.flush(), [b'Z']);
        writer.u8(b'N');
        assert_eq!(writer.flush(), [b'N']);
        assert!(writer.flush().is_empty());
    }

    #[test]
    fn test_i8_negative() {
        let mut writer = Writer::new();
        writer.i8(-42);
        assert_eq!(writer.flush(), [0xd6]);
    }

    #[test]
    fn test_i16_negative() {
        let mut writer = Writer::new();
        writer.i16(-24321);
        assert_eq!(writer.flush(), [0xa0, 0xff]);
    }

    #[test]
    fn test_i32_negative() {
        let mut writer = Writer::new();
        writer.i32(-100500);
        assert_eq!(writer.flush(), [0xff, 0xfe, 0x77, 0x6c]);
    }

    #[test]
    fn test_i64_bounds() {
        let mut writer = Writer::new();
        writer.i64(i64::MAX);
        assert_eq!(writer.flush(), [0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
        writer.i64(i64::MIN);
        assert_eq!(writer.flush(), [0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_f32_is_single_precision() {
        let mut writer = Writer::new();
        writer.f32(3.14);
        assert_eq!(writer.flush(), [0x40, 0x48, 0xf5, 0xc3]);
    }

    #[test]
    fn test_u8u32() {
        let mut writer = Writer::new();
        writer.u8u32(b'A', 1024);
        assert_eq!(writer.flush(), [b'A', 0x00, 0x00, 0x04, 0x00]);
    }

    #[test]
    fn test_utf8_returns_byte_length() {
        let mut writer = Writer::new();
        let n = writer.utf8("привет");
        assert_eq!(n, 12);
        assert_eq!(writer.len(), 12);
        assert_eq!(std::str::from_utf8(&writer.flush()).unwrap(), "привет");
    }

    #[test]
    fn test_reset_discards_staged_bytes() {
        let mut writer = Writer::with_capacity(16);
        writer.utf8("abc");
        writer.reset();
        assert!(writer.is_empty());
        assert_eq!(writer.flush(), b"");
    }
}
