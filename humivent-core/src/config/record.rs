//! Persisted settings record
//!
//! Fixed binary layout, little-endian, no padding and no version tag:
//!
//! | offset | size | field |
//! |-------:|-----:|-------|
//! | 0  | 1  | auto_on_dh |
//! | 1  | 1  | auto_off_dh |
//! | 2  | 2  | sensor_check_interval_s |
//! | 4  | 2  | altitude_m |
//! | 6  | 32 | inside_sensor_name |
//! | 38 | 32 | outside_sensor_name |
//! | 70 | 2  | reverse_stuck_check_interval_s |
//! | 72 | 2  | reverse_stuck_max_temperature_c |
//! | 74 | 2  | CRC-16 over bytes 0..74 |

use crc::{Crc, CRC_16_UMTS};

use super::settings::{SensorName, Settings, SENSOR_NAME_MAX_LENGTH};

/// Size of the data portion covered by the checksum
pub const DATA_SIZE: usize = 1 + 1 + 2 + 2 + 2 * SENSOR_NAME_MAX_LENGTH + 2 + 2;

/// Size of the checksum trailer
pub const CHECKSUM_SIZE: usize = 2;

/// Total record size on the medium
pub const RECORD_SIZE: usize = DATA_SIZE + CHECKSUM_SIZE;

/// CRC-16 (poly 0x8005, init 0, unreflected)
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_UMTS);

/// Calculate the record checksum over an encoded data portion
pub fn checksum(data: &[u8; DATA_SIZE]) -> u16 {
    CRC16.checksum(data)
}

/// A settings record as stored, checksum included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedRecord {
    /// Settings exactly as decoded, not sanitized
    pub settings: Settings,
    /// Stored checksum
    pub checksum: u16,
}

impl PersistedRecord {
    /// Build a record whose checksum matches its own data
    pub fn seal(settings: &Settings) -> Self {
        Self {
            settings: *settings,
            checksum: checksum(&encode_data(settings)),
        }
    }

    /// Check the stored checksum against the data
    pub fn verify(&self) -> bool {
        self.checksum == checksum(&encode_data(&self.settings))
    }

    /// Serialize to the on-medium layout
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        out[..DATA_SIZE].copy_from_slice(&encode_data(&self.settings));
        out[DATA_SIZE..].copy_from_slice(&self.checksum.to_le_bytes());
        out
    }

    /// Deserialize from the on-medium layout
    ///
    /// Every byte pattern decodes; integrity is judged by [`Self::verify`].
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let mut reader = Reader::new(&bytes[..]);

        let settings = Settings {
            auto_on_dh: reader.u8(),
            auto_off_dh: reader.u8(),
            sensor_check_interval_s: reader.u16(),
            altitude_m: reader.u16(),
            inside_sensor_name: SensorName::from_bytes(reader.array()),
            outside_sensor_name: SensorName::from_bytes(reader.array()),
            reverse_stuck_check_interval_s: reader.i16(),
            reverse_stuck_max_temperature_c: reader.i16(),
        };
        let checksum = reader.u16();

        Self { settings, checksum }
    }
}

/// Encode the data portion (everything the checksum covers)
pub fn encode_data(settings: &Settings) -> [u8; DATA_SIZE] {
    let mut out = [0u8; DATA_SIZE];
    let mut pos = 0;

    let mut put = |bytes: &[u8]| {
        out[pos..pos + bytes.len()].copy_from_slice(bytes);
        pos += bytes.len();
    };

    put(&[settings.auto_on_dh]);
    put(&[settings.auto_off_dh]);
    put(&settings.sensor_check_interval_s.to_le_bytes());
    put(&settings.altitude_m.to_le_bytes());
    put(settings.inside_sensor_name.as_bytes());
    put(settings.outside_sensor_name.as_bytes());
    put(&settings.reverse_stuck_check_interval_s.to_le_bytes());
    put(&settings.reverse_stuck_max_temperature_c.to_le_bytes());

    out
}

/// Sequential little-endian reader over a record buffer
///
/// Callers only read layouts that fit in the buffer they pass.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u8(&mut self) -> u8 {
        self.array::<1>()[0]
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.array())
    }

    fn i16(&mut self) -> i16 {
        i16::from_le_bytes(self.array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_size() {
        assert_eq!(DATA_SIZE, 74);
        assert_eq!(RECORD_SIZE, 76);
    }

    #[test]
    fn test_crc16_check_value() {
        // CRC-16/UMTS check value for "123456789"
        assert_eq!(CRC16.checksum(b"123456789"), 0xFEE8);
    }

    #[test]
    fn test_layout_offsets() {
        let mut settings = Settings::default();
        settings.sensor_check_interval_s = 0x0102;
        settings.reverse_stuck_max_temperature_c = -2;

        let bytes = PersistedRecord::seal(&settings).to_bytes();

        assert_eq!(bytes[0], 20);
        assert_eq!(bytes[1], 15);
        assert_eq!(&bytes[2..4], &[0x02, 0x01]);
        assert_eq!(&bytes[6..12], b"inside");
        assert_eq!(bytes[12], 0);
        assert_eq!(&bytes[38..45], b"outside");
        assert_eq!(&bytes[72..74], &[0xFE, 0xFF]);
    }

    #[test]
    fn test_checksum_covers_data_only() {
        let record = PersistedRecord::seal(&Settings::default());
        let bytes = record.to_bytes();

        let mut data = [0u8; DATA_SIZE];
        data.copy_from_slice(&bytes[..DATA_SIZE]);
        assert_eq!(checksum(&data), record.checksum);
        assert_eq!(&bytes[DATA_SIZE..], &record.checksum.to_le_bytes());
    }

    #[test]
    fn test_decode_matches_encode() {
        let record = PersistedRecord::seal(&Settings::default());
        let decoded = PersistedRecord::from_bytes(&record.to_bytes());

        assert_eq!(decoded, record);
        assert!(decoded.verify());
    }

    #[test]
    fn test_single_bit_flip_detected() {
        let mut bytes = PersistedRecord::seal(&Settings::default()).to_bytes();
        bytes[4] ^= 0x10;

        assert!(!PersistedRecord::from_bytes(&bytes).verify());
    }

    #[test]
    fn test_erased_medium_fails_verification() {
        let bytes = [0xFF; RECORD_SIZE];
        assert!(!PersistedRecord::from_bytes(&bytes).verify());
    }
}
